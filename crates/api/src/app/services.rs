use std::sync::Arc;

use cityinfo_core::PointOfInterest;
use cityinfo_infra::{CityRepository, Notifier};

/// Shared per-process services injected into handlers via `Extension`.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn CityRepository>,
    notifier: Arc<dyn Notifier>,
}

impl AppServices {
    pub fn new(store: Arc<dyn CityRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &Arc<dyn CityRepository> {
        &self.store
    }

    /// Dispatch the deletion notification without blocking the response.
    ///
    /// Fire-and-forget: the task is never awaited and notifier failures stay
    /// inside the notifier.
    pub fn notify_deleted(&self, poi: &PointOfInterest) {
        let notifier = Arc::clone(&self.notifier);
        let body = format!(
            "Point of interest {} with id {} was deleted.",
            poi.name, poi.id
        );
        tokio::spawn(async move {
            notifier.notify("Point of interest deleted", &body);
        });
    }
}
