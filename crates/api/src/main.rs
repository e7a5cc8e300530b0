use std::sync::Arc;

use cityinfo_infra::{CloudMailNotifier, InMemoryCityStore, LocalMailNotifier, Notifier};

#[tokio::main]
async fn main() {
    cityinfo_observability::init();

    let notifier: Arc<dyn Notifier> = match std::env::var("CITYINFO_NOTIFIER").as_deref() {
        Ok("cloud") => {
            tracing::info!("using cloud mail notifier");
            Arc::new(CloudMailNotifier)
        }
        Ok(other) => {
            tracing::warn!("unknown CITYINFO_NOTIFIER '{other}'; using local mail notifier");
            Arc::new(LocalMailNotifier)
        }
        Err(_) => {
            tracing::info!("using local mail notifier");
            Arc::new(LocalMailNotifier)
        }
    };

    let store = Arc::new(InMemoryCityStore::seeded());
    let app = cityinfo_api::app::build_app(store, notifier);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
