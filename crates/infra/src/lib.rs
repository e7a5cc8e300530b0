//! Infrastructure layer: storage and external side channels.

pub mod notify;
pub mod repository;

pub use notify::{CloudMailNotifier, LocalMailNotifier, Notifier};
pub use repository::{CityRepository, InMemoryCityStore};
