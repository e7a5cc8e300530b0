//! `cityinfo-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod city;
pub mod error;
pub mod id;
pub mod patch;
pub mod poi;

pub use city::City;
pub use error::{DomainError, DomainResult, FieldViolation};
pub use id::{CityId, PoiId};
pub use patch::{PatchOp, PatchOperation};
pub use poi::{PoiDraft, PointOfInterest};
