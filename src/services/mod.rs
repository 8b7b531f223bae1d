//! Service layer for business logic.
//!
//! This module contains the tracked-set persistence, the search filter, the
//! controller that sequences mutations, and portrait loading.

pub mod controller;
pub mod filter;
pub mod portraits;
pub mod tracking;

// Re-export commonly used types
pub use controller::{BulkAction, CardSurface, Controller};
pub use filter::SearchFilter;
pub use portraits::{AssetLoader, ImageFormat, ImageStatus};
pub use tracking::TrackingStore;
