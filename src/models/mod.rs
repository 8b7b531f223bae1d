//! Data models for the survivor catalog and its rendered cards.
//!
//! Models are independent of UI and storage.

pub mod card;
pub mod catalog;

// Re-export all model types
pub use card::CardDescriptor;
pub use catalog::Catalog;
