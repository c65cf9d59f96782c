//! Modules layer - Infrastructure components behind the feature services
//!
//! Contains the persistent store backends and the image asset storage.

pub mod images;
pub mod store;
