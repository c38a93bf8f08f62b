//! Domain layer: pure query/response shaping plus the service that drives
//! the repository port.

pub mod error;
pub mod language;
pub mod merge;
pub mod projection;
pub mod query;
pub mod repo;
pub mod service;
pub mod validation;
