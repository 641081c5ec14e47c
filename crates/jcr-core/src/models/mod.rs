//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::JcrConfig;
pub use record::{DocumentRecord, WorkOrderFields, FIELD_NAMES};
