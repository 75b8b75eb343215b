// ============================================================================
// CinemaDB Library
// ============================================================================

pub mod config;
pub mod core;
pub mod facade;
pub mod models;
pub mod scheduler;
pub mod storage;

// Re-export main types for convenience
pub use config::{CinemaConfig, MaintenanceRule, SchedulingConfig};
pub use core::{CinemaError, Result, Slot};
pub use facade::Cinema;
pub use scheduler::{Availability, available_auditoriums, check_availability};
pub use storage::{FileStore, MemoryStore, RecordStore};
