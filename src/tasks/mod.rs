//! Background Tasks Module
//!
//! Contains background tasks that run periodically for cache maintenance.
//!
//! # Tasks
//! - Retention Sweep: purges expired entries and over-age durable records at
//!   configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
