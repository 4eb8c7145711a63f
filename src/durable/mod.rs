//! Durable Store Module
//!
//! Best-effort, never-panicking persistence layer over a quota-limited
//! storage medium. Handles serialization, quota-exceeded recovery, and
//! corrupt-data recovery so upper layers only ever see values or absence.

mod store;

pub use store::DurableStore;
