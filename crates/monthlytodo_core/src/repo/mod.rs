//! Persistent store boundary.
//!
//! # Responsibility
//! - Define the whole-document persistence contract used by services.
//! - Isolate SQLite details from service/business orchestration.
//!
//! # Invariants
//! - Each storage key holds exactly one JSON document.
//! - There is no transactional guarantee across keys.

pub mod document_store;
pub mod memory_store;
pub mod sqlite_store;
