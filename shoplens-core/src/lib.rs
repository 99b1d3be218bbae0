//! SHOPLENS Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types - no aggregation or synthesis logic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod config;
pub mod error;
pub mod intent;
pub mod plan;
pub mod records;
pub mod response;
pub mod rows;

pub use config::*;
pub use error::*;
pub use intent::*;
pub use plan::*;
pub use records::*;
pub use response::*;
pub use rows::*;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Request identifier using UUIDv7 for timestamp-sortable IDs.
pub type RequestId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 RequestId (timestamp-sortable).
pub fn new_request_id() -> RequestId {
    Uuid::now_v7()
}
