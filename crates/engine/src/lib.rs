//! # park-watch-engine
//!
//! Queue-condition classification for a campus shuttle park.
//!
//! ## Features
//!
//! - **Immutable snapshots**: observation series and fleet table are
//!   validated once at construction, then read-only for the session
//! - **Named threshold policies**: the residue-to-status mapping is data,
//!   not branching code, so historical variants coexist as configurations
//! - **Exact-match lookups**: tolerant of whitespace and letter case in
//!   user-typed time labels
//!
//! ## Example
//!
//! ```
//! use park_watch_engine::prelude::*;
//!
//! let slots = vec![
//!     QueueRecord::new("08:00", 130, 8),
//!     QueueRecord::new("08:15", 200, 15),
//!     QueueRecord::new("08:30", 178, 66),
//! ];
//! let fleet = vec![
//!     FleetRecord::new("Korope", 8),
//!     FleetRecord::new("Marcopolo", 60),
//! ];
//!
//! let engine = ParkConditionEngine::new(slots, fleet).unwrap();
//!
//! let report = engine.classify_latest();
//! assert_eq!(report.status, Status::Busy); // residue 66, standard policy
//!
//! let peak = engine.peak_inflow();
//! assert_eq!(peak.time.as_str(), "08:15");
//! assert_eq!(engine.total_capacity(), 68);
//! ```

pub mod engine;
pub mod identifiers;
pub mod models;

// Re-exports for convenience
pub mod prelude {
    pub use crate::engine::{ConditionReport, ParkConditionEngine, PeakInflow};
    pub use crate::identifiers::*;
    pub use crate::models::{policy::*, types::*};
}

pub use prelude::*;
