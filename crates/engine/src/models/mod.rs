//! Park data models, types, and classification policies.

pub mod policy;
pub mod types;

// Re-exports for convenience
pub use policy::{boarding_outlook, PolicyBand, Status, StatusPolicy};
pub use types::{
    EngineError, FleetRecord, QueueRecord, Result, TimeSlot, VehicleClass,
};
