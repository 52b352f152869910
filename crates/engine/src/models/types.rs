//! Core data types for park observations and the vehicle fleet.

use chrono::{NaiveTime, Timelike};

use crate::identifiers::*;

// ============================================================================
// Raw Input Records
// ============================================================================

/// One raw queue observation as supplied by the caller (file, embedded
/// constant, network fetch). Counts are signed so malformed input is
/// representable and rejected during validation rather than silently wrapped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueRecord {
    pub label: String,
    pub inflow: i64,
    pub residue: i64,
}

impl QueueRecord {
    pub fn new(label: impl Into<String>, inflow: i64, residue: i64) -> Self {
        Self {
            label: label.into(),
            inflow,
            residue,
        }
    }
}

/// One raw fleet entry as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetRecord {
    pub name: String,
    pub capacity: i64,
}

impl FleetRecord {
    pub fn new(name: impl Into<String>, capacity: i64) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

// ============================================================================
// Validated Model
// ============================================================================

/// A single validated queue observation.
///
/// `minute_of_day` is the label parsed as `HH:MM`, kept so chronological
/// order checks never depend on lexicographic label order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSlot {
    pub label: SlotLabel,
    pub minute_of_day: u16,
    pub inflow: u32,
    pub residue: u32,
}

impl TimeSlot {
    /// Validate a raw record into a slot.
    ///
    /// Rejects labels that do not parse as `HH:MM` and negative counts.
    pub fn from_record(record: &QueueRecord) -> Result<Self> {
        let label = record.label.trim();
        if label.is_empty() {
            return Err(EngineError::InvalidData(
                "queue observation with empty time label".into(),
            ));
        }

        let time = NaiveTime::parse_from_str(label, "%H:%M").map_err(|_| {
            EngineError::InvalidData(format!(
                "time label \"{label}\" is not a valid HH:MM time"
            ))
        })?;
        let minute_of_day = (time.hour() * 60 + time.minute()) as u16;

        let inflow = non_negative_count(record.inflow, "inflow", label)?;
        let residue = non_negative_count(record.residue, "residue", label)?;

        Ok(Self {
            label: SlotLabel::new(label),
            minute_of_day,
            inflow,
            residue,
        })
    }
}

/// A validated vehicle class (passenger capacity per trip).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VehicleClass {
    pub id: VehicleClassId,
    pub capacity: u32,
}

impl VehicleClass {
    /// Validate a raw record into a vehicle class. Capacity must be positive.
    pub fn from_record(record: &FleetRecord) -> Result<Self> {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidData(
                "fleet entry with empty vehicle name".into(),
            ));
        }

        let capacity = u32::try_from(record.capacity).ok().filter(|c| *c > 0).ok_or_else(|| {
            EngineError::InvalidData(format!(
                "vehicle class \"{name}\" has non-positive capacity {}",
                record.capacity
            ))
        })?;

        Ok(Self {
            id: VehicleClassId::new(name),
            capacity,
        })
    }
}

fn non_negative_count(value: i64, field: &str, label: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        EngineError::InvalidData(format!(
            "slot \"{label}\" has negative {field} {value}"
        ))
    })
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed construction data. The caller should fail fast and not
    /// render at all.
    #[error("invalid park data: {0}")]
    InvalidData(String),

    /// Lookup key absent from the observation series. The caller may degrade
    /// to a "no data for this time" view.
    #[error("no observation recorded for \"{0}\"")]
    SlotNotFound(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_record() {
        let slot = TimeSlot::from_record(&QueueRecord::new("08:15", 200, 15)).unwrap();
        assert_eq!(slot.label.as_str(), "08:15");
        assert_eq!(slot.minute_of_day, 8 * 60 + 15);
        assert_eq!(slot.inflow, 200);
        assert_eq!(slot.residue, 15);
    }

    #[test]
    fn test_slot_label_is_trimmed() {
        let slot = TimeSlot::from_record(&QueueRecord::new("  09:30 ", 161, 150)).unwrap();
        assert_eq!(slot.label.as_str(), "09:30");
    }

    #[test]
    fn test_slot_rejects_bad_labels() {
        for label in ["99:99", "morning", "08:15:30", ""] {
            let err = TimeSlot::from_record(&QueueRecord::new(label, 10, 0)).unwrap_err();
            assert!(matches!(err, EngineError::InvalidData(_)), "label {label:?}");
        }
    }

    #[test]
    fn test_slot_rejects_negative_counts() {
        let err = TimeSlot::from_record(&QueueRecord::new("08:00", -1, 0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidData(_)));

        let err = TimeSlot::from_record(&QueueRecord::new("08:00", 10, -5)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidData(_)));
    }

    #[test]
    fn test_vehicle_class_from_record() {
        let class = VehicleClass::from_record(&FleetRecord::new("Marcopolo", 60)).unwrap();
        assert_eq!(class.id.as_str(), "Marcopolo");
        assert_eq!(class.capacity, 60);
    }

    #[test]
    fn test_vehicle_class_rejects_non_positive_capacity() {
        for capacity in [0, -8] {
            let err =
                VehicleClass::from_record(&FleetRecord::new("Korope", capacity)).unwrap_err();
            assert!(matches!(err, EngineError::InvalidData(_)));
        }
    }
}
