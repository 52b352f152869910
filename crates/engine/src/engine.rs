//! The park condition engine: an immutable snapshot of one observation
//! session with pure classification and lookup queries.
//!
//! Construction is the only place invariants are checked; after it succeeds
//! the engine is read-only and safe to share across concurrent readers
//! without synchronization.

use std::collections::{HashMap, HashSet};

use crate::identifiers::*;
use crate::models::policy::{boarding_outlook, Status, StatusPolicy};
use crate::models::types::*;

// ============================================================================
// Query Results
// ============================================================================

/// Classification of one observation slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConditionReport {
    pub time: SlotLabel,
    pub residue: u32,
    pub status: Status,
    pub hint: &'static str,
    pub outlook: &'static str,
}

/// The observation with the highest inflow.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PeakInflow {
    pub time: SlotLabel,
    pub inflow: u32,
}

// ============================================================================
// Engine
// ============================================================================

/// Immutable queue-condition engine for one observation session.
#[derive(Clone, Debug)]
pub struct ParkConditionEngine {
    slots: Vec<TimeSlot>,
    slot_index: HashMap<String, usize>,
    fleet: Vec<VehicleClass>,
    policy: StatusPolicy,
}

impl ParkConditionEngine {
    /// Build an engine with the standard threshold policy.
    pub fn new(slots: Vec<QueueRecord>, fleet: Vec<FleetRecord>) -> Result<Self> {
        Self::with_policy(slots, fleet, StatusPolicy::standard())
    }

    /// Build an engine with an explicit threshold policy.
    ///
    /// Fails with `InvalidData` if the series is empty, any label does not
    /// parse as `HH:MM`, the series is not strictly increasing in time, any
    /// count is negative, fleet names repeat, or any capacity is
    /// non-positive.
    pub fn with_policy(
        slots: Vec<QueueRecord>,
        fleet: Vec<FleetRecord>,
        policy: StatusPolicy,
    ) -> Result<Self> {
        if slots.is_empty() {
            return Err(EngineError::InvalidData(
                "observation series is empty".into(),
            ));
        }

        let slots: Vec<TimeSlot> = slots
            .iter()
            .map(TimeSlot::from_record)
            .collect::<Result<_>>()?;

        // Storage order must equal chronological order; out-of-order input
        // is rejected rather than silently re-sorted.
        for pair in slots.windows(2) {
            if pair[1].minute_of_day <= pair[0].minute_of_day {
                return Err(EngineError::InvalidData(format!(
                    "slot \"{}\" is not after \"{}\", series must be strictly increasing in time",
                    pair[1].label, pair[0].label
                )));
            }
        }

        let mut slot_index = HashMap::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            if slot_index.insert(normalize_label(slot.label.as_str()), i).is_some() {
                return Err(EngineError::InvalidData(format!(
                    "duplicate time label \"{}\"",
                    slot.label
                )));
            }
        }

        let fleet: Vec<VehicleClass> = fleet
            .iter()
            .map(VehicleClass::from_record)
            .collect::<Result<_>>()?;

        let mut seen = HashSet::with_capacity(fleet.len());
        for class in &fleet {
            if !seen.insert(normalize_label(class.id.as_str())) {
                return Err(EngineError::InvalidData(format!(
                    "duplicate vehicle class \"{}\"",
                    class.id
                )));
            }
        }

        Ok(Self {
            slots,
            slot_index,
            fleet,
            policy,
        })
    }

    // ---- Classification ----

    /// Classify the most recent observation.
    pub fn classify_latest(&self) -> ConditionReport {
        // Construction rejects empty series, so a last slot always exists.
        let slot = &self.slots[self.slots.len() - 1];
        self.report_for(slot)
    }

    /// Classify the observation with the given time label.
    ///
    /// Matching is exact after trimming and ASCII case folding. Fails with
    /// `SlotNotFound` if no slot carries that label.
    pub fn classify_at(&self, label: &str) -> Result<ConditionReport> {
        let slot = self
            .slot_index
            .get(&normalize_label(label))
            .map(|&i| &self.slots[i])
            .ok_or_else(|| EngineError::SlotNotFound(label.trim().to_string()))?;

        Ok(self.report_for(slot))
    }

    /// The observation with the highest inflow. On ties the earliest slot
    /// wins (`Iterator::max_by` keeps the last maximum, so the scan is
    /// explicit).
    pub fn peak_inflow(&self) -> PeakInflow {
        let mut best = &self.slots[0];
        for slot in &self.slots[1..] {
            if slot.inflow > best.inflow {
                best = slot;
            }
        }

        PeakInflow {
            time: best.label.clone(),
            inflow: best.inflow,
        }
    }

    // ---- Series and Fleet ----

    /// All observations in chronological order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Vehicle classes in insertion order.
    pub fn fleet_summary(&self) -> &[VehicleClass] {
        &self.fleet
    }

    /// Total passenger capacity across the fleet.
    pub fn total_capacity(&self) -> u32 {
        self.fleet.iter().map(|class| class.capacity).sum()
    }

    /// The highest-capacity vehicle class, earliest entry winning ties.
    /// `None` for an empty fleet.
    pub fn max_capacity_class(&self) -> Option<&VehicleClass> {
        let mut best: Option<&VehicleClass> = None;
        for class in &self.fleet {
            if best.map_or(true, |b| class.capacity > b.capacity) {
                best = Some(class);
            }
        }
        best
    }

    fn report_for(&self, slot: &TimeSlot) -> ConditionReport {
        let (status, hint) = self.policy.classify(slot.residue);

        ConditionReport {
            time: slot.label.clone(),
            residue: slot.residue,
            status,
            hint,
            outlook: boarding_outlook(slot.residue),
        }
    }
}

fn normalize_label(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn morning_series() -> Vec<QueueRecord> {
        vec![
            QueueRecord::new("08:00", 130, 8),
            QueueRecord::new("08:15", 200, 15),
            QueueRecord::new("09:30", 161, 150),
            QueueRecord::new("09:45", 185, 210),
            QueueRecord::new("10:30", 252, 125),
        ]
    }

    fn campus_fleet() -> Vec<FleetRecord> {
        vec![
            FleetRecord::new("Korope", 8),
            FleetRecord::new("12-Seater", 12),
            FleetRecord::new("14-Seater", 14),
            FleetRecord::new("CNG Bus", 15),
            FleetRecord::new("18-Seater", 18),
            FleetRecord::new("Medium Bus", 25),
            FleetRecord::new("Marcopolo", 60),
        ]
    }

    fn engine() -> ParkConditionEngine {
        ParkConditionEngine::new(morning_series(), campus_fleet()).unwrap()
    }

    #[test]
    fn test_rejects_empty_series() {
        let err = ParkConditionEngine::new(vec![], campus_fleet()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidData(_)));
    }

    #[test]
    fn test_rejects_out_of_order_series() {
        let slots = vec![
            QueueRecord::new("09:00", 183, 105),
            QueueRecord::new("08:45", 192, 56),
        ];
        let err = ParkConditionEngine::new(slots, vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidData(_)));
    }

    #[test]
    fn test_rejects_duplicate_labels() {
        // Same minute of day even though the spellings differ
        let slots = vec![
            QueueRecord::new("08:15", 200, 15),
            QueueRecord::new(" 8:15", 178, 66),
        ];
        let err = ParkConditionEngine::new(slots, vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidData(_)));
    }

    #[test]
    fn test_rejects_negative_inflow() {
        let slots = vec![QueueRecord::new("08:00", -3, 0)];
        let err = ParkConditionEngine::new(slots, vec![]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidData(_)));
    }

    #[test]
    fn test_rejects_duplicate_vehicle_class() {
        let fleet = vec![
            FleetRecord::new("Korope", 8),
            FleetRecord::new("korope ", 8),
        ];
        let err = ParkConditionEngine::new(morning_series(), fleet).unwrap_err();
        assert!(matches!(err, EngineError::InvalidData(_)));
    }

    #[test]
    fn test_classify_latest_uses_last_slot() {
        let report = engine().classify_latest();

        assert_eq!(report.time.as_str(), "10:30");
        assert_eq!(report.residue, 125);
        // 50 < 125 <= 150 under the standard policy
        assert_eq!(report.status, Status::Busy);
        assert_eq!(report.outlook, "long queue, 30+ min wait");
    }

    #[test]
    fn test_classify_at_boundary_slot() {
        let report = engine().classify_at("09:30").unwrap();

        // 150 sits on the exclusive CRITICAL bound
        assert_eq!(report.status, Status::Busy);
        assert_eq!(report.residue, 150);
        assert_eq!(report.outlook, "long queue, 30+ min wait");
    }

    #[test]
    fn test_classify_at_is_idempotent_and_tolerant() {
        let engine = engine();

        let first = engine.classify_at("08:15").unwrap();
        let second = engine.classify_at("08:15").unwrap();
        assert_eq!(first, second);

        let padded = engine.classify_at("  08:15 ").unwrap();
        assert_eq!(first, padded);
        assert_eq!(padded.outlook, "fast boarding likely");
    }

    #[test]
    fn test_classify_at_unknown_label() {
        let err = engine().classify_at("99:99").unwrap_err();
        assert!(matches!(err, EngineError::SlotNotFound(label) if label == "99:99"));
    }

    #[test]
    fn test_legacy_policy_changes_labels_only() {
        let engine = ParkConditionEngine::with_policy(
            morning_series(),
            campus_fleet(),
            StatusPolicy::legacy(),
        )
        .unwrap();

        let report = engine.classify_at("08:00").unwrap();
        // residue 8: CLEAR under standard, MODERATE under legacy
        assert_eq!(report.status, Status::Moderate);
    }

    #[test]
    fn test_peak_inflow_prefers_earlier_on_tie() {
        let slots = vec![
            QueueRecord::new("08:00", 130, 8),
            QueueRecord::new("08:15", 273, 15),
            QueueRecord::new("08:30", 273, 66),
        ];
        let engine = ParkConditionEngine::new(slots, vec![]).unwrap();

        let peak = engine.peak_inflow();
        assert_eq!(peak.time.as_str(), "08:15");
        assert_eq!(peak.inflow, 273);
    }

    #[test]
    fn test_fleet_summary_order_and_totals() {
        let engine = engine();

        let summary = engine.fleet_summary();
        assert_eq!(summary.len(), 7);
        assert_eq!(summary[0].id.as_str(), "Korope");
        assert_eq!(summary[6].id.as_str(), "Marcopolo");

        assert_eq!(engine.total_capacity(), 152);
        assert_eq!(engine.max_capacity_class().unwrap().id.as_str(), "Marcopolo");
    }

    #[test]
    fn test_empty_fleet_is_allowed() {
        let engine = ParkConditionEngine::new(morning_series(), vec![]).unwrap();

        assert!(engine.fleet_summary().is_empty());
        assert_eq!(engine.total_capacity(), 0);
        assert!(engine.max_capacity_class().is_none());
    }
}
