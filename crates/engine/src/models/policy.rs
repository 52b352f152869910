//! Residue-to-status threshold policies.
//!
//! The mapping from queue residue to an operational status is data, not
//! branching code: an ordered list of bands evaluated top-down. Historical
//! dashboard variants with divergent boundaries become named configurations
//! of the same policy type instead of copy-pasted drift.

use std::fmt;

/// Coarse operational status derived from queue residue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Status {
    Critical,
    Busy,
    Moderate,
    Clear,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Critical => "CRITICAL",
            Status::Busy => "BUSY",
            Status::Moderate => "MODERATE",
            Status::Clear => "CLEAR",
        };
        write!(f, "{s}")
    }
}

/// One policy band: residues strictly above `above` map to `status`.
#[derive(Clone, Copy, Debug)]
pub struct PolicyBand {
    pub above: u32,
    pub status: Status,
    pub hint: &'static str,
}

/// An ordered residue-threshold policy.
///
/// Bands are evaluated from the highest bound down; the first band whose
/// bound the residue exceeds wins, and residues at or below every bound fall
/// through to the fallback.
#[derive(Clone, Debug)]
pub struct StatusPolicy {
    bands: Vec<PolicyBand>,
    fallback: (Status, &'static str),
}

impl StatusPolicy {
    /// Build a policy from bands and a fallback. Bands are sorted by bound so
    /// evaluation order never depends on declaration order.
    pub fn new(mut bands: Vec<PolicyBand>, fallback: (Status, &'static str)) -> Self {
        bands.sort_by(|a, b| b.above.cmp(&a.above));
        Self { bands, fallback }
    }

    /// The current three-tier policy: CRITICAL above 150, BUSY above 50,
    /// CLEAR otherwise.
    pub fn standard() -> Self {
        Self::new(
            vec![
                PolicyBand {
                    above: 150,
                    status: Status::Critical,
                    hint: "Queue overwhelmed, consider alternative transport or arriving earlier",
                },
                PolicyBand {
                    above: 50,
                    status: Status::Busy,
                    hint: "Expect delays, vehicles are filling as fast as they load",
                },
            ],
            (Status::Clear, "Little to no backlog, board on arrival"),
        )
    }

    /// The earlier three-tier variant: CRITICAL above 150, BUSY above 70,
    /// MODERATE otherwise.
    pub fn legacy() -> Self {
        Self::new(
            vec![
                PolicyBand {
                    above: 150,
                    status: Status::Critical,
                    hint: "Severe backlog, seek alternative transport",
                },
                PolicyBand {
                    above: 70,
                    status: Status::Busy,
                    hint: "Steady queue, allow extra travel time",
                },
            ],
            (Status::Moderate, "Manageable queue, short waits expected"),
        )
    }

    /// Classify a residue into a status and its display hint.
    pub fn classify(&self, residue: u32) -> (Status, &'static str) {
        self.bands
            .iter()
            .find(|band| residue > band.above)
            .map(|band| (band.status, band.hint))
            .unwrap_or(self.fallback)
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Coarse wait-time outlook for a residue level.
///
/// Independent of the status policy and deliberately coarser: a single fixed
/// boundary at 100 people.
pub fn boarding_outlook(residue: u32) -> &'static str {
    if residue > 100 {
        "long queue, 30+ min wait"
    } else {
        "fast boarding likely"
    }
}
