//! Workshop constants, enums, and the capacity-derived availability rule.
//!
//! A workshop's `state` is never chosen by a caller. It is recomputed from
//! `capacity` by [`derive_state`] immediately before every insert and update.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Entity / table names
// ---------------------------------------------------------------------------

/// Entity type key used by the schema catalog and the policy layer.
pub const ENTITY_TYPE: &str = "workshop";

/// Backing table for workshops.
pub const TABLE_NAME: &str = "talleres";

// ---------------------------------------------------------------------------
// Capacity limits
// ---------------------------------------------------------------------------

/// Smallest accepted capacity.
pub const MIN_CAPACITY: i64 = 1;

/// Largest accepted capacity.
pub const MAX_CAPACITY: i64 = 50;

/// A workshop at or above this capacity is `full`.
pub const FULL_CAPACITY_THRESHOLD: i32 = 50;

/// Maximum length (in characters) of short text fields such as name and site.
pub const MAX_TEXT_LEN: usize = 255;

// ---------------------------------------------------------------------------
// Shift
// ---------------------------------------------------------------------------

pub const SHIFT_MORNING: &str = "morning";
pub const SHIFT_AFTERNOON: &str = "afternoon";

/// Spanish spellings accepted on input (`mañana`, `tarde`).
pub const SHIFT_MORNING_ES: &str = "mañana";
pub const SHIFT_AFTERNOON_ES: &str = "tarde";

/// All valid shift values as stored.
pub const VALID_SHIFTS: &[&str] = &[SHIFT_MORNING, SHIFT_AFTERNOON];

/// Time-of-day block a workshop runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    #[serde(alias = "mañana")]
    Morning,
    #[serde(alias = "tarde")]
    Afternoon,
}

impl Shift {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => SHIFT_MORNING,
            Self::Afternoon => SHIFT_AFTERNOON,
        }
    }
}

/// Parses the stored value or one of the Spanish aliases.
impl FromStr for Shift {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SHIFT_MORNING | SHIFT_MORNING_ES => Ok(Self::Morning),
            SHIFT_AFTERNOON | SHIFT_AFTERNOON_ES => Ok(Self::Afternoon),
            other => Err(CoreError::Validation(format!(
                "Unknown shift '{other}'. Must be one of: {}",
                VALID_SHIFTS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Availability state
// ---------------------------------------------------------------------------

pub const STATE_AVAILABLE: &str = "available";
pub const STATE_FULL: &str = "full";

/// All valid availability states as stored.
pub const VALID_STATES: &[&str] = &[STATE_AVAILABLE, STATE_FULL];

/// Availability of a workshop, derived solely from its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkshopState {
    Available,
    Full,
}

impl WorkshopState {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => STATE_AVAILABLE,
            Self::Full => STATE_FULL,
        }
    }
}

impl FromStr for WorkshopState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATE_AVAILABLE => Ok(Self::Available),
            STATE_FULL => Ok(Self::Full),
            other => Err(CoreError::Validation(format!(
                "Unknown workshop state '{other}'. Must be one of: {}",
                VALID_STATES.join(", ")
            ))),
        }
    }
}

/// Compute the availability state for a capacity value.
///
/// Total over `i32`: anything at or above [`FULL_CAPACITY_THRESHOLD`] is
/// `Full`, everything else (including out-of-range values) is `Available`.
pub fn derive_state(capacity: i32) -> WorkshopState {
    if capacity >= FULL_CAPACITY_THRESHOLD {
        WorkshopState::Full
    } else {
        WorkshopState::Available
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
