// src/config/attacks.rs
//
// The six basic attack sounds used as references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of reference clips; the scanner emits one column per clip
pub const REFERENCE_COUNT: usize = 6;

/// Basic attack sound effects, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attack {
    /// Light punch
    #[serde(rename = "LP")]
    LightPunch,
    /// Light kick
    #[serde(rename = "LK")]
    LightKick,
    /// Medium punch
    #[serde(rename = "MP")]
    MediumPunch,
    /// Medium kick
    #[serde(rename = "MK")]
    MediumKick,
    /// Heavy punch
    #[serde(rename = "HP")]
    HeavyPunch,
    /// Heavy kick
    #[serde(rename = "HK")]
    HeavyKick,
}

impl Attack {
    pub const ALL: [Attack; REFERENCE_COUNT] = [
        Attack::LightPunch,
        Attack::LightKick,
        Attack::MediumPunch,
        Attack::MediumKick,
        Attack::HeavyPunch,
        Attack::HeavyKick,
    ];

    /// Two-character code, also the file stem of the reference clip
    pub fn code(&self) -> &'static str {
        match self {
            Attack::LightPunch => "LP",
            Attack::LightKick => "LK",
            Attack::MediumPunch => "MP",
            Attack::MediumKick => "MK",
            Attack::HeavyPunch => "HP",
            Attack::HeavyKick => "HK",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Attack::LightPunch => "Light punch",
            Attack::LightKick => "Light kick",
            Attack::MediumPunch => "Medium punch",
            Attack::MediumKick => "Medium kick",
            Attack::HeavyPunch => "Heavy punch",
            Attack::HeavyKick => "Heavy kick",
        }
    }

    /// Column index in a covariance row
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Default file name of the reference clip
    pub fn file_name(&self) -> String {
        format!("{}.wav", self.code())
    }
}

impl fmt::Display for Attack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
