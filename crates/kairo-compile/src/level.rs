//! Optimization levels.

use std::fmt;

use serde::Serialize;

use crate::error::{CompileError, CompileResult};

/// How aggressively a pipeline transforms a circuit.
///
/// Levels are totally ordered; a higher level never does less work than a
/// lower one.
///
/// | Level | Meaning |
/// |-------|---------|
/// | 0 | No optimization, only what the device requires |
/// | 1 | Light optimization |
/// | 2 | Heavy optimization |
/// | 3 | Heaviest optimization, including resynthesis |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum OptimizationLevel {
    /// Level 0.
    Level0,
    /// Level 1.
    Level1,
    /// Level 2.
    Level2,
    /// Level 3.
    Level3,
}

impl OptimizationLevel {
    /// Every level, lowest first.
    pub const ALL: [Self; 4] = [Self::Level0, Self::Level1, Self::Level2, Self::Level3];

    /// Numeric value of the level.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Level0 => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
        }
    }

    /// Parse a numeric level, failing with [`CompileError::InvalidLevel`].
    pub fn from_value(level: i64) -> CompileResult<Self> {
        match level {
            0 => Ok(Self::Level0),
            1 => Ok(Self::Level1),
            2 => Ok(Self::Level2),
            3 => Ok(Self::Level3),
            other => Err(CompileError::InvalidLevel(other)),
        }
    }
}

impl TryFrom<i64> for OptimizationLevel {
    type Error = CompileError;

    fn try_from(level: i64) -> CompileResult<Self> {
        Self::from_value(level)
    }
}

impl From<OptimizationLevel> for u8 {
    fn from(level: OptimizationLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
