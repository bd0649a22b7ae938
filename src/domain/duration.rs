use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// One of the five units a duration can be split into, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    pub const ALL: [DurationUnit; 5] = [
        DurationUnit::Microseconds,
        DurationUnit::Milliseconds,
        DurationUnit::Seconds,
        DurationUnit::Minutes,
        DurationUnit::Hours,
    ];

    pub const fn micros(self) -> u64 {
        match self {
            DurationUnit::Microseconds => 1,
            DurationUnit::Milliseconds => 1_000,
            DurationUnit::Seconds => 1_000_000,
            DurationUnit::Minutes => 60_000_000,
            DurationUnit::Hours => 3_600_000_000,
        }
    }

    /// Wraparound bound used when a coarser unit is also selected.
    pub const fn natural_max(self) -> u64 {
        match self {
            DurationUnit::Microseconds => 99_999,
            DurationUnit::Milliseconds => 999,
            DurationUnit::Seconds | DurationUnit::Minutes => 59,
            DurationUnit::Hours => u64::MAX,
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            DurationUnit::Microseconds => 0,
            DurationUnit::Milliseconds => 1,
            DurationUnit::Seconds => 2,
            DurationUnit::Minutes => 3,
            DurationUnit::Hours => 4,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.slot()
    }
}

/// Bit mask of selected [`DurationUnit`]s.
///
/// Bits outside [`DurationUnits::ALL`] never survive construction, including
/// deserialization.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct DurationUnits(u8);

impl DurationUnits {
    pub const NONE: Self = Self(0);
    pub const MICROSECONDS: Self = Self(DurationUnit::Microseconds.bit());
    pub const MILLISECONDS: Self = Self(DurationUnit::Milliseconds.bit());
    pub const SECONDS: Self = Self(DurationUnit::Seconds.bit());
    pub const MINUTES: Self = Self(DurationUnit::Minutes.bit());
    pub const HOURS: Self = Self(DurationUnit::Hours.bit());
    pub const ALL: Self = Self(0b1_1111);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, unit: DurationUnit) -> bool {
        self.0 & unit.bit() != 0
    }

    /// Selected units, finest first.
    pub fn ascending(self) -> impl DoubleEndedIterator<Item = DurationUnit> {
        DurationUnit::ALL
            .into_iter()
            .filter(move |unit| self.contains(*unit))
    }

    /// Selected units, coarsest first.
    pub fn descending(self) -> impl Iterator<Item = DurationUnit> {
        self.ascending().rev()
    }

    pub fn finest(self) -> Option<DurationUnit> {
        self.ascending().next()
    }

    pub fn coarsest(self) -> Option<DurationUnit> {
        self.descending().next()
    }
}

impl Default for DurationUnits {
    fn default() -> Self {
        Self::HOURS | Self::MINUTES | Self::SECONDS
    }
}

impl BitOr for DurationUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl From<u8> for DurationUnits {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<DurationUnit> for DurationUnits {
    fn from(unit: DurationUnit) -> Self {
        Self(unit.bit())
    }
}

impl fmt::Debug for DurationUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ascending()).finish()
    }
}
