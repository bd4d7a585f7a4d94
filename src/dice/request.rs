use std::fmt;

use crate::foundation::error::{DiceError, DiceResult};

/// Largest number of dice a single request may roll.
pub const MAX_ROLL_COUNT: u8 = 4;

/// Polyhedral die, identified by its face count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DieType {
    D2,
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
}

impl DieType {
    /// Every supported die, smallest first.
    pub const ALL: [DieType; 7] = [
        DieType::D2,
        DieType::D4,
        DieType::D6,
        DieType::D8,
        DieType::D10,
        DieType::D12,
        DieType::D20,
    ];

    /// Face count, which is also the highest value the die can show.
    pub const fn sides(self) -> u32 {
        match self {
            DieType::D2 => 2,
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
        }
    }

    pub fn from_sides(sides: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|d| i64::from(d.sides()) == sides)
    }

    pub fn contains(self, face: u32) -> bool {
        (1..=self.sides()).contains(&face)
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.sides())
    }
}

/// A validated roll: which die, and how many times to roll it.
///
/// Only [`validate`] constructs this type, so holding one means both fields are in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RollRequest {
    die: DieType,
    count: u8,
}

impl RollRequest {
    pub fn die(&self) -> DieType {
        self.die
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    /// Header drawn above the dice, e.g. `Roll 3D6`.
    pub fn header_text(&self) -> String {
        format!("Roll {}{}", self.count, self.die)
    }
}

/// Check a raw `(die type, roll count)` pair and build a [`RollRequest`].
///
/// The die type is checked first, so a request that is wrong on both counts reports
/// [`DiceError::InvalidDieType`].
pub fn validate(die_type: i64, roll_count: i64) -> DiceResult<RollRequest> {
    let die = DieType::from_sides(die_type).ok_or(DiceError::InvalidDieType(die_type))?;
    if !(1..=i64::from(MAX_ROLL_COUNT)).contains(&roll_count) {
        return Err(DiceError::InvalidRollCount(roll_count));
    }
    let count = u8::try_from(roll_count).map_err(|_| DiceError::InvalidRollCount(roll_count))?;
    Ok(RollRequest { die, count })
}

/// Footer drawn below the dice, e.g. `Total: 11`.
pub fn footer_text(rolls: &[u32]) -> String {
    format!("Total: {}", total(rolls))
}

pub fn total(rolls: &[u32]) -> u64 {
    rolls.iter().map(|&v| u64::from(v)).sum()
}

/// Parse the `XdY` notation used by chat commands (`3d6`, `1D20`) into raw numbers.
///
/// Only the notation is checked here; the numbers still go through [`validate`].
pub fn parse_notation(s: &str) -> Option<(i64, i64)> {
    let upper = s.trim().to_ascii_uppercase();
    let (count, sides) = upper.split_once('D')?;
    let count = if count.is_empty() { 1 } else { count.parse().ok()? };
    let sides = sides.parse().ok()?;
    Some((sides, count))
}

#[cfg(test)]
#[path = "../../tests/unit/dice/request.rs"]
mod tests;
