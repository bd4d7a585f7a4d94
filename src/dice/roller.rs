use rand::{Rng, SeedableRng, rngs::StdRng, rngs::ThreadRng};

use crate::{
    dice::request::{DieType, RollRequest},
    foundation::error::{DiceError, DiceResult},
};

/// Capability that draws one face value for a die.
///
/// Passing the source in explicitly keeps the generator free of global state and lets tests
/// force exact rolls with [`FixedRolls`].
pub trait RollSource {
    fn roll(&mut self, die: DieType) -> u32;
}

/// [`RollSource`] backed by any `rand` generator, drawing uniformly from `1..=sides`.
#[derive(Clone, Debug)]
pub struct RngRollSource<R> {
    rng: R,
}

impl<R: Rng> RngRollSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRollSource<ThreadRng> {
    /// Source backed by the thread-local generator; fresh, unpredictable values every call.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngRollSource<StdRng> {
    /// Reproducible source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RollSource for RngRollSource<R> {
    fn roll(&mut self, die: DieType) -> u32 {
        self.rng.gen_range(1..=die.sides())
    }
}

/// Replays a fixed sequence of values, cycling when exhausted.
///
/// Values are returned as given; the generator rejects any that do not fit the die. An empty
/// sequence rolls the die's highest face every time.
#[derive(Clone, Debug)]
pub struct FixedRolls {
    values: Vec<u32>,
    next: usize,
}

impl FixedRolls {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            next: 0,
        }
    }
}

impl RollSource for FixedRolls {
    fn roll(&mut self, die: DieType) -> u32 {
        if self.values.is_empty() {
            return die.sides();
        }
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}

/// Draw `request.count()` independent values for `request.die()`, in roll order.
pub fn generate(request: &RollRequest, source: &mut dyn RollSource) -> DiceResult<Vec<u32>> {
    let die = request.die();
    (0..request.count())
        .map(|_| {
            let value = source.roll(die);
            if die.contains(value) {
                Ok(value)
            } else {
                Err(DiceError::RollOutOfRange { die, value })
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/dice/roller.rs"]
mod tests;
