use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{OrganizerError, Result};

/// Source of bounded random integers.
///
/// Passed around as `&mut dyn RandomSource` so every draw is visible at the
/// call site and tests can swap in a scripted sequence.
pub trait RandomSource {
    /// Returns a value in `[0, bound)`. A `bound` of zero is rejected.
    fn next(&mut self, bound: u32) -> Result<u32>;
}

fn check_bound(bound: u32) -> Result<()> {
    if bound == 0 {
        return Err(OrganizerError::InvalidArgument { bound });
    }
    Ok(())
}

/// Draw from `rng` and reject values outside `[0, bound)`, so a misbehaving
/// source never turns into an out-of-range index.
pub(crate) fn draw_checked(rng: &mut dyn RandomSource, bound: u32) -> Result<u32> {
    let value = rng.next(bound)?;
    if value >= bound {
        return Err(OrganizerError::DrawOutOfRange { value, bound });
    }
    Ok(value)
}

/// Random source backed by `StdRng`.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible source: the same seed always yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for StdRandom {
    fn next(&mut self, bound: u32) -> Result<u32> {
        check_bound(bound)?;
        Ok(self.rng.gen_range(0..bound))
    }
}

/// Replays a fixed list of draws.
///
/// Each scripted value is reduced modulo the requested bound so a script
/// written for one bound stays in range for smaller ones. The script cycles
/// once exhausted; an empty script always yields zero.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    script: Vec<u32>,
    cursor: usize,
    draws: usize,
}

impl ScriptedRandom {
    pub fn new(script: Vec<u32>) -> Self {
        Self {
            script,
            cursor: 0,
            draws: 0,
        }
    }

    /// Number of successful draws so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedRandom {
    fn next(&mut self, bound: u32) -> Result<u32> {
        check_bound(bound)?;
        self.draws += 1;

        if self.script.is_empty() {
            return Ok(0);
        }

        let value = self.script[self.cursor % self.script.len()];
        self.cursor = (self.cursor + 1) % self.script.len();
        Ok(value % bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bound_is_invalid() {
        let mut rng = StdRandom::seeded(1);
        assert!(matches!(
            rng.next(0),
            Err(OrganizerError::InvalidArgument { bound: 0 })
        ));

        let mut scripted = ScriptedRandom::new(vec![3]);
        assert!(scripted.next(0).is_err());
        assert_eq!(scripted.draws(), 0);
    }

    #[test]
    fn std_random_stays_in_range() {
        let mut rng = StdRandom::seeded(42);
        for bound in 1..200 {
            let value = rng.next(bound).unwrap();
            assert!(value < bound);
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = StdRandom::seeded(7);
        let mut b = StdRandom::seeded(7);
        let left: Vec<u32> = (0..32).map(|_| a.next(1000).unwrap()).collect();
        let right: Vec<u32> = (0..32).map(|_| b.next(1000).unwrap()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn scripted_wraps_and_reduces() {
        let mut rng = ScriptedRandom::new(vec![2, 9]);
        assert_eq!(rng.next(5).unwrap(), 2);
        assert_eq!(rng.next(5).unwrap(), 4);
        assert_eq!(rng.next(5).unwrap(), 2);
        assert_eq!(rng.draws(), 3);
    }
}
