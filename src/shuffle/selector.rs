use super::random::{draw_checked, RandomSource};
use super::TrackIndex;
use crate::error::{OrganizerError, Result};

/// Single random pick out of `n` tracks. Consecutive picks may repeat.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTrackSelector;

impl RandomTrackSelector {
    pub fn pick(&self, n: u32, rng: &mut dyn RandomSource) -> Result<TrackIndex> {
        match n {
            0 => Err(OrganizerError::EmptyCollection),
            1 => Ok(0),
            _ => draw_checked(rng, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::random::{ScriptedRandom, StdRandom};

    #[test]
    fn single_track_is_always_zero() {
        let mut rng = ScriptedRandom::new(vec![4, 2]);
        assert_eq!(RandomTrackSelector.pick(1, &mut rng).unwrap(), 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn empty_collection_errors() {
        let mut rng = StdRandom::seeded(3);
        assert!(matches!(
            RandomTrackSelector.pick(0, &mut rng),
            Err(OrganizerError::EmptyCollection)
        ));
    }

    struct Overshoot;

    impl RandomSource for Overshoot {
        fn next(&mut self, bound: u32) -> Result<u32> {
            Ok(bound + 3)
        }
    }

    #[test]
    fn rejects_out_of_range_draw() {
        assert!(matches!(
            RandomTrackSelector.pick(4, &mut Overshoot),
            Err(OrganizerError::DrawOutOfRange { value: 7, bound: 4 })
        ));
    }

    #[test]
    fn passes_draw_through() {
        let mut rng = ScriptedRandom::new(vec![4, 2]);
        assert_eq!(RandomTrackSelector.pick(6, &mut rng).unwrap(), 4);
        assert_eq!(RandomTrackSelector.pick(6, &mut rng).unwrap(), 2);
        assert_eq!(rng.draws(), 2);
    }
}
