use tracing::debug;

use super::Player;
use crate::error::{OrganizerError, Result};
use crate::library::{Track, TrackCollection};
use crate::shuffle::{Permutation, TrackIndex};

/// Plays a collection in shuffle order, one track per `advance`.
///
/// Bound to the collection revision it was built from; any add/remove after
/// that makes the session stale and it refuses to continue.
#[derive(Debug, Clone)]
pub struct ShuffleSession {
    order: Permutation,
    cursor: usize,
    revision: u64,
}

impl ShuffleSession {
    pub fn new(order: Permutation, collection: &TrackCollection) -> Self {
        Self {
            order,
            cursor: 0,
            revision: collection.revision(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.order.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.order.len()
    }

    fn check_fresh(&self, collection: &TrackCollection) -> Result<()> {
        if collection.revision() != self.revision {
            return Err(OrganizerError::StaleShuffle {
                expected: self.revision,
                actual: collection.revision(),
            });
        }
        Ok(())
    }

    fn peek_index(&self, collection: &TrackCollection) -> Result<Option<TrackIndex>> {
        self.check_fresh(collection)?;
        Ok(self.order.get(self.cursor))
    }

    /// Start the next track on `player`. `Ok(None)` once every track played.
    ///
    /// The cursor only moves once `player.start` succeeds, so a failed start
    /// leaves the same track up next.
    pub fn advance<'c>(
        &mut self,
        collection: &'c TrackCollection,
        player: &mut dyn Player,
    ) -> Result<Option<&'c Track>> {
        let Some(index) = self.peek_index(collection)? else {
            debug!("Shuffle session exhausted");
            return Ok(None);
        };

        // fresh revision means the index is in range
        let Some(track) = collection.get(index) else {
            return Err(OrganizerError::IndexOutOfRange {
                index: i64::from(index),
                len: collection.len(),
            });
        };

        player.start(&track.file_path)?;
        self.cursor += 1;
        debug!(index, remaining = self.remaining(), "Advanced shuffle session");
        Ok(Some(track))
    }
}
