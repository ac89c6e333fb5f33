use serde::{Deserialize, Serialize};

use super::observer::{NoopObserver, ShuffleEvent, ShuffleObserver};
use super::random::{draw_checked, RandomSource};
use super::TrackIndex;
use crate::error::Result;

/// How the allocator turns random draws into an ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleStrategy {
    /// Shrinking pool, swap the chosen index to the pool boundary.
    /// `n - 1` draws, linear time.
    #[default]
    DrawWithoutReplacement,
    /// `n` independent draws, then duplicate slots are bumped forward
    /// (mod `n`) onto values nobody claimed.
    FillAndRepair,
}

/// An ordering of every track index in `[0, n)`, each exactly once.
///
/// Only the allocator builds these, so holding one means the bijection
/// already holds. When the collection changes, request a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    order: Vec<TrackIndex>,
}

impl Permutation {
    fn from_order(order: Vec<TrackIndex>) -> Self {
        debug_assert!(is_bijective(&order), "allocator produced a non-permutation");
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Track index stored at `slot`.
    pub fn get(&self, slot: usize) -> Option<TrackIndex> {
        self.order.get(slot).copied()
    }

    pub fn as_slice(&self) -> &[TrackIndex] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = TrackIndex> + '_ {
        self.order.iter().copied()
    }

    pub fn is_bijective(&self) -> bool {
        is_bijective(&self.order)
    }
}

impl IntoIterator for Permutation {
    type Item = TrackIndex;
    type IntoIter = std::vec::IntoIter<TrackIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl<'a> IntoIterator for &'a Permutation {
    type Item = &'a TrackIndex;
    type IntoIter = std::slice::Iter<'a, TrackIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// True when `order` holds every value of `[0, order.len())` exactly once.
pub fn is_bijective(order: &[TrackIndex]) -> bool {
    let mut seen = vec![false; order.len()];
    for &value in order {
        match seen.get_mut(value as usize) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShuffleAllocator {
    strategy: ShuffleStrategy,
}

impl ShuffleAllocator {
    pub fn new(strategy: ShuffleStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ShuffleStrategy {
        self.strategy
    }

    /// Build a permutation of `[0, n)`.
    ///
    /// `n == 0` and `n == 1` never touch `rng`.
    pub fn generate(&self, n: u32, rng: &mut dyn RandomSource) -> Result<Permutation> {
        self.generate_with(n, rng, &mut NoopObserver)
    }

    /// Same as [`generate`](Self::generate), reporting progress to `observer`.
    pub fn generate_with(
        &self,
        n: u32,
        rng: &mut dyn RandomSource,
        observer: &mut dyn ShuffleObserver,
    ) -> Result<Permutation> {
        let order = match n {
            0 => Vec::new(),
            1 => vec![0],
            _ => match self.strategy {
                ShuffleStrategy::DrawWithoutReplacement => draw_from_pool(n, rng, observer)?,
                ShuffleStrategy::FillAndRepair => fill_and_repair(n, rng, observer)?,
            },
        };

        observer.on_event(ShuffleEvent::Completed { len: n });
        Ok(Permutation::from_order(order))
    }
}

fn draw_from_pool(
    n: u32,
    rng: &mut dyn RandomSource,
    observer: &mut dyn ShuffleObserver,
) -> Result<Vec<TrackIndex>> {
    let mut pool: Vec<TrackIndex> = (0..n).collect();

    // pool[..slot] is settled, pool[slot..] is what's left to choose from
    for slot in 0..n - 1 {
        let offset = draw_checked(rng, n - slot)?;
        pool.swap(slot as usize, (slot + offset) as usize);
        observer.on_event(ShuffleEvent::Drawn {
            slot,
            index: pool[slot as usize],
        });
    }

    Ok(pool)
}

fn fill_and_repair(
    n: u32,
    rng: &mut dyn RandomSource,
    observer: &mut dyn ShuffleObserver,
) -> Result<Vec<TrackIndex>> {
    let mut slots = Vec::with_capacity(n as usize);
    for _ in 0..n {
        slots.push(draw_checked(rng, n)?);
    }
    observer.on_event(ShuffleEvent::Filled { draws: &slots });

    // First slot holding a value owns it. Canonical slots are never touched.
    let mut claimed = vec![false; n as usize];
    let mut duplicates = Vec::new();
    for (slot, &value) in slots.iter().enumerate() {
        if claimed[value as usize] {
            duplicates.push(slot);
        } else {
            claimed[value as usize] = true;
        }
    }

    // One unclaimed value exists per duplicate, so each walk ends within n steps.
    for slot in duplicates {
        let from = slots[slot];
        let mut value = from;
        loop {
            value = (value + 1) % n;
            if !claimed[value as usize] {
                break;
            }
        }
        claimed[value as usize] = true;
        slots[slot] = value;
        observer.on_event(ShuffleEvent::Repaired {
            slot: slot as u32,
            from,
            to: value,
        });
    }

    Ok(slots)
}
