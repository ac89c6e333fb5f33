// Shuffle core - random sources, the permutation allocator and single picks
// Everything here is pure given the RandomSource handle passed in

pub mod allocator; // builds permutations of track indices
pub mod observer;  // optional debug sink for allocator progress
pub mod random;    // bounded random integer sources
pub mod selector;  // one-off random track pick

pub use allocator::{Permutation, ShuffleAllocator, ShuffleStrategy};
pub use observer::{NoopObserver, ShuffleEvent, ShuffleObserver, TracingObserver};
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use selector::RandomTrackSelector;

/// Position of a track inside a `TrackCollection`.
pub type TrackIndex = u32;
