// Music organizer library - track collection plus a shuffle that always
// yields a true permutation of the collection

pub mod config;    // settings and preferences
pub mod error;     // shared error type
pub mod library;   // tracks, folder loading, the collection
pub mod organizer; // command surface tying it all together
pub mod playback;  // player seam and shuffle sequencing
pub mod shuffle;   // random sources, permutation allocator, single picks

// Export the stuff other modules actually use
pub use config::Config;
pub use error::{OrganizerError, Result};
pub use library::{is_valid, Track, TrackCollection, TrackReader};
pub use organizer::MusicOrganizer;
pub use playback::{LogPlayer, Player, ShuffleSession};
pub use shuffle::{
    Permutation, RandomSource, RandomTrackSelector, ScriptedRandom, ShuffleAllocator,
    ShuffleStrategy, StdRandom, TrackIndex,
};
