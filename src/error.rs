// Error types shared across the organizer
// The binary wraps these in anyhow, library callers can match on them

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error("random bound must be greater than zero (got {bound})")]
    InvalidArgument { bound: u32 },

    #[error("random source returned {value}, outside [0, {bound})")]
    DrawOutOfRange { value: u32, bound: u32 },

    #[error("cannot pick a random track from an empty collection")]
    EmptyCollection,

    #[error("index {index} is out of range for {len} tracks")]
    IndexOutOfRange { index: i64, len: u32 },

    #[error("shuffle was built for collection revision {expected}, collection is now at {actual}")]
    StaleShuffle { expected: u64, actual: u64 },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("could not find config directory")]
    NoConfigDir,

    #[error("playback failed: {0}")]
    Playback(String),
}

impl OrganizerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrganizerError>;
