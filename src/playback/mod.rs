// Playback dispatch - the Player seam plus the shuffle sequencer
// Decoding is never done here, players get a file reference and nothing else

#[cfg(feature = "audio")]
pub mod player;  // rodio-backed output
pub mod session; // walks a shuffle order

#[cfg(feature = "audio")]
pub use player::AudioPlayer;
pub use session::ShuffleSession;

use std::path::Path;
use tracing::info;

use crate::error::Result;

/// Anything that can start and stop playback of a file.
pub trait Player {
    fn start(&mut self, file: &Path) -> Result<()>;
    fn stop(&mut self) -> Result<()>;

    /// Players without a real output finish immediately.
    fn is_finished(&self) -> bool {
        true
    }
}

/// Player that only logs what it would do. Used when no audio device is
/// wanted (the `audio` feature is off, or dry runs from the CLI).
#[derive(Debug, Default)]
pub struct LogPlayer {
    current: Option<std::path::PathBuf>,
}

impl LogPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }
}

impl Player for LogPlayer {
    fn start(&mut self, file: &Path) -> Result<()> {
        info!("▶️  start {}", file.display());
        self.current = Some(file.to_path_buf());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(file) = self.current.take() {
            info!("⏹️  stop {}", file.display());
        }
        Ok(())
    }
}
