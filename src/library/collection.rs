use std::path::PathBuf;
use tracing::info;

use super::filename::FilenameParser;
use super::is_valid;
use super::track::Track;
use crate::shuffle::TrackIndex;

/// Ordered, index-addressable store of tracks.
///
/// `revision` moves forward on every mutation so anything derived from the
/// current contents (a shuffle order, say) can tell when it went stale.
#[derive(Debug, Default, Clone)]
pub struct TrackCollection {
    tracks: Vec<Track>,
    revision: u64,
}

impl TrackCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            revision: 0,
        }
    }

    /// Add a track built from `file_path` alone.
    pub fn add_file(&mut self, file_path: PathBuf) {
        let track = Track::from_path(file_path, &FilenameParser::new());
        self.add_track(track);
    }

    pub fn add_track(&mut self, track: Track) {
        info!("Added track '{}'", track.details());
        self.tracks.push(track);
        self.revision += 1;
    }

    pub fn extend<I: IntoIterator<Item = Track>>(&mut self, tracks: I) {
        let before = self.tracks.len();
        self.tracks.extend(tracks);
        if self.tracks.len() != before {
            self.revision += 1;
        }
    }

    /// Number of tracks, saturating at `u32::MAX`.
    pub fn len(&self) -> u32 {
        u32::try_from(self.tracks.len()).unwrap_or(u32::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, index: TrackIndex) -> Option<&Track> {
        self.tracks.get(index as usize)
    }

    pub fn first(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Tracks whose artist contains `artist` (case-sensitive substring).
    pub fn tracks_by_artist<'a>(&'a self, artist: &'a str) -> impl Iterator<Item = &'a Track> + 'a {
        self.tracks.iter().filter(move |t| t.artist.contains(artist))
    }

    /// Remove and return the track at `index`; invalid indices leave the
    /// collection untouched.
    pub fn remove(&mut self, index: i64) -> Option<Track> {
        if !is_valid(index, self.len()) {
            return None;
        }
        let track = self.tracks.remove(index as usize);
        self.revision += 1;
        info!("Removed track '{}'", track.details());
        Some(track)
    }
}
