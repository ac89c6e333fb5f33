use std::fs;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

use super::filename::FilenameParser;
use super::track::Track;
use crate::error::{OrganizerError, Result};

/// Loads track records from a music folder.
pub struct TrackReader {
    parser: FilenameParser,
}

impl TrackReader {
    pub fn new() -> Self {
        Self {
            parser: FilenameParser::new(),
        }
    }

    /// Collect every file under `folder` whose extension matches `extension`
    /// (case-insensitive, leading dot optional). Results are sorted by path.
    pub fn read_tracks<P: AsRef<Path>>(&self, folder: P, extension: &str) -> Result<Vec<Track>> {
        let folder = folder.as_ref();
        let wanted = extension.trim_start_matches('.').to_lowercase();

        let meta = fs::metadata(folder).map_err(|e| OrganizerError::io(folder, e))?;
        if !meta.is_dir() {
            return Err(OrganizerError::io(
                folder,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(folder).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", folder.display(), e);
                    continue;
                }
            };
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }

            // Skip hidden files (dotfiles)
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with('.'))
            {
                continue;
            }

            let matches = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| ext.to_lowercase() == wanted);
            if !matches {
                continue;
            }

            if entry.metadata().map(|m| m.len() == 0).unwrap_or(true) {
                continue;
            }

            paths.push(path.to_path_buf());
        }

        paths.sort();
        let tracks: Vec<Track> = paths
            .into_iter()
            .map(|path| Track::from_path(path, &self.parser))
            .collect();

        info!("Read {} tracks from {}", tracks.len(), folder.display());
        Ok(tracks)
    }
}

impl Default for TrackReader {
    fn default() -> Self {
        Self::new()
    }
}
