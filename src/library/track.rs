use id3::TagLike;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::filename::FilenameParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub title: String,
    pub file_path: PathBuf,
}

impl Track {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, file_path: PathBuf) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            file_path,
        }
    }

    /// Build a track from a file on disk.
    ///
    /// ID3 artist/title win when both are present, otherwise the file name
    /// is parsed. Tag read failures are not errors, most files just lack tags.
    pub fn from_path(file_path: PathBuf, parser: &FilenameParser) -> Self {
        if let Some((artist, title)) = read_id3(&file_path) {
            return Self::new(artist, title, file_path);
        }

        let stem = file_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let parsed = parser.parse_stem(stem);
        Self::new(parsed.artist, parsed.title, file_path)
    }

    /// Single-line description used by the listing commands.
    pub fn details(&self) -> String {
        format!(
            "{}: {}  (file: {})",
            self.artist,
            self.title,
            self.file_path.display()
        )
    }
}

fn read_id3(path: &Path) -> Option<(String, String)> {
    match id3::Tag::read_from_path(path) {
        Ok(tag) => {
            let artist = tag.artist()?.trim().to_string();
            let title = tag.title()?.trim().to_string();
            if artist.is_empty() || title.is_empty() {
                return None;
            }
            Some((artist, title))
        }
        Err(e) => {
            debug!("No usable ID3 tag in {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_file_uses_filename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Nina Simone - Sinnerman.mp3");
        std::fs::write(&path, b"not really audio").unwrap();

        let track = Track::from_path(path.clone(), &FilenameParser::new());
        assert_eq!(track.artist, "Nina Simone");
        assert_eq!(track.title, "Sinnerman");
        assert_eq!(track.file_path, path);
    }

    #[test]
    fn test_details_format() {
        let track = Track::new("Lead Belly", "Goodnight Irene", PathBuf::from("audio/irene.mp3"));
        assert_eq!(
            track.details(),
            "Lead Belly: Goodnight Irene  (file: audio/irene.mp3)"
        );
    }
}
