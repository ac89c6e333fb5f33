// Track library - records, folder loading and the collection itself

pub mod collection; // ordered track store
pub mod filename;   // artist/title guessing from file names
pub mod reader;     // folder walking
pub mod track;      // single track record

pub use collection::TrackCollection;
pub use reader::TrackReader;
pub use track::Track;

/// True iff `0 <= index < n`. Every index-taking operation checks through here.
pub fn is_valid(index: i64, n: u32) -> bool {
    index >= 0 && index < i64::from(n)
}
