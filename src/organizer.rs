// MusicOrganizer - owns the collection, the player and the RNG handle
// Every index-taking command goes through library::is_valid first

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{OrganizerError, Result};
use crate::library::{is_valid, Track, TrackCollection, TrackReader};
use crate::playback::{Player, ShuffleSession};
use crate::shuffle::{
    Permutation, RandomSource, RandomTrackSelector, ShuffleAllocator, TracingObserver,
};

pub struct MusicOrganizer {
    tracks: TrackCollection,
    player: Box<dyn Player>,
    rng: Box<dyn RandomSource>,
    allocator: ShuffleAllocator,
    selector: RandomTrackSelector,
    session: Option<ShuffleSession>,
}

impl MusicOrganizer {
    pub fn new(
        player: Box<dyn Player>,
        rng: Box<dyn RandomSource>,
        allocator: ShuffleAllocator,
    ) -> Self {
        Self {
            tracks: TrackCollection::new(),
            player,
            rng,
            allocator,
            selector: RandomTrackSelector,
            session: None,
        }
    }

    /// Organizer wired from config, with the library folder already read.
    pub fn from_config(config: &Config, player: Box<dyn Player>) -> Result<Self> {
        let mut organizer = Self::new(
            player,
            Box::new(config.shuffle.random_source()),
            config.shuffle.allocator(),
        );
        let folder = &config.library.directory;

        match organizer.load_library(folder, &config.library.extension) {
            Ok(loaded) => info!("Music library loaded. {} tracks.", loaded),
            Err(OrganizerError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!(
                    "Library folder {} not found, starting with an empty library",
                    folder.display()
                );
            }
            Err(e) => return Err(e),
        }

        Ok(organizer)
    }

    pub fn load_library(&mut self, folder: &Path, extension: &str) -> Result<usize> {
        let tracks = TrackReader::new().read_tracks(folder, extension)?;
        let count = tracks.len();
        self.tracks.extend(tracks);
        Ok(count)
    }

    pub fn tracks(&self) -> &TrackCollection {
        &self.tracks
    }

    pub fn number_of_tracks(&self) -> u32 {
        self.tracks.len()
    }

    pub fn add_file(&mut self, file_path: PathBuf) {
        self.tracks.add_file(file_path);
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.add_track(track);
    }

    /// Play the track at `index`. Invalid indices are logged and skipped.
    pub fn play_track(&mut self, index: i64) -> Result<Option<&Track>> {
        if !self.check_index(index) {
            return Ok(None);
        }

        let Some(track) = self.tracks.get(index as u32) else {
            return Ok(None);
        };
        self.player.start(&track.file_path)?;
        info!("Now playing: {} - {}", track.artist, track.title);
        Ok(Some(track))
    }

    pub fn play_first(&mut self) -> Result<Option<&Track>> {
        if self.tracks.is_empty() {
            return Ok(None);
        }
        self.play_track(0)
    }

    /// Play one track chosen at random. Repeats across calls are allowed.
    pub fn play_random(&mut self) -> Result<&Track> {
        let len = self.tracks.len();
        let index = i64::from(self.selector.pick(len, self.rng.as_mut())?);
        self.play_track(index)?
            .ok_or(OrganizerError::IndexOutOfRange { index, len })
    }

    pub fn stop_playing(&mut self) -> Result<()> {
        self.player.stop()
    }

    pub fn list_track(&self, index: i64) -> Option<String> {
        if !is_valid(index, self.tracks.len()) {
            return None;
        }
        self.tracks
            .get(index as u32)
            .map(|track| format!("Track {}: {}", index, track.details()))
    }

    pub fn list_all_tracks(&self) -> Vec<String> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(i, track)| format!("{} is {}", i, track.details()))
            .collect()
    }

    pub fn list_by_artist(&self, artist: &str) -> Vec<String> {
        self.tracks
            .tracks_by_artist(artist)
            .map(Track::details)
            .collect()
    }

    pub fn remove_track(&mut self, index: i64) -> Option<Track> {
        if !self.check_index(index) {
            return None;
        }
        self.tracks.remove(index)
    }

    /// Fresh permutation over the current collection.
    pub fn shuffle_order(&mut self) -> Result<Permutation> {
        self.allocator
            .generate_with(self.tracks.len(), self.rng.as_mut(), &mut TracingObserver)
    }

    /// Every track in a newly shuffled order.
    pub fn create_shuffled_list(&mut self) -> Result<Vec<&Track>> {
        let order = self.shuffle_order()?;
        Ok(order.iter().filter_map(|i| self.tracks.get(i)).collect())
    }

    /// Replace any running shuffle with a new one. Returns its length.
    pub fn start_shuffle(&mut self) -> Result<usize> {
        let order = self.shuffle_order()?;
        let len = order.len();
        self.session = Some(ShuffleSession::new(order, &self.tracks));
        info!(
            "Started {:?} shuffle over {} tracks",
            self.allocator.strategy(),
            len
        );
        Ok(len)
    }

    /// Play the next track of the running shuffle.
    ///
    /// `Ok(None)` when no shuffle is running or it has finished. A shuffle
    /// over a collection that changed since is dropped with `StaleShuffle`.
    pub fn play_next_shuffled(&mut self) -> Result<Option<&Track>> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };

        match session.advance(&self.tracks, self.player.as_mut()) {
            Ok(Some(track)) => {
                info!("Now playing: {} - {}", track.artist, track.title);
                Ok(Some(track))
            }
            Ok(None) => {
                self.session = None;
                Ok(None)
            }
            Err(e @ OrganizerError::StaleShuffle { .. }) => {
                warn!("Dropping shuffle: {}", e);
                self.session = None;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_playing(&self) -> bool {
        !self.player.is_finished()
    }

    pub fn has_active_shuffle(&self) -> bool {
        self.session.is_some()
    }

    fn check_index(&self, index: i64) -> bool {
        if is_valid(index, self.tracks.len()) {
            return true;
        }
        if index < 0 {
            warn!("Index cannot be negative: {}", index);
        } else {
            warn!("Index is too large: {}", index);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shuffle::{ScriptedRandom, ShuffleStrategy, StdRandom};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        started: Vec<PathBuf>,
        stops: usize,
    }

    struct SharedPlayer(Rc<RefCell<Log>>);

    impl Player for SharedPlayer {
        fn start(&mut self, file: &Path) -> Result<()> {
            self.0.borrow_mut().started.push(file.to_path_buf());
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.0.borrow_mut().stops += 1;
            Ok(())
        }
    }

    fn organizer(n: usize, rng: Box<dyn RandomSource>) -> (MusicOrganizer, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let mut organizer = MusicOrganizer::new(
            Box::new(SharedPlayer(log.clone())),
            rng,
            ShuffleAllocator::new(ShuffleStrategy::FillAndRepair),
        );
        for i in 0..n {
            organizer.add_track(Track::new(
                if i % 2 == 0 { "Odetta" } else { "Son House" },
                format!("Song {i}"),
                PathBuf::from(format!("audio/{i}.mp3")),
            ));
        }
        (organizer, log)
    }

    #[test]
    fn test_play_track_skips_invalid_index() {
        let (mut organizer, log) = organizer(3, Box::new(StdRandom::seeded(1)));

        assert!(organizer.play_track(-1).unwrap().is_none());
        assert!(organizer.play_track(3).unwrap().is_none());
        assert!(log.borrow().started.is_empty());

        let track = organizer.play_track(2).unwrap().unwrap();
        assert_eq!(track.title, "Song 2");
        assert_eq!(log.borrow().started, vec![PathBuf::from("audio/2.mp3")]);

        organizer.stop_playing().unwrap();
        assert_eq!(log.borrow().stops, 1);
    }

    #[test]
    fn test_play_random_single_track_plays_first() {
        let (mut organizer, log) = organizer(1, Box::new(ScriptedRandom::new(vec![7])));
        assert_eq!(organizer.play_random().unwrap().title, "Song 0");
        assert_eq!(log.borrow().started.len(), 1);
    }

    #[test]
    fn test_play_random_empty_collection() {
        let (mut organizer, _log) = organizer(0, Box::new(StdRandom::seeded(1)));
        assert!(matches!(
            organizer.play_random(),
            Err(OrganizerError::EmptyCollection)
        ));
        assert!(organizer.play_first().unwrap().is_none());
    }

    #[test]
    fn test_play_random_uses_draw() {
        let (mut organizer, _log) = organizer(5, Box::new(ScriptedRandom::new(vec![3])));
        assert_eq!(organizer.play_random().unwrap().title, "Song 3");
    }

    #[test]
    fn test_listing_and_filtering() {
        let (organizer, _log) = organizer(3, Box::new(StdRandom::seeded(1)));

        assert_eq!(
            organizer.list_track(1).unwrap(),
            "Track 1: Son House: Song 1  (file: audio/1.mp3)"
        );
        assert!(organizer.list_track(3).is_none());
        assert_eq!(organizer.list_all_tracks().len(), 3);
        assert!(organizer.list_all_tracks()[0].starts_with("0 is Odetta"));
        assert_eq!(organizer.list_by_artist("Odetta").len(), 2);
    }

    #[test]
    fn test_shuffled_list_covers_every_track() {
        let (mut organizer, _log) =
            organizer(5, Box::new(ScriptedRandom::new(vec![2, 2, 4, 4, 0])));
        let mut titles: Vec<String> = organizer
            .create_shuffled_list()
            .unwrap()
            .into_iter()
            .map(|t| t.title.clone())
            .collect();
        titles.sort();
        assert_eq!(titles, vec!["Song 0", "Song 1", "Song 2", "Song 3", "Song 4"]);
    }

    #[test]
    fn test_shuffle_session_runs_to_completion() {
        let (mut organizer, log) = organizer(4, Box::new(StdRandom::seeded(99)));
        assert_eq!(organizer.start_shuffle().unwrap(), 4);

        while organizer.play_next_shuffled().unwrap().is_some() {}

        assert!(!organizer.has_active_shuffle());
        let mut started = log.borrow().started.clone();
        started.sort();
        let expected: Vec<PathBuf> = (0..4).map(|i| PathBuf::from(format!("audio/{i}.mp3"))).collect();
        assert_eq!(started, expected);
    }

    #[test]
    fn test_removal_invalidates_shuffle() {
        let (mut organizer, _log) = organizer(4, Box::new(StdRandom::seeded(5)));
        organizer.start_shuffle().unwrap();
        organizer.play_next_shuffled().unwrap();

        assert!(organizer.remove_track(7).is_none());
        assert!(organizer.remove_track(0).is_some());

        assert!(matches!(
            organizer.play_next_shuffled(),
            Err(OrganizerError::StaleShuffle { .. })
        ));
        assert!(!organizer.has_active_shuffle());
        assert!(organizer.play_next_shuffled().unwrap().is_none());
    }

    #[test]
    fn test_from_config_missing_folder_is_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.library.directory = dir.path().join("audio");

        let log = Rc::new(RefCell::new(Log::default()));
        let mut organizer =
            MusicOrganizer::from_config(&config, Box::new(SharedPlayer(log))).unwrap();
        assert_eq!(organizer.number_of_tracks(), 0);
        assert!(organizer.play_first().unwrap().is_none());
        assert!(organizer.create_shuffled_list().unwrap().is_empty());
    }

    #[test]
    fn test_from_config_reads_library() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Odetta - Waterboy.mp3"), b"xx").unwrap();
        std::fs::write(dir.path().join("Son House - Grinnin.mp3"), b"yy").unwrap();

        let mut config = Config::default();
        config.library.directory = dir.path().to_path_buf();
        config.shuffle.seed = Some(3);

        let log = Rc::new(RefCell::new(Log::default()));
        let organizer =
            MusicOrganizer::from_config(&config, Box::new(SharedPlayer(log))).unwrap();
        assert_eq!(organizer.number_of_tracks(), 2);
        assert_eq!(organizer.tracks().get(0).unwrap().artist, "Odetta");
    }
}
