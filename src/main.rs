// organizer - command line front end for the music organizer
// Loads the library folder from config, runs one command, exits

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use music_organizer::{Config, LogPlayer, MusicOrganizer, Player};

#[derive(Parser)]
#[command(name = "organizer")]
#[command(about = "List, filter and shuffle a folder of audio tracks")]
struct Args {
    /// Config file to use instead of the user config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable developer logging (stderr instead of the log file)
    #[arg(long)]
    dev: bool,

    /// Only log playback instead of driving an audio device
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show every track with its index
    List,
    /// Show tracks whose artist contains NAME
    Artist { name: String },
    /// Print the library in a fresh shuffle order
    Shuffle {
        /// Play the shuffle instead of printing it
        #[arg(long)]
        play: bool,
    },
    /// Play the track at INDEX
    Play { index: i64 },
    /// Play one track chosen at random
    Random,
    /// Remove the track at INDEX from this session's collection
    Remove { index: i64 },
}

fn init_logging(dev: bool, filter: &str, log_dir: &Path) -> Result<()> {
    let base_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if dev {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_env_filter(base_filter)
            .init();
        eprintln!("🔧 Dev mode: debug output goes to stderr");
        return Ok(());
    }

    std::fs::create_dir_all(log_dir)?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(log_dir, "organizer.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(file_writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(base_filter)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // The writer must outlive main
    std::mem::forget(guard);

    Ok(())
}

fn build_player(dry_run: bool) -> Result<Box<dyn Player>> {
    if dry_run {
        debug!("Dry run: playback is logged only");
        return Ok(Box::new(LogPlayer::new()));
    }

    #[cfg(feature = "audio")]
    let player: Box<dyn Player> = Box::new(music_organizer::playback::AudioPlayer::new(0.7)?);

    #[cfg(not(feature = "audio"))]
    let player: Box<dyn Player> = {
        debug!("Built without the `audio` feature, playback is logged only");
        Box::new(LogPlayer::new())
    };

    Ok(player)
}

fn wait_for_playback(organizer: &MusicOrganizer) {
    while organizer.is_playing() {
        std::thread::sleep(Duration::from_millis(250));
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    init_logging(args.dev, &config.logging.filter, &config.logging.directory)?;
    info!("🎵 organizer starting up");

    let mut organizer = MusicOrganizer::from_config(&config, build_player(args.dry_run)?)?;
    println!("Music library loaded. {} tracks.", organizer.number_of_tracks());

    match args.command {
        Command::List => {
            println!("Track listing: ");
            for line in organizer.list_all_tracks() {
                println!("{}", line);
            }
        }
        Command::Artist { name } => {
            for line in organizer.list_by_artist(&name) {
                println!("{}", line);
            }
        }
        Command::Shuffle { play: false } => {
            for (slot, track) in organizer.create_shuffled_list()?.into_iter().enumerate() {
                println!("{} is {}", slot, track.details());
            }
        }
        Command::Shuffle { play: true } => {
            organizer.start_shuffle()?;
            loop {
                match organizer.play_next_shuffled()? {
                    Some(track) => println!("Now playing: {} - {}", track.artist, track.title),
                    None => break,
                }
                wait_for_playback(&organizer);
            }
        }
        Command::Play { index } => {
            match organizer.play_track(index)? {
                Some(track) => println!("Now playing: {} - {}", track.artist, track.title),
                None => println!("No track at index {}", index),
            }
            wait_for_playback(&organizer);
        }
        Command::Random => {
            let track = organizer.play_random()?;
            println!("Now playing: {} - {}", track.artist, track.title);
            wait_for_playback(&organizer);
        }
        Command::Remove { index } => match organizer.remove_track(index) {
            Some(track) => println!(
                "Removed {}, {} tracks left",
                track.details(),
                organizer.number_of_tracks()
            ),
            None => println!("No track at index {}", index),
        },
    }

    organizer.stop_playing()?;
    Ok(())
}
