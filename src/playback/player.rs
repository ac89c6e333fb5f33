use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

use super::Player;
use crate::error::{OrganizerError, Result};

pub struct AudioPlayer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
    volume: f32, // 0.0 to 1.0
}

impl AudioPlayer {
    pub fn new(volume: f32) -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| OrganizerError::Playback(format!("no audio output device: {}", e)))?;

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}

impl Player for AudioPlayer {
    fn start(&mut self, file: &Path) -> Result<()> {
        self.stop()?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| OrganizerError::Playback(format!("failed to create sink: {}", e)))?;
        sink.set_volume(self.volume);

        let reader = File::open(file).map_err(|e| OrganizerError::io(file, e))?;
        let source = Decoder::new(BufReader::new(reader)).map_err(|e| {
            OrganizerError::Playback(format!(
                "failed to decode '{}': {}. This file may be corrupted or use an unsupported format.",
                file.display(),
                e
            ))
        })?;

        sink.append(source);
        self.sink = Some(sink);
        info!("Started playback of {}", file.display());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(sink) = self.sink.take() {
            sink.stop();
            info!("Stopped playback");
        }
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().map(|sink| sink.empty()).unwrap_or(true)
    }
}
