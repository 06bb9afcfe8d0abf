//! Sound Engine for cue playback
//!
//! Uses a channel-based architecture to handle rodio's non-Send stream.
//! The engine spawns a dedicated audio thread that owns the playback
//! infrastructure. Sequences are played in submission order and each one
//! reports its ticket on the completion channel once its last cue ends.
//! A ticket is also reported when its sequence is dropped unplayed, so a
//! dead audio thread never leaves the caller waiting.

use crate::error::{PairsError, PairsResult};
use crate::presentation::Ticket;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

/// Reports its ticket exactly once, when dropped
struct Completion {
    ticket: Ticket,
    completions: UnboundedSender<Ticket>,
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.completions.send(self.ticket).is_err() {
            debug!("Completion receiver dropped");
        }
    }
}

/// Commands sent to the audio thread
enum AudioCommand {
    PlaySequence {
        completion: Completion,
        files: Vec<PathBuf>,
    },
    Stop,
}

/// Thread-safe handle to the sound engine
#[derive(Clone)]
pub struct SoundEngine {
    sender: mpsc::Sender<AudioCommand>,
    completions: UnboundedSender<Ticket>,
}

impl std::fmt::Debug for SoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundEngine").finish()
    }
}

impl SoundEngine {
    /// Spawn the audio thread. Finished tickets are sent on `completions`.
    pub fn new(completions: UnboundedSender<Ticket>) -> PairsResult<Self> {
        let (sender, receiver) = mpsc::channel::<AudioCommand>();

        thread::Builder::new()
            .name("paires-audio".to_string())
            .spawn(move || {
                Self::audio_thread(receiver);
            })
            .map_err(|e| PairsError::Audio(format!("Could not spawn audio thread: {}", e)))?;

        Ok(Self {
            sender,
            completions,
        })
    }

    fn audio_thread(receiver: mpsc::Receiver<AudioCommand>) {
        use rodio::OutputStream;

        // The stream must outlive the sink, so it stays on this thread
        let output = match OutputStream::try_default() {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("🔇 Failed to initialize audio output: {}", e);
                None
            }
        };
        let mut sink = output
            .as_ref()
            .and_then(|(_, handle)| match rodio::Sink::try_new(handle) {
                Ok(sink) => Some(sink),
                Err(e) => {
                    error!("❌ Failed to create audio sink: {}", e);
                    None
                }
            });

        info!("🔊 Audio thread started");

        while let Ok(cmd) = receiver.recv() {
            match cmd {
                AudioCommand::PlaySequence { completion, files } => {
                    let ticket = completion.ticket;
                    if let Some(sink) = sink.as_ref() {
                        debug!("🔊 Sequence {} ({} files)", ticket, files.len());
                        for file in &files {
                            if let Err(e) = Self::queue_file(sink, file) {
                                error!("❌ Audio playback failed for {:?}: {}", file, e);
                            }
                        }
                        // The sink plays its queue in order; wait here, off the caller's thread
                        sink.sleep_until_end();
                    } else {
                        debug!("🔇 No audio output, completing sequence {} silently", ticket);
                    }
                    drop(completion);
                }
                AudioCommand::Stop => {
                    info!("🛑 Stopping all playback");
                    if let (Some(current), Some((_, handle))) = (sink.as_ref(), output.as_ref()) {
                        current.stop();
                        // A stopped sink cannot be reused
                        if let Ok(new_sink) = rodio::Sink::try_new(handle) {
                            sink = Some(new_sink);
                        }
                    }
                }
            }
        }

        info!("🔇 Audio thread stopped");
    }

    fn queue_file(sink: &rodio::Sink, path: &Path) -> anyhow::Result<()> {
        use rodio::Decoder;
        use std::fs::File;
        use std::io::BufReader;

        if !path.exists() {
            anyhow::bail!("Audio file not found: {:?}", path);
        }

        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;
        sink.append(source);

        debug!("🔊 Queueing: {:?}", path.file_name().unwrap_or_default());
        Ok(())
    }

    /// Play `files` back-to-back; `ticket` is reported when the last one ends.
    /// On error the ticket has already been reported.
    pub fn play_sequence(&self, ticket: Ticket, files: Vec<PathBuf>) -> PairsResult<()> {
        let completion = Completion {
            ticket,
            completions: self.completions.clone(),
        };
        self.sender
            .send(AudioCommand::PlaySequence { completion, files })
            .map_err(|e| PairsError::Audio(format!("Audio thread disconnected: {}", e)))
    }

    /// Stop current playback and clear the queue
    pub fn stop(&self) -> PairsResult<()> {
        self.sender
            .send(AudioCommand::Stop)
            .map_err(|e| PairsError::Audio(format!("Audio thread disconnected: {}", e)))
    }

    /// Handle whose audio thread is already gone
    #[cfg(test)]
    pub(crate) fn disconnected(completions: UnboundedSender<Ticket>) -> Self {
        let (sender, _) = mpsc::channel::<AudioCommand>();
        Self {
            sender,
            completions,
        }
    }
}
