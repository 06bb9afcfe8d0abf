//! Terminal presentation sink
//!
//! Prints rounds to stdout, resolves cues to sound files and hands them
//! to the sound engine. Whenever nothing can be played the ticket is
//! completed right away so the controller never waits forever.

use crate::assets::AssetResolver;
use crate::audio::SoundEngine;
use crate::journal::Journal;
use crate::presentation::{Cue, PresentationSink, Ticket};
use crate::round::Round;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

pub struct TerminalSink {
    assets: AssetResolver,
    engine: Option<SoundEngine>,
    completions: UnboundedSender<Ticket>,
    journal: Option<Journal>,
}

impl TerminalSink {
    pub fn new(
        assets: AssetResolver,
        engine: Option<SoundEngine>,
        completions: UnboundedSender<Ticket>,
    ) -> Self {
        Self {
            assets,
            engine,
            completions,
            journal: None,
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn engine(&self) -> Option<&SoundEngine> {
        self.engine.as_ref()
    }

    /// Resolve cues to files, dropping the ones that are missing
    fn resolve(&self, cues: &[Cue]) -> Vec<PathBuf> {
        cues.iter()
            .filter_map(|cue| match self.assets.sound(cue) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("🔇 {:?} skipped: {}", cue, e);
                    None
                }
            })
            .collect()
    }

    fn complete(&self, ticket: Ticket) {
        if self.completions.send(ticket).is_err() {
            debug!("Completion receiver dropped");
        }
    }
}

impl PresentationSink for TerminalSink {
    fn show_round(&mut self, round: &Round) {
        let describe = |word: &str| {
            let image = self.assets.image(word);
            if image.is_placeholder {
                format!("{} (no picture)", word)
            } else {
                format!("{} [{}]", word, image.path.display())
            }
        };
        println!();
        println!("  1) {}", describe(round.word_a()));
        println!("  2) {}", describe(round.word_b()));
    }

    fn play(&mut self, ticket: Ticket, cues: Vec<Cue>) {
        let files = self.resolve(&cues);
        if files.is_empty() {
            self.complete(ticket);
            return;
        }
        match &self.engine {
            Some(engine) => {
                // A refused sequence has already reported its ticket
                if let Err(e) = engine.play_sequence(ticket, files) {
                    warn!("🔇 {}", e);
                }
            }
            None => self.complete(ticket),
        }
    }

    fn round_finished(&mut self, category: Option<&str>, round: &Round) {
        if let Some(journal) = &self.journal {
            if let Err(e) = journal.record(category, round) {
                warn!("⚠️ Could not write journal {:?}: {}", journal.path(), e);
            }
        }
    }
}
