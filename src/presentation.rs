//! Presentation seam
//!
//! The round controller never touches images or audio directly. It hands
//! rounds and cue sequences to a `PresentationSink` and waits for the sink
//! to report that a sequence finished playing.

use crate::round::Round;

/// Identifies one submitted cue sequence; echoed back on completion
pub type Ticket = u64;

/// A single audio cue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Pronunciation of a word
    Word(String),
    /// A success sound, by pool name
    Success(String),
    /// Introductory phrase of the failure explanation
    Intro,
    /// "Show me" phrase of the failure explanation
    ShowMe,
}

/// Receives everything the learner sees and hears
pub trait PresentationSink {
    /// Display the round's two words and arm its target audio
    fn show_round(&mut self, round: &Round);

    /// Play `cues` back-to-back, never overlapping, then report `ticket`
    /// back through `RoundController::feedback_finished`.
    fn play(&mut self, ticket: Ticket, cues: Vec<Cue>);

    /// A round that received answers is being discarded
    fn round_finished(&mut self, _category: Option<&str>, _round: &Round) {}
}

impl<S: PresentationSink + ?Sized> PresentationSink for Box<S> {
    fn show_round(&mut self, round: &Round) {
        (**self).show_round(round)
    }

    fn play(&mut self, ticket: Ticket, cues: Vec<Cue>) {
        (**self).play(ticket, cues)
    }

    fn round_finished(&mut self, category: Option<&str>, round: &Round) {
        (**self).round_finished(category, round)
    }
}
