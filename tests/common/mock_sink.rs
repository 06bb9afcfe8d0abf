//! Mock Presentation Sink for Testing
//!
//! Records every round shown and every cue sequence requested.

use paires::{Cue, PresentationSink, Round, Ticket};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct MockSink {
    /// Rounds in the order they were shown
    pub shown: Vec<Round>,
    /// Every (ticket, cues) sequence requested
    pub played: Vec<(Ticket, Vec<Cue>)>,
    /// Discarded rounds that received answers
    pub finished: Vec<(Option<String>, Round)>,
    /// Tickets not yet reported back
    pending: VecDeque<Ticket>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_cues(&self) -> Option<&[Cue]> {
        self.played.last().map(|(_, cues)| cues.as_slice())
    }

    /// Pop the oldest unreported ticket, as if its playback ended
    pub fn take_pending(&mut self) -> Option<Ticket> {
        self.pending.pop_front()
    }
}

impl PresentationSink for MockSink {
    fn show_round(&mut self, round: &Round) {
        self.shown.push(round.clone());
    }

    fn play(&mut self, ticket: Ticket, cues: Vec<Cue>) {
        self.pending.push_back(ticket);
        self.played.push((ticket, cues));
    }

    fn round_finished(&mut self, category: Option<&str>, round: &Round) {
        self.finished.push((category.map(String::from), round.clone()));
    }
}
