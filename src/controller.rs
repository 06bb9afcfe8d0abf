//! Round Controller
//!
//! Owns the active round and the current pair list, scores answers and
//! advances through the list.
//!
//! States: no round, awaiting an answer, or playing mandatory feedback.
//! While feedback plays, every learner-initiated transition (answers, next,
//! restart, listen, selection) is refused until the sink reports the
//! feedback ticket back through [`RoundController::feedback_finished`].

use crate::catalog::{Catalog, WordPair};
use crate::error::{PairsError, PairsResult};
use crate::order::{pick_next_index, OrderMode};
use crate::presentation::{Cue, PresentationSink, Ticket};
use crate::round::{Outcome, Round, SkipReason};
use crate::settings::{Setting, Settings, SettingsStore};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Failure,
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoRoundActive,
    AwaitingAnswer,
    PlayingFeedback { ticket: Ticket, kind: FeedbackKind },
}

/// What happened on `submit_answer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReport {
    pub outcome: Outcome,
    /// The round as scored, before any advance replaced it
    pub answered: Option<Round>,
    /// Whether a new round was activated
    pub advanced: bool,
}

impl AnswerReport {
    fn skipped(reason: SkipReason) -> Self {
        Self {
            outcome: Outcome::Skipped(reason),
            answered: None,
            advanced: false,
        }
    }
}

/// The current category's pairs and the position of the active one
#[derive(Debug, Clone)]
struct Selection {
    label: String,
    pairs: Vec<WordPair>,
    index: usize,
}

pub struct RoundController<S: PresentationSink> {
    settings: SettingsStore,
    sink: S,
    rng: StdRng,
    success_pool: Vec<String>,
    selection: Option<Selection>,
    round: Option<Round>,
    phase: Phase,
    next_serial: u64,
    next_ticket: Ticket,
}

impl<S: PresentationSink> RoundController<S> {
    pub fn new(settings: SettingsStore, sink: S) -> Self {
        Self {
            settings,
            sink,
            rng: StdRng::from_entropy(),
            success_pool: Vec::new(),
            selection: None,
            round: None,
            phase: Phase::NoRoundActive,
            next_serial: 0,
            next_ticket: 0,
        }
    }

    /// Reproducible shuffles, targets and random order
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Names of interchangeable success cues
    pub fn with_success_pool(mut self, pool: Vec<String>) -> Self {
        self.success_pool = pool;
        self
    }

    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    /// Change a toggle and persist it
    pub fn update_setting(&mut self, setting: Setting, value: bool) -> PairsResult<()> {
        self.settings.set(setting, value)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn category(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.label.as_str())
    }

    pub fn pairs(&self) -> &[WordPair] {
        self.selection
            .as_ref()
            .map(|s| s.pairs.as_slice())
            .unwrap_or_default()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.selection.as_ref().map(|s| s.index)
    }

    /// Load a category's pairs and activate the first one
    pub fn select_category(&mut self, catalog: &Catalog, label: &str) -> PairsResult<&Round> {
        self.ensure_idle()?;
        let pairs = catalog.pairs_for(label)?.to_vec();
        let first = pairs
            .first()
            .cloned()
            .ok_or_else(|| PairsError::InvalidState(format!("category '{}' is empty", label)))?;

        info!("📂 Category '{}' ({} pairs)", label, pairs.len());
        self.discard_round();
        self.selection = Some(Selection {
            label: label.to_string(),
            pairs,
            index: 0,
        });
        Ok(self.activate(first))
    }

    /// Activate a pair picked from the current list
    pub fn select_pair(&mut self, index: usize) -> PairsResult<&Round> {
        self.ensure_idle()?;
        let selection = self.selection.as_mut().ok_or(PairsError::NoSelection)?;
        let pair = selection.pairs.get(index).cloned().ok_or_else(|| {
            PairsError::InvalidState(format!(
                "pair index {} out of range ({} pairs)",
                index,
                selection.pairs.len()
            ))
        })?;
        selection.index = index;
        Ok(self.activate(pair))
    }

    /// Start a fresh round on `pair`, replacing the active one
    pub fn activate(&mut self, pair: WordPair) -> &Round {
        self.start_round(pair, Vec::new())
    }

    /// Score an answer. A correct answer advances; an incorrect one
    /// explains the mistake and keeps the same round.
    pub fn submit_answer(&mut self, selected: &str) -> AnswerReport {
        if let Phase::PlayingFeedback { .. } = self.phase {
            debug!("Answer '{}' ignored: feedback in progress", selected);
            return AnswerReport::skipped(SkipReason::FeedbackInProgress);
        }
        let Some(round) = self.round.as_mut() else {
            debug!("Answer '{}' ignored: no active round", selected);
            return AnswerReport::skipped(SkipReason::NoActiveRound);
        };
        if !round.contains(selected) {
            debug!("Answer '{}' is not part of the round", selected);
            return AnswerReport::skipped(SkipReason::NotInRound);
        }

        let outcome = round.record(selected);
        let answered = round.clone();
        info!(
            "{} '{}' (target '{}', score {}/{})",
            if outcome == Outcome::Correct { "✅" } else { "❌" },
            selected,
            answered.target_word(),
            answered.score(),
            answered.attempts()
        );

        let advanced = match outcome {
            Outcome::Correct => self.on_correct(),
            _ => {
                let cues = vec![
                    Cue::Intro,
                    Cue::Word(selected.to_string()),
                    Cue::ShowMe,
                    Cue::Word(answered.target_word().to_string()),
                ];
                self.play(cues, Some(FeedbackKind::Failure));
                false
            }
        };

        AnswerReport {
            outcome,
            answered: Some(answered),
            advanced,
        }
    }

    /// Move to the next pair of the current list (the "next" control).
    ///
    /// Refused while feedback plays. On a single-pair list the active
    /// round is left untouched.
    pub fn advance(&mut self) -> PairsResult<&Round> {
        self.ensure_idle()?;
        if self.round.is_none() {
            return Err(PairsError::NoActiveRound);
        }
        match self.next_pair()? {
            Some((index, pair)) => {
                if let Some(selection) = self.selection.as_mut() {
                    selection.index = index;
                }
                Ok(self.activate(pair))
            }
            None => self.round.as_ref().ok_or(PairsError::NoActiveRound),
        }
    }

    /// Re-activate the current pair with a fresh shuffle and target
    pub fn restart(&mut self) -> PairsResult<&Round> {
        self.ensure_idle()?;
        let pair = self
            .round
            .as_ref()
            .map(|r| r.pair().clone())
            .ok_or(PairsError::NoActiveRound)?;
        Ok(self.activate(pair))
    }

    /// Replay the target word
    pub fn listen(&mut self) -> PairsResult<Ticket> {
        self.ensure_idle()?;
        let target = self
            .round
            .as_ref()
            .map(|r| r.target_word().to_string())
            .ok_or(PairsError::NoActiveRound)?;
        self.play(vec![Cue::Word(target)], None)
            .ok_or_else(|| PairsError::InvalidState("nothing to play".to_string()))
    }

    /// Completion event from the sink. Returns true when it ended the
    /// pending feedback; stale or non-feedback tickets are ignored.
    pub fn feedback_finished(&mut self, ticket: Ticket) -> bool {
        match self.phase {
            Phase::PlayingFeedback { ticket: pending, kind } if pending == ticket => {
                debug!("Feedback {:?} finished (ticket {})", kind, ticket);
                self.phase = if self.round.is_some() {
                    Phase::AwaitingAnswer
                } else {
                    Phase::NoRoundActive
                };
                true
            }
            _ => {
                debug!("Ignoring completion of ticket {}", ticket);
                false
            }
        }
    }

    /// Discard the active round and forget the pair list
    pub fn end_session(&mut self) {
        self.discard_round();
        self.selection = None;
        self.phase = Phase::NoRoundActive;
    }

    fn ensure_idle(&self) -> PairsResult<()> {
        match self.phase {
            Phase::PlayingFeedback { .. } => Err(PairsError::FeedbackInProgress),
            _ => Ok(()),
        }
    }

    fn on_correct(&mut self) -> bool {
        let lead: Vec<Cue> = if self.settings().success_sound {
            match self.success_pool.choose(&mut self.rng) {
                Some(name) => vec![Cue::Success(name.clone())],
                None => {
                    warn!("⚠️ Success sound enabled but the cue pool is empty");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        match self.next_pair() {
            Ok(Some((index, pair))) => {
                if let Some(selection) = self.selection.as_mut() {
                    selection.index = index;
                }
                self.start_round(pair, lead);
                true
            }
            Ok(None) | Err(_) => {
                self.play(lead, Some(FeedbackKind::Success));
                false
            }
        }
    }

    /// Next pair per the order policy, or None when the list has one pair
    fn next_pair(&mut self) -> PairsResult<Option<(usize, WordPair)>> {
        let selection = self.selection.as_ref().ok_or(PairsError::NoSelection)?;
        let mode = OrderMode::from_random_flag(self.settings.settings().random_order);
        let next = pick_next_index(selection.index, selection.pairs.len(), mode, &mut self.rng)?;
        if next == selection.index {
            debug!("Single pair in '{}', staying on it", selection.label);
            return Ok(None);
        }
        Ok(Some((next, selection.pairs[next].clone())))
    }

    /// Replace the active round. `lead` cues play before the new target;
    /// when present they are mandatory feedback and block input.
    fn start_round(&mut self, pair: WordPair, lead: Vec<Cue>) -> &Round {
        self.discard_round();

        let round = Round::new(self.next_serial, pair, &mut self.rng);
        self.next_serial += 1;
        info!("🎯 Round #{}: {} | {}", round.serial(), round.word_a(), round.word_b());
        debug!("Target: {}", round.target_word());

        self.sink.show_round(&round);
        let feedback = (!lead.is_empty()).then_some(FeedbackKind::Success);
        let mut cues = lead;
        if self.settings.settings().auto_listen {
            cues.push(Cue::Word(round.target_word().to_string()));
        }
        self.phase = Phase::AwaitingAnswer;
        self.play(cues, feedback);
        self.round.insert(round)
    }

    fn discard_round(&mut self) {
        if let Some(old) = self.round.take() {
            if old.attempts() > 0 {
                let label = self.selection.as_ref().map(|s| s.label.as_str());
                self.sink.round_finished(label, &old);
            }
        }
        self.phase = Phase::NoRoundActive;
    }

    fn play(&mut self, cues: Vec<Cue>, feedback: Option<FeedbackKind>) -> Option<Ticket> {
        if cues.is_empty() {
            return None;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        if let Some(kind) = feedback {
            self.phase = Phase::PlayingFeedback { ticket, kind };
        }
        self.sink.play(ticket, cues);
        Some(ticket)
    }
}
