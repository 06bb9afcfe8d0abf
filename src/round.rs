//! Round: one presentation of a word pair to the learner

use crate::catalog::WordPair;
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of a submitted answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    Skipped(SkipReason),
}

/// Why an answer was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoActiveRound,
    FeedbackInProgress,
    /// The selected word is neither of the round's two words
    NotInRound,
}

/// An active round. Only the two counters change after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    serial: u64,
    pair: WordPair,
    word_a: String,
    word_b: String,
    target_word: String,
    score: u32,
    attempts: u32,
}

impl Round {
    /// Shuffle the pair's words and draw the target uniformly from them
    pub fn new<R: Rng + ?Sized>(serial: u64, pair: WordPair, rng: &mut R) -> Self {
        let mut words = [pair.word1.clone(), pair.word2.clone()];
        words.shuffle(rng);
        let target_word = words[rng.gen_range(0..2)].clone();
        let [word_a, word_b] = words;
        Self {
            serial,
            pair,
            word_a,
            word_b,
            target_word,
            score: 0,
            attempts: 0,
        }
    }

    /// Activation counter, unique per controller
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn pair(&self) -> &WordPair {
        &self.pair
    }

    pub fn word_a(&self) -> &str {
        &self.word_a
    }

    pub fn word_b(&self) -> &str {
        &self.word_b
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn contains(&self, word: &str) -> bool {
        self.word_a == word || self.word_b == word
    }

    /// Count one submission and report whether it hit the target
    pub(crate) fn record(&mut self, selected: &str) -> Outcome {
        self.attempts += 1;
        if selected == self.target_word {
            self.score += 1;
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}
