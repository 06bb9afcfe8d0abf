//! Paires Library
//!
//! Core modules for the minimal-pairs listening trainer.

pub mod assets;
pub mod audio;
pub mod catalog;
pub mod commands;
pub mod controller;
pub mod error;
pub mod journal;
pub mod order;
pub mod presentation;
pub mod round;
pub mod settings;
pub mod terminal;

pub use catalog::{Catalog, Category, WordPair};
pub use controller::{AnswerReport, FeedbackKind, Phase, RoundController};
pub use error::{PairsError, PairsResult};
pub use presentation::{Cue, PresentationSink, Ticket};
pub use round::{Outcome, Round, SkipReason};
pub use settings::{Setting, Settings, SettingsStore};
