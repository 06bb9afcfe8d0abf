//! Audio output for cue playback

pub mod engine;

pub use engine::SoundEngine;
