pub mod mock_sink;

use paires::{RoundController, Settings, SettingsStore};

pub use mock_sink::MockSink;

/// Controller over a recording sink with a fixed seed and success pool
pub fn controller(settings: Settings) -> RoundController<MockSink> {
    RoundController::new(SettingsStore::in_memory(settings), MockSink::new())
        .with_seed(2024)
        .with_success_pool(vec!["bravo".to_string(), "super".to_string()])
}

/// Finish whatever feedback is pending
pub fn drain(controller: &mut RoundController<MockSink>) {
    while let Some(ticket) = controller.sink_mut().take_pending() {
        controller.feedback_finished(ticket);
    }
}
