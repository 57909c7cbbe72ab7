//! Test helper factories
//!
//! Builds dispatchers wired to in-memory backends with sensible defaults.
#![allow(dead_code)]

use crate::commands::{CommandDispatcher, DEFAULT_PREFIX};
use crate::comparisons::ActivationTable;
use crate::livesplit::mock::MockTimerClient;
use crate::music::MockMusicService;
use crate::notes::MockNotesService;
use std::sync::Arc;

/// Dispatcher with every default comparison inactive except "Personal Best",
/// nothing playing and no notes.
pub fn mock_dispatcher(timer: MockTimerClient) -> CommandDispatcher<MockTimerClient> {
    mock_dispatcher_with(
        ActivationTable::default(),
        timer,
        MockMusicService::new(),
        MockNotesService::empty(),
    )
}

pub fn mock_dispatcher_with(
    activation: ActivationTable,
    timer: MockTimerClient,
    music: MockMusicService,
    notes: MockNotesService,
) -> CommandDispatcher<MockTimerClient> {
    CommandDispatcher::new(
        DEFAULT_PREFIX,
        activation,
        timer,
        Arc::new(music),
        Arc::new(notes),
    )
}
