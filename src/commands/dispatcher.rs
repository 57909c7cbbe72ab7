//! Routes parsed chat commands to their handlers.

use super::parser::{BotCommand, Command, CommandError, SpotifyAction};
use super::{splits, spotify, thoughts};
use crate::comparisons::ActivationTable;
use crate::livesplit::{LiveSplitClient, TimerClient};
use crate::music::MusicService;
use crate::notes::NotesService;
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_PREFIX: &str = "!";

/// Turns chat lines into at most one reply each.
///
/// Owns the timer client outright; `handle_line` takes `&mut self`, so
/// commands run one at a time and never contend for the socket.
pub struct CommandDispatcher<T: TimerClient = LiveSplitClient> {
    prefix: String,
    activation: ActivationTable,
    timer: T,
    music: Arc<dyn MusicService>,
    notes: Arc<dyn NotesService>,
}

impl<T: TimerClient> CommandDispatcher<T> {
    pub fn new(
        prefix: impl Into<String>,
        activation: ActivationTable,
        timer: T,
        music: Arc<dyn MusicService>,
        notes: Arc<dyn NotesService>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            activation,
            timer,
            music,
            notes,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn activation(&self) -> &ActivationTable {
        &self.activation
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Usage hint for a command that got the wrong number of arguments.
    pub fn usage(&self, name: &str) -> String {
        match name {
            "splits" => format!("usage: {}splits <comparison>", self.prefix),
            _ => format!("usage: {}{} <command>", self.prefix, name),
        }
    }

    /// Handle one chat line. `None` means "say nothing": the line was not a
    /// command, or the command is not one we know.
    pub async fn handle_line(&mut self, line: &str) -> Option<String> {
        let command = Command::parse(line, &self.prefix)?;
        info!(command = %command.name, "got command: {}", line.trim());

        match BotCommand::try_from(&command) {
            Ok(cmd) => Some(self.execute(cmd).await),
            Err(CommandError::Arity { name, .. }) => Some(self.usage(name)),
            Err(e @ CommandError::Unknown(_)) => {
                info!("{}", e);
                None
            }
        }
    }

    /// Run a validated command and produce its reply.
    pub async fn execute(&mut self, command: BotCommand) -> String {
        debug!(?command, "Dispatching");
        match command {
            BotCommand::Splits { shorthand } => {
                splits::splits_reply(&shorthand, &self.activation, &mut self.timer).await
            }
            BotCommand::Spotify(action) => {
                match spotify::spotify_reply(&action, self.music.as_ref()).await {
                    Some(reply) => reply,
                    None => {
                        if let SpotifyAction::Other(ref other) = action {
                            debug!(action = %other, "Unknown spotify action");
                        }
                        self.usage("spotify")
                    }
                }
            }
            BotCommand::Thoughts => thoughts::thoughts_reply(self.notes.as_ref()).await,
        }
    }
}
