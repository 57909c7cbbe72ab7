//! Chat line → command parsing and arity validation.

use thiserror::Error;

/// A raw command extracted from one chat line.
///
/// `args` holds at most one element: everything after the first whitespace,
/// left intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    /// Parse a chat line. Returns `None` when the line does not start with `prefix`.
    pub fn parse(line: &str, prefix: &str) -> Option<Self> {
        let rest = line.trim().strip_prefix(prefix)?;
        let (name, args) = match rest.split_once(char::is_whitespace) {
            Some((name, blob)) => (name, vec![blob.to_string()]),
            None => (rest, vec![]),
        };
        Some(Self {
            name: name.to_string(),
            args,
        })
    }
}

/// `!spotify` sub-commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotifyAction {
    Current,
    Previous,
    Other(String),
}

impl From<&str> for SpotifyAction {
    fn from(s: &str) -> Self {
        match s {
            "current" => Self::Current,
            "previous" => Self::Previous,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A recognized, arity-checked command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Splits { shorthand: String },
    Spotify(SpotifyAction),
    Thoughts,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{name} takes exactly {expected} argument(s), got {got}")]
    Arity {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("unrecognized command: {0}")]
    Unknown(String),
}

impl TryFrom<&Command> for BotCommand {
    type Error = CommandError;

    fn try_from(cmd: &Command) -> Result<Self, Self::Error> {
        match cmd.name.as_str() {
            "splits" => {
                let arg = exactly_one("splits", &cmd.args)?;
                Ok(Self::Splits {
                    shorthand: arg.to_string(),
                })
            }
            "spotify" => {
                let arg = exactly_one("spotify", &cmd.args)?;
                Ok(Self::Spotify(SpotifyAction::from(arg)))
            }
            // Extra text after !thoughts is ignored
            "thoughts" => Ok(Self::Thoughts),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn exactly_one<'a>(name: &'static str, args: &'a [String]) -> Result<&'a str, CommandError> {
    match args {
        [arg] => Ok(arg.as_str()),
        _ => Err(CommandError::Arity {
            name,
            expected: 1,
            got: args.len(),
        }),
    }
}
