//! Chat command handling
//!
//! `parser` turns a chat line into a typed [`BotCommand`], `dispatcher` routes
//! it, and one handler module per command builds the reply line.

pub mod dispatcher;
pub mod parser;
pub mod splits;
pub mod spotify;
pub mod thoughts;

pub use dispatcher::{CommandDispatcher, DEFAULT_PREFIX};
pub use parser::{BotCommand, Command, CommandError, SpotifyAction};
