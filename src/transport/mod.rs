//! Chat transports
//!
//! - `ChatTransport` trait: receive channel messages, send reply lines
//! - `IrcTransport`: Twitch chat over IRC
//! - `ConsoleTransport`: stdin/stdout, or any reader/writer pair
//! - `ScriptedTransport`: canned messages for tests

pub mod console;
pub mod irc;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod traits;

pub use console::ConsoleTransport;
pub use irc::{IrcConfig, IrcError, IrcMessage, IrcTransport};
#[cfg(any(test, feature = "test-util"))]
pub use mock::ScriptedTransport;
pub use traits::{ChatMessage, ChatTransport};
