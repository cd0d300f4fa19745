//! Look up a song or playlist, resolve audio stream URLs with yt-dlp and play
//! them with mpv.

pub mod classify;
pub mod config;
pub mod console;
pub mod error;
pub mod failure;
pub mod jukebox;
pub mod loop_spec;
pub mod normalize;
pub mod platform;
pub mod player;
pub mod resolver;
pub mod runner;

pub use classify::{classify, extract_playlist_id, MediaReference};
pub use config::Config;
pub use console::{Console, StdoutConsole};
pub use error::{ConfigError, LoopArgError, PlaybackError, ResolveError, ToolError};
pub use failure::{FailureClassifier, FailureReason, KeywordClassifier};
pub use jukebox::{Jukebox, Outcome};
pub use loop_spec::LoopSpec;
pub use normalize::normalize;
pub use player::Player;
pub use resolver::{ResolveEvent, StreamResolver, StreamUrl};
pub use runner::{SystemRunner, ToolOutput, ToolRunner};
