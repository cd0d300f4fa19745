use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::LoopArgError;

/// How many times playback repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopSpec {
    /// Repeat until the user quits.
    #[default]
    Infinite,
    /// A single pass; no loop flag is given to the player.
    Once,
    /// Repeat count handed to the player as-is.
    Times(NonZeroU32),
}

impl LoopSpec {
    /// Loop flag for a single track, if any.
    pub fn track_arg(self) -> Option<String> {
        match self {
            // mpv reads a bare --loop as infinite
            Self::Infinite => Some("--loop".to_string()),
            Self::Once => None,
            Self::Times(n) => Some(format!("--loop={}", n)),
        }
    }

    /// Loop flag for a whole play queue, if any.
    pub fn playlist_arg(self) -> Option<String> {
        match self {
            Self::Infinite => Some("--loop-playlist=inf".to_string()),
            Self::Once => None,
            Self::Times(n) => Some(format!("--loop-playlist={}", n)),
        }
    }
}

/// `-1` is infinite, `0` a single pass, any positive integer a repeat count.
impl FromStr for LoopSpec {
    type Err = LoopArgError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let err = || LoopArgError {
            raw: raw.to_string(),
        };
        match raw.trim().parse::<i64>().map_err(|_| err())? {
            -1 => Ok(Self::Infinite),
            0 => Ok(Self::Once),
            n if n > 0 => u32::try_from(n)
                .ok()
                .and_then(NonZeroU32::new)
                .map(Self::Times)
                .ok_or_else(err),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for LoopSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infinite => write!(f, "infinite"),
            Self::Once => write!(f, "once"),
            Self::Times(n) => write!(f, "{}x", n),
        }
    }
}
