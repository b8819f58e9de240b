//! Published playback state
//!
//! `PlaybackSnapshot` is the bridge's consistent view of engine state. The
//! bridge worker is the sole writer; consumers only ever see whole snapshots,
//! never a partially-updated one.

use serde::{Deserialize, Serialize};

/// Playback state as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// No media loaded yet (initial state, never reported by the engine)
    Idle,
    Opening,
    Buffering,
    Playing,
    Paused,
    Stopped,
    EndReached,
    Error,
}

impl PlayerState {
    /// Whether this state counts as actively playing
    pub fn is_playing(self) -> bool {
        self == PlayerState::Playing
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Opening => write!(f, "opening"),
            PlayerState::Buffering => write!(f, "buffering"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Stopped => write!(f, "stopped"),
            PlayerState::EndReached => write!(f, "endreached"),
            PlayerState::Error => write!(f, "error"),
        }
    }
}

/// Consistent, observable mirror of engine playback state
///
/// Field values reflect the last confirmed engine truth. Control intents
/// (volume, mute, seek) do not update the snapshot optimistically; the change
/// lands when the engine's confirmation event arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackSnapshot {
    /// Media duration in milliseconds (0 while unknown)
    pub length_ms: u64,

    /// Current position in milliseconds
    pub time_ms: u64,

    /// Whether the engine reports the media as seekable
    pub is_seekable: bool,

    /// Derived from `state` on every lifecycle event
    pub is_playing: bool,

    /// Recomputed from engine truth on every lifecycle event
    pub is_muted: bool,

    /// Volume percentage, clamped to 0-100
    pub volume: i32,

    /// Last reported engine lifecycle state
    pub state: PlayerState,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            length_ms: 0,
            time_ms: 0,
            is_seekable: false,
            is_playing: false,
            is_muted: false,
            volume: 100,
            state: PlayerState::Idle,
        }
    }
}
