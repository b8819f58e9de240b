//! Outbound change notifications
//!
//! The bridge emits one `BridgeEvent` per published field change on a
//! `tokio::broadcast` channel, alongside the coalesced snapshot on the watch
//! channel. Events are equality-gated upstream: a field that did not change
//! does not produce an event, so consumers are not flooded by redundant
//! volume/mute ping-pong.
//!
//! Events are serializable (tagged) so an embedding host can fan them out over
//! SSE or similar without re-mapping.

use serde::{Deserialize, Serialize};

use crate::snapshot::PlayerState;

/// Snapshot change notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeEvent {
    /// Media duration changed
    LengthChanged {
        length_ms: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Playback position changed
    PositionChanged {
        position_ms: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Seekability changed
    SeekableChanged {
        seekable: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Confirmed volume changed
    VolumeChanged {
        volume: i32,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Confirmed mute flag changed
    MuteChanged {
        muted: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Lifecycle state changed
    PlaybackStateChanged {
        state: PlayerState,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}
