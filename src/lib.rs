//! # Playback State Bridge (playbridge)
//!
//! Bridges an external, event-driven native media engine into a consistent,
//! thread-safe, observable playback state snapshot for UI consumers.
//!
//! **Purpose:** Subscribe to an engine's asynchronous event stream
//! (length/time/seekable/volume/mute/lifecycle), republish it as whole-value
//! snapshots with per-field change notifications, and mediate outbound control
//! intents (seek, volume, mute, replay) without feedback loops.
//!
//! **Architecture:** One consumer task per attachment drains the engine's
//! `tokio::broadcast` event stream in order and is the sole writer of a
//! `tokio::watch`-published `PlaybackSnapshot`. Outbound intents are
//! equality-gated and confirmation-driven: the snapshot only moves when the
//! engine says so.
//!
//! The engine itself (decode, demux, render) is opaque behind the
//! [`MediaEngine`] trait.

pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod snapshot;

pub use bridge::PlaybackStateBridge;
pub use config::BridgeConfig;
pub use engine::{EngineEvent, MediaEngine};
pub use error::{Error, Result};
pub use events::BridgeEvent;
pub use snapshot::{PlaybackSnapshot, PlayerState};
