//! Media engine capability surface
//!
//! The bridge treats the native playback engine (decode, demux, render) as an
//! opaque collaborator behind the `MediaEngine` trait: a handful of
//! fire-and-forget control calls, two state getters, and an event stream.
//!
//! Control calls carry no result. Outcomes are observed asynchronously through
//! the engine's event stream, which is the authoritative source of truth.

use tokio::sync::broadcast;

use crate::snapshot::PlayerState;

/// Engine notification categories
///
/// One variant per category the engine can emit. The bridge dispatches on
/// these exhaustively, which keeps subscription and handling symmetric and
/// auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// Media duration became known or changed
    LengthChanged { length_ms: u64 },

    /// Playback position advanced or jumped
    TimeChanged { time_ms: u64 },

    /// Seekability of the current media changed
    SeekableChanged { seekable: bool },

    /// Engine volume changed (either by us or externally)
    VolumeChanged { volume: i32 },

    /// Engine mute flag changed (either by us or externally)
    MuteChanged { muted: bool },

    /// Lifecycle transition (opening, buffering, playing, paused, stopped,
    /// end-reached, error)
    StateChanged { state: PlayerState },
}

/// Opaque playback capability consumed by the bridge
///
/// Implementations wrap a native player instance. All methods must be callable
/// from any thread; control calls must not block on playback progress.
pub trait MediaEngine: Send + Sync {
    /// Begin or resume playback
    fn play(&self);

    /// Pause playback
    fn pause(&self);

    /// Stop playback and release the current position
    fn stop(&self);

    /// Request a jump to `position_ms`
    ///
    /// Application is asynchronous: the engine confirms via a later
    /// `TimeChanged` event.
    fn seek(&self, position_ms: u64);

    /// Current engine volume percentage
    fn volume(&self) -> i32;

    /// Request a volume change (engine-defined range 0-100)
    fn set_volume(&self, volume: i32);

    /// Current engine mute flag
    fn muted(&self) -> bool;

    /// Request a mute flag change
    fn set_muted(&self, muted: bool);

    /// Subscribe to the engine's event stream
    ///
    /// Events must be delivered in emission order. The engine may emit from
    /// worker threads; the bridge marshals onto its own consumer task.
    fn subscribe(&self) -> broadcast::Receiver<EngineEvent>;
}
