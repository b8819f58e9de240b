//! Playback state bridge
//!
//! Mirrors an external media engine's asynchronous event stream into a
//! consistent, observable `PlaybackSnapshot`, and mediates outbound control
//! intents (seek, volume, mute, replay) against the engine's authoritative
//! state.
//!
//! # Architecture
//!
//! Hybrid communication, one channel per concern:
//! - **Engine events** (`tokio::broadcast`): produced by the engine from its
//!   worker threads, drained in order by a single bridge task.
//! - **Snapshot** (`tokio::watch`): whole-value publishes from that single
//!   task; readers never observe a torn update.
//! - **Change notifications** (`tokio::broadcast`): one `BridgeEvent` per
//!   published field change.
//!
//! The bridge never updates the snapshot optimistically on an outbound
//! intent. Volume and mute writes are equality-gated against the observed
//! snapshot and land only when the engine's confirmation event arrives, so
//! the mirror cannot diverge from (or oscillate against) engine ground truth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::engine::{EngineEvent, MediaEngine};
use crate::error::{Error, Result};
use crate::events::BridgeEvent;
use crate::snapshot::{PlaybackSnapshot, PlayerState};

/// Volume percentage bounds (engine-defined range)
const VOLUME_MIN: i32 = 0;
const VOLUME_MAX: i32 = 100;

/// State shared between the bridge handle and its worker task
struct BridgeShared {
    /// Published snapshot; the worker task is the sole writer
    snapshot_tx: watch::Sender<PlaybackSnapshot>,

    /// Outbound change notifications
    event_tx: broadcast::Sender<BridgeEvent>,

    /// Gate for time-changed events
    ///
    /// Cleared while the UI drags a seek control so engine time updates do
    /// not fight the drag position. The next time event after re-enabling
    /// republishes immediately.
    time_tracking: AtomicBool,
}

/// One live engine subscription
struct Attachment {
    engine: Arc<dyn MediaEngine>,
    shutdown_tx: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

/// Bridges an external media engine into an observable state snapshot
///
/// One bridge serves one engine instance at a time. `attach` subscribes and
/// spawns the consumer task; `detach` tears everything down and guarantees no
/// further publish once it returns.
pub struct PlaybackStateBridge {
    shared: Arc<BridgeShared>,
    attachment: RwLock<Option<Attachment>>,
}

impl PlaybackStateBridge {
    /// Create a detached bridge
    pub fn new(config: BridgeConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(PlaybackSnapshot::default());
        let (event_tx, _) = broadcast::channel(config.event_capacity);

        Self {
            shared: Arc::new(BridgeShared {
                snapshot_tx,
                event_tx,
                time_tracking: AtomicBool::new(true),
            }),
            attachment: RwLock::new(None),
        }
    }

    /// Attach to an engine and start mirroring its events
    ///
    /// Primes volume and mute from the engine's getters, resets the rest of
    /// the snapshot, and re-enables time tracking. Fails with
    /// `Error::AlreadyAttached` if an engine is already attached.
    pub async fn attach(&self, engine: Arc<dyn MediaEngine>) -> Result<()> {
        let mut attachment = self.attachment.write().await;
        if attachment.is_some() {
            return Err(Error::AlreadyAttached);
        }

        // Fresh lifecycle: reset the gate and seed the snapshot from engine
        // truth before any event arrives.
        self.shared.time_tracking.store(true, Ordering::Relaxed);
        self.shared.snapshot_tx.send_replace(PlaybackSnapshot {
            volume: engine.volume().clamp(VOLUME_MIN, VOLUME_MAX),
            is_muted: engine.muted(),
            ..PlaybackSnapshot::default()
        });

        let events = engine.subscribe();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = tokio::spawn(run_worker(
            Arc::clone(&self.shared),
            Arc::clone(&engine),
            events,
            shutdown_rx,
        ));

        *attachment = Some(Attachment {
            engine,
            shutdown_tx,
            worker,
        });

        info!("Bridge attached to engine");
        Ok(())
    }

    /// Detach from the engine
    ///
    /// Idempotent. Signals the worker task and awaits its completion, so no
    /// marshalled engine callback executes after this returns.
    pub async fn detach(&self) {
        let attachment = self.attachment.write().await.take();
        if let Some(attachment) = attachment {
            let _ = attachment.shutdown_tx.send(true);
            let _ = attachment.worker.await;
            info!("Bridge detached from engine");
        }
    }

    /// Latest fully-published snapshot; never blocks
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Subscribe to coalesced snapshot updates
    pub fn watch_snapshot(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Subscribe to per-field change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.shared.event_tx.subscribe()
    }

    /// Begin or resume playback
    pub async fn play(&self) -> Result<()> {
        self.engine().await?.play();
        Ok(())
    }

    /// Pause playback
    pub async fn pause(&self) -> Result<()> {
        self.engine().await?.pause();
        Ok(())
    }

    /// Stop playback
    pub async fn stop(&self) -> Result<()> {
        self.engine().await?.stop();
        Ok(())
    }

    /// Restart the current media from the beginning
    ///
    /// Issues exactly one `stop()` then one `play()`. The engine provides no
    /// atomicity across the pair; an intermediate Stopped event is expected
    /// and mirrored as a normal transition, not an error.
    pub async fn replay(&self) -> Result<()> {
        let engine = self.engine().await?;
        info!("Replay requested");
        engine.stop();
        engine.play();
        Ok(())
    }

    /// Request a volume change
    ///
    /// Clamps to 0-100 and forwards only if the clamped value differs from
    /// the observed snapshot volume. The snapshot updates when the engine
    /// confirms via its volume-changed event.
    pub async fn set_volume(&self, volume: i32) -> Result<()> {
        let engine = self.engine().await?;
        let clamped = volume.clamp(VOLUME_MIN, VOLUME_MAX);
        if clamped == self.snapshot().volume {
            debug!("Volume already {}, not forwarding", clamped);
            return Ok(());
        }

        engine.set_volume(clamped);
        Ok(())
    }

    /// Request a mute flag change
    ///
    /// Equality-gated like `set_volume`: a redundant request is not forwarded,
    /// which breaks the oscillation loop when the UI and the engine set the
    /// flag near-simultaneously. Engine value wins any remaining race.
    pub async fn set_muted(&self, muted: bool) -> Result<()> {
        let engine = self.engine().await?;
        if muted == self.snapshot().is_muted {
            debug!("Mute already {}, not forwarding", muted);
            return Ok(());
        }

        engine.set_muted(muted);
        Ok(())
    }

    /// Request a jump to `target_ms`
    ///
    /// Returns the clamped target actually forwarded, not a guarantee of
    /// application; completion is observed via the next time-changed event.
    pub async fn seek(&self, target_ms: u64) -> Result<u64> {
        let engine = self.engine().await?;
        let target = clamp_to_length(target_ms, self.snapshot().length_ms);

        debug!("Seeking to {}ms", target);
        engine.seek(target);
        Ok(target)
    }

    /// Request a jump relative to the current position
    ///
    /// Saturates at zero and clamps to the known length. Returns the computed
    /// target.
    pub async fn seek_by_delta(&self, delta_ms: i64) -> Result<u64> {
        let engine = self.engine().await?;
        let snapshot = self.snapshot();

        let target = if delta_ms >= 0 {
            snapshot.time_ms.saturating_add(delta_ms as u64)
        } else {
            snapshot.time_ms.saturating_sub(delta_ms.unsigned_abs())
        };
        let target = clamp_to_length(target, snapshot.length_ms);

        debug!("Seeking by {}ms to {}ms", delta_ms, target);
        engine.seek(target);
        Ok(target)
    }

    /// Enable or disable mirroring of engine time-changed events
    ///
    /// Disabled while the UI drags a seek control. Re-enabling takes effect
    /// with the next engine time event.
    pub fn set_time_tracking(&self, enabled: bool) {
        self.shared.time_tracking.store(enabled, Ordering::Relaxed);
    }

    /// Engine handle, or `Error::Detached` when not attached
    async fn engine(&self) -> Result<Arc<dyn MediaEngine>> {
        self.attachment
            .read()
            .await
            .as_ref()
            .map(|a| Arc::clone(&a.engine))
            .ok_or(Error::Detached)
    }
}

impl Default for PlaybackStateBridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

/// Clamp a seek target against the known media length
///
/// Length 0 means unknown; only the lower bound applies then.
fn clamp_to_length(target_ms: u64, length_ms: u64) -> u64 {
    if length_ms > 0 {
        target_ms.min(length_ms)
    } else {
        target_ms
    }
}

/// Single-consumer event loop: drains engine events in order and publishes
/// snapshot updates
///
/// This task is the bridge's "UI-affinity context": the only snapshot writer.
/// It does not reorder events; an out-of-order Playing/Buffering pair from
/// the engine is mirrored as-is and consumers tolerate the transient.
async fn run_worker(
    shared: Arc<BridgeShared>,
    engine: Arc<dyn MediaEngine>,
    mut events: broadcast::Receiver<EngineEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    debug!("Bridge worker started");

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                break;
            }
            event = events.recv() => match event {
                Ok(event) => shared.apply_event(event, engine.as_ref()),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Derived flags resynchronize from engine truth on the
                    // next lifecycle event.
                    warn!("Bridge worker lagged, {} engine events skipped", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("Engine event stream closed");
                    break;
                }
            }
        }
    }

    debug!("Bridge worker stopped");
}

impl BridgeShared {
    /// Apply one engine event to the snapshot
    ///
    /// Every field update is equality-gated; a snapshot publish happens only
    /// when something actually changed, with one `BridgeEvent` per changed
    /// field. Related fields touched by a single engine event land in one
    /// publish.
    fn apply_event(&self, event: EngineEvent, engine: &dyn MediaEngine) {
        let current = self.snapshot_tx.borrow().clone();
        let mut next = current.clone();
        let mut changes = Vec::new();

        match event {
            EngineEvent::LengthChanged { length_ms } => {
                if next.length_ms != length_ms {
                    next.length_ms = length_ms;
                    changes.push(BridgeEvent::LengthChanged {
                        length_ms,
                        timestamp: chrono::Utc::now(),
                    });
                }
            }
            EngineEvent::TimeChanged { time_ms } => {
                if self.time_tracking.load(Ordering::Relaxed) && next.time_ms != time_ms {
                    next.time_ms = time_ms;
                    changes.push(BridgeEvent::PositionChanged {
                        position_ms: time_ms,
                        timestamp: chrono::Utc::now(),
                    });
                }
            }
            EngineEvent::SeekableChanged { seekable } => {
                if next.is_seekable != seekable {
                    next.is_seekable = seekable;
                    changes.push(BridgeEvent::SeekableChanged {
                        seekable,
                        timestamp: chrono::Utc::now(),
                    });
                }
            }
            EngineEvent::VolumeChanged { volume } => {
                let volume = volume.clamp(VOLUME_MIN, VOLUME_MAX);
                if next.volume != volume {
                    next.volume = volume;
                    changes.push(BridgeEvent::VolumeChanged {
                        volume,
                        timestamp: chrono::Utc::now(),
                    });
                }
            }
            EngineEvent::MuteChanged { muted } => {
                if next.is_muted != muted {
                    next.is_muted = muted;
                    changes.push(BridgeEvent::MuteChanged {
                        muted,
                        timestamp: chrono::Utc::now(),
                    });
                }
            }
            EngineEvent::StateChanged { state } => {
                // Engines may report a final time slightly short of length;
                // snap to the end when tracking is enabled.
                if state == PlayerState::EndReached
                    && self.time_tracking.load(Ordering::Relaxed)
                    && next.length_ms > 0
                    && next.time_ms != next.length_ms
                {
                    next.time_ms = next.length_ms;
                    changes.push(BridgeEvent::PositionChanged {
                        position_ms: next.time_ms,
                        timestamp: chrono::Utc::now(),
                    });
                }

                // Derived flags come from engine truth on every lifecycle
                // event, never from incremental tracking.
                let muted = engine.muted();
                if next.is_muted != muted {
                    next.is_muted = muted;
                    changes.push(BridgeEvent::MuteChanged {
                        muted,
                        timestamp: chrono::Utc::now(),
                    });
                }
                next.is_playing = state.is_playing();

                if next.state != state {
                    next.state = state;
                    changes.push(BridgeEvent::PlaybackStateChanged {
                        state,
                        timestamp: chrono::Utc::now(),
                    });
                }
            }
        }

        if next != current {
            debug!("Publishing snapshot update: {:?}", next);
            self.snapshot_tx.send_replace(next);
            for change in changes {
                // No subscribers is fine
                let _ = self.event_tx.send(change);
            }
        }
    }
}
