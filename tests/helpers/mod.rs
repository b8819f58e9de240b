//! Test helpers for bridge integration tests
//!
//! Provides `FakeEngine`: a recording test double for the engine capability
//! surface. Control calls are logged for call-count assertions; confirmation
//! events are emitted explicitly by each test, so tests control exactly when
//! (and whether) the engine "confirms" an intent.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{broadcast, watch};

use playbridge::{EngineEvent, MediaEngine, PlaybackSnapshot};

/// One recorded engine control call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    Play,
    Pause,
    Stop,
    Seek(u64),
    SetVolume(i32),
    SetMuted(bool),
}

/// Recording engine double
///
/// Internal volume/mute truth is updated by setters (the engine applies the
/// request) but confirmation events are never emitted automatically.
pub struct FakeEngine {
    events: broadcast::Sender<EngineEvent>,
    volume: AtomicI32,
    muted: AtomicBool,
    calls: Mutex<Vec<EngineCall>>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Self::with_truth(100, false)
    }

    /// Fake engine with a given initial volume/mute ground truth
    pub fn with_truth(volume: i32, muted: bool) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            events,
            volume: AtomicI32::new(volume),
            muted: AtomicBool::new(muted),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Simulate an engine-originated event
    pub fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(event);
    }

    /// Change engine-side mute truth without emitting an event
    ///
    /// Used to test that lifecycle events resynchronize derived flags from
    /// engine truth.
    pub fn set_muted_truth(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
    }

    /// All recorded control calls, in order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls matching `call`
    pub fn call_count(&self, call: EngineCall) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == call)
            .count()
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MediaEngine for FakeEngine {
    fn play(&self) {
        self.record(EngineCall::Play);
    }

    fn pause(&self) {
        self.record(EngineCall::Pause);
    }

    fn stop(&self) {
        self.record(EngineCall::Stop);
    }

    fn seek(&self, position_ms: u64) {
        self.record(EngineCall::Seek(position_ms));
    }

    fn volume(&self) -> i32 {
        self.volume.load(Ordering::SeqCst)
    }

    fn set_volume(&self, volume: i32) {
        self.record(EngineCall::SetVolume(volume));
        self.volume.store(volume, Ordering::SeqCst);
    }

    fn muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    fn set_muted(&self, muted: bool) {
        self.record(EngineCall::SetMuted(muted));
        self.muted.store(muted, Ordering::SeqCst);
    }

    fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}

/// Await a snapshot satisfying `predicate`, with a 2s safety timeout
pub async fn wait_until(
    rx: &mut watch::Receiver<PlaybackSnapshot>,
    predicate: impl Fn(&PlaybackSnapshot) -> bool,
) -> PlaybackSnapshot {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            {
                let snapshot = rx.borrow_and_update();
                if predicate(&snapshot) {
                    return snapshot.clone();
                }
            }
            rx.changed().await.expect("snapshot channel closed");
        }
    })
    .await
    .expect("timed out waiting for snapshot condition")
}

/// Initialize test logging (RUST_LOG-controlled, once per binary)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
