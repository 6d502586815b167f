//! Fire-and-forget event publication.
//!
//! The engine narrates what happened (messages, barks, visual effect
//! requests, screen shake) and never looks back: events are not awaited and
//! their delivery cannot fail an action. A frontend adapts [`EventSink`]
//! onto whatever bus it runs; the in-crate sinks cover headless use and
//! tests.

use std::sync::Mutex;

use crate::state::{ActorId, TilePos};

/// Visual effect requests the renderer may honor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FxKind {
    MeleeHit,
    RangedHit,
    Miss,
    Heal,
    DoorOpen,
    Death,
}

/// One engine-emitted event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Log-line for the message pane.
    Message { text: String },

    /// Speech bubble above an actor's head.
    Bark { speaker: ActorId, text: String },

    /// Particle/flash request at a tile.
    Fx { kind: FxKind, at: TilePos },

    ScreenShake { intensity: u8 },
}

/// Best-effort event outlet. Publishing to nobody is normal, not an error.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: GameEvent);
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&self, event: GameEvent) {
        tracing::trace!(?event, "event dropped (no sink attached)");
    }
}

/// Accumulates published events in memory for inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<GameEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything published so far.
    pub fn take(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().expect("event log poisoned"))
    }

    pub fn count_barks(&self) -> usize {
        self.events
            .lock()
            .expect("event log poisoned")
            .iter()
            .filter(|event| matches!(event, GameEvent::Bark { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, event: GameEvent) {
        self.events.lock().expect("event log poisoned").push(event);
    }
}
