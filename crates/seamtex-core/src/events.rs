//! Session events.
//!
//! Components outside the core (the 3D viewer, a status bar) subscribe to a
//! session and react to what it publishes instead of being called inline.

use std::sync::mpsc;
use std::sync::Arc;

use crate::pipeline::ArtifactKind;
use crate::processor::MeshGeometry;
use crate::readiness::ControlState;
use crate::view::ViewSelection;

#[derive(Clone, Debug)]
pub enum SessionEvent {
    /// A mesh finished loading; the viewer should (re)build its scene.
    MeshReady { geometry: Arc<MeshGeometry> },
    /// A texture finished loading and is shown on the displayed canvas.
    TextureReady { width: u32, height: u32 },
    /// Enabled state of the compress/smooth controls changed.
    ControlsChanged(ControlState),
    /// The texture the displayed canvas, lens and viewer should use changed.
    ActiveTextureChanged { view: ViewSelection },
    /// A pipeline run produced a new artifact.
    OutputReady { kind: ArtifactKind },
    /// A run started waiting for, or finished, its external call.
    BusyChanged(bool),
}

/// Fan-out of events to any number of subscribers.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::Sender<SessionEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> mpsc::Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Send to every live subscriber; dropped receivers are forgotten.
    pub fn publish(&mut self, event: SessionEvent) {
        self.subscribers
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
