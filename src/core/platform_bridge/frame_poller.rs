//=========================================================================
// Frame Poller
//=========================================================================
//
// Consumer-side loop step: paces bridge drains by platform frames.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → bridge.drain() → batch
//
// Several frame signals received in one call coalesce into one drain.
// Bounded polling prevents starvation. Idle sleep reduces CPU usage.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::bridge::InputBridge;

//=== TickControl =========================================================

/// Consumer loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== FramePoller =========================================================

/// Drains the bridge once per observed frame boundary.
pub struct FramePoller {
    receiver: Receiver<PlatformEvent>,
    idle_sleep: Duration,
    batch: Option<String>,
    frames: u64,
}

impl FramePoller {
    const MAX_EVENTS_PER_CALL: usize = 100;

    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            idle_sleep: Duration::from_millis(10),
            batch: None,
            frames: 0,
        }
    }

    /// Sets how long `collect_frame` sleeps when nothing arrived.
    pub fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    /// Reads pending platform events and drains `bridge` if a frame
    /// boundary was seen. On exit the bridge is drained one last time so
    /// no buffered touch is lost.
    pub fn collect_frame(&mut self, bridge: &InputBridge) -> TickControl {
        self.batch = None;
        let mut frame_seen = false;
        let mut received = 0;
        let mut control = TickControl::Continue;

        while received < Self::MAX_EVENTS_PER_CALL {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::FrameReady) => {
                    frame_seen = true;
                    received += 1;
                }
                Ok(PlatformEvent::WindowClosed) | Err(TryRecvError::Disconnected) => {
                    control = TickControl::Exit;
                    break;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if received >= Self::MAX_EVENTS_PER_CALL {
            warn!(target: "host", "Frame backlog: {} frame signals coalesced", received);
        }

        if frame_seen || control == TickControl::Exit {
            self.frames += 1;
            let batch = bridge.drain();
            trace!(target: "host", "Frame {}: {} bytes drained", self.frames, batch.len());
            self.batch = Some(batch);
        } else if !self.idle_sleep.is_zero() {
            thread::sleep(self.idle_sleep);
        }

        control
    }

    /// Batch drained by the last `collect_frame` call, if any.
    pub fn batch(&self) -> Option<&str> {
        self.batch.as_deref()
    }

    /// Takes the last drained batch.
    pub fn take_batch(&mut self) -> Option<String> {
        self.batch.take()
    }

    /// Number of drains performed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::{HeadlessDocument, HeadlessElement};
    use crate::core::touch::{Contact, TouchPhase};
    use crossbeam_channel::unbounded;

    fn quiet_poller(rx: Receiver<PlatformEvent>) -> FramePoller {
        FramePoller::new(rx).with_idle_sleep(Duration::ZERO)
    }

    #[test]
    fn idle_call_does_not_drain() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut poller = quiet_poller(rx);
        let bridge = InputBridge::new();

        assert_eq!(poller.collect_frame(&bridge), TickControl::Continue);
        assert!(poller.batch().is_none());
        assert_eq!(poller.frames(), 0);
    }

    #[test]
    fn frame_signal_drains_bridge() {
        let (tx, rx) = unbounded();
        let mut poller = quiet_poller(rx);

        let document = HeadlessDocument::new(100.0, 100.0);
        let canvas = document.insert(HeadlessElement::new("canvas").with_id("canvas"));
        let bridge = InputBridge::new();
        bridge.bind(&document, "#canvas");
        document.dispatch(&canvas, TouchPhase::Start, &[Contact::new(0, 40.0, 5.0)]);

        tx.send(PlatformEvent::FrameReady).unwrap();

        assert_eq!(poller.collect_frame(&bridge), TickControl::Continue);
        assert_eq!(
            poller.take_batch().as_deref(),
            Some(r#"[{"id":0,"phase":"touchstart","position":[60.0,5.0]}]"#)
        );
        assert_eq!(bridge.pending(), 0);
    }

    #[test]
    fn multiple_frames_coalesce_into_one_drain() {
        let (tx, rx) = unbounded();
        let mut poller = quiet_poller(rx);
        let bridge = InputBridge::new();

        for _ in 0..3 {
            tx.send(PlatformEvent::FrameReady).unwrap();
        }

        poller.collect_frame(&bridge);
        assert_eq!(poller.frames(), 1);
        assert_eq!(poller.batch(), Some("[]"));
    }

    #[test]
    fn batch_is_cleared_on_next_call() {
        let (tx, rx) = unbounded();
        let mut poller = quiet_poller(rx);
        let bridge = InputBridge::new();

        tx.send(PlatformEvent::FrameReady).unwrap();
        poller.collect_frame(&bridge);
        assert!(poller.batch().is_some());

        poller.collect_frame(&bridge);
        assert!(poller.batch().is_none());
    }

    #[test]
    fn window_closed_exits_with_final_drain() {
        let (tx, rx) = unbounded();
        let mut poller = quiet_poller(rx);
        let bridge = InputBridge::new();

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(poller.collect_frame(&bridge), TickControl::Exit);
        assert_eq!(poller.batch(), Some("[]"));
    }

    #[test]
    fn disconnect_exits() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut poller = quiet_poller(rx);
        drop(tx);

        assert_eq!(poller.collect_frame(&InputBridge::new()), TickControl::Exit);
    }
}
