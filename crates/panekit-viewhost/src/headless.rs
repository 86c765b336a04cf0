//! Headless peer backend.
//!
//! Peers created here never touch a window system. Each applied frame is
//! appended to a shared [`FrameLog`] so callers can inspect what a real
//! backend would have been told.

use std::collections::HashMap;
use std::sync::Arc;

use panekit_core::{Rect, Size};
use parking_lot::Mutex;
use tracing::trace;

use crate::{NativePeer, PeerError, PeerFactory, PeerId, PeerKind};

/// One frame applied to a headless peer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedFrame {
    pub peer: PeerId,
    pub kind: PeerKind,
    pub frame: Rect,
}

/// Shared, cloneable record of applied frames.
#[derive(Debug, Clone, Default)]
pub struct FrameLog {
    frames: Arc<Mutex<Vec<AppliedFrame>>>,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, frame: AppliedFrame) {
        self.frames.lock().push(frame);
    }

    /// Copy of every frame recorded so far, oldest first.
    pub fn frames(&self) -> Vec<AppliedFrame> {
        self.frames.lock().clone()
    }

    /// Most recent frame applied to `peer`.
    pub fn last_for(&self, peer: PeerId) -> Option<Rect> {
        self.frames
            .lock()
            .iter()
            .rev()
            .find(|f| f.peer == peer)
            .map(|f| f.frame)
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.frames.lock().clear();
    }
}

/// A peer that reports a fixed size hint and records frames.
#[derive(Debug)]
pub struct HeadlessPeer {
    id: PeerId,
    kind: PeerKind,
    hint: Option<Size>,
    log: FrameLog,
    detached: bool,
}

impl HeadlessPeer {
    pub fn new(kind: PeerKind, hint: Option<Size>, log: FrameLog) -> Self {
        Self {
            id: PeerId::next(),
            kind,
            hint,
            log,
            detached: false,
        }
    }

    /// Simulate the native object going away; later frames are rejected.
    pub fn detach(&mut self) {
        self.detached = true;
    }
}

impl NativePeer for HeadlessPeer {
    fn id(&self) -> PeerId {
        self.id
    }

    fn measure_hint(&mut self, available: Size) -> Option<Size> {
        trace!(id = ?self.id, ?available, hint = ?self.hint, "headless measure hint");
        self.hint
    }

    fn apply_frame(&mut self, frame: Rect) -> Result<(), PeerError> {
        if self.detached {
            return Err(PeerError::Detached(self.id));
        }
        trace!(id = ?self.id, kind = self.kind.name(), ?frame, "headless frame applied");
        self.log.push(AppliedFrame {
            peer: self.id,
            kind: self.kind,
            frame,
        });
        Ok(())
    }
}

/// Factory producing [`HeadlessPeer`]s that share one [`FrameLog`].
#[derive(Debug, Clone, Default)]
pub struct HeadlessPeerFactory {
    log: FrameLog,
    hints: HashMap<PeerKind, Size>,
}

impl HeadlessPeerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size hint reported by every peer of `kind` created afterwards.
    pub fn with_hint(mut self, kind: PeerKind, hint: Size) -> Self {
        self.hints.insert(kind, hint);
        self
    }

    pub fn log(&self) -> &FrameLog {
        &self.log
    }
}

impl PeerFactory for HeadlessPeerFactory {
    fn create_peer(&self, kind: PeerKind) -> Result<Box<dyn NativePeer>, PeerError> {
        let hint = self.hints.get(&kind).copied();
        Ok(Box::new(HeadlessPeer::new(kind, hint, self.log.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_ids_are_unique() {
        let a = PeerId::next();
        let b = PeerId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_factory_applies_hints_per_kind() {
        let factory =
            HeadlessPeerFactory::new().with_hint(PeerKind::Content, Size::new(40.0, 12.0));

        let mut content = factory.create_peer(PeerKind::Content).unwrap();
        let mut grid = factory.create_peer(PeerKind::Grid).unwrap();

        assert_eq!(content.measure_hint(Size::INFINITE), Some(Size::new(40.0, 12.0)));
        assert_eq!(grid.measure_hint(Size::INFINITE), None);
    }

    #[test]
    fn test_frames_are_recorded_in_shared_log() {
        let factory = HeadlessPeerFactory::new();
        let mut peer = factory.create_peer(PeerKind::Flyout).unwrap();

        peer.apply_frame(Rect::new(0.0, 0.0, 10.0, 20.0)).unwrap();
        peer.apply_frame(Rect::new(5.0, 5.0, 10.0, 20.0)).unwrap();

        assert_eq!(factory.log().len(), 2);
        assert_eq!(
            factory.log().last_for(peer.id()),
            Some(Rect::new(5.0, 5.0, 10.0, 20.0))
        );
    }

    #[test]
    fn test_detached_peer_rejects_frames() {
        let log = FrameLog::new();
        let mut peer = HeadlessPeer::new(PeerKind::Content, None, log.clone());
        peer.detach();

        let err = peer.apply_frame(Rect::zero()).unwrap_err();
        assert_eq!(err, PeerError::Detached(peer.id()));
        assert!(log.is_empty());
    }
}
