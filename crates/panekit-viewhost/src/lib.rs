//! # panekit viewhost
//!
//! The boundary between portable layout elements and the platform objects
//! that actually draw them. A portable element never discovers its native
//! counterpart on its own: the caller injects a [`PeerFactory`] and the
//! element keeps the resulting [`NativePeer`] behind a small capability
//! interface.
//!
//! The [`headless`] backend records every frame it is given and is what the
//! tests and the smoke harness run against.

pub mod headless;
pub mod traits;

pub use headless::{AppliedFrame, FrameLog, HeadlessPeer, HeadlessPeerFactory};
pub use traits::{NativePeer, PeerFactory};

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Errors raised by native peers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PeerError {
    #[error("Peer {0:?} is detached from its native object")]
    Detached(PeerId),
}

/// Unique identifier for a native peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerId(u64);

impl PeerId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// The kind of portable element a peer is created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerKind {
    Content,
    StackPanel,
    Grid,
    Flyout,
    MenuFlyout,
    ProgressBar,
}

impl PeerKind {
    pub fn name(&self) -> &'static str {
        match self {
            PeerKind::Content => "content",
            PeerKind::StackPanel => "stack-panel",
            PeerKind::Grid => "grid",
            PeerKind::Flyout => "flyout",
            PeerKind::MenuFlyout => "menu-flyout",
            PeerKind::ProgressBar => "progress-bar",
        }
    }
}
