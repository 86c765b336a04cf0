//! Capability traits implemented by platform backends.

use panekit_core::{Rect, Size};

use crate::{PeerError, PeerId, PeerKind};

/// Platform object paired with one portable element.
///
/// The layout engine only ever asks two things of a peer: how large its
/// native content would like to be, and where it was finally placed.
pub trait NativePeer: Send {
    /// Identifier of this peer.
    fn id(&self) -> PeerId;

    /// Native size preference under `available`, or `None` if the native
    /// object has no intrinsic content (panels, plain containers).
    fn measure_hint(&mut self, available: Size) -> Option<Size>;

    /// Apply the final frame computed by arrange, in parent coordinates.
    fn apply_frame(&mut self, frame: Rect) -> Result<(), PeerError>;
}

/// Creates peers for portable elements.
///
/// Passed explicitly to whoever builds the element tree; there is no global
/// registry.
pub trait PeerFactory {
    fn create_peer(&self, kind: PeerKind) -> Result<Box<dyn NativePeer>, PeerError>;
}
