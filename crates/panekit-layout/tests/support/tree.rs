//! Headless tree builders.

use panekit_layout::{Element, Orientation, Size, StackPanel};
use panekit_viewhost::HeadlessPeerFactory;

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A content leaf with a fixed intrinsic size.
pub fn leaf(width: f32, height: f32) -> Element {
    Element::content(Size::new(width, height)).expect("valid leaf size")
}

/// A content leaf backed by a headless peer from `factory`.
pub fn realized_leaf(width: f32, height: f32, factory: &HeadlessPeerFactory) -> Element {
    leaf(width, height).realize(factory).expect("headless peer")
}

/// A stack panel holding `children` in order.
pub fn stack(orientation: Orientation, children: Vec<Element>) -> Element {
    Element::new(StackPanel::new(orientation).with_children(children))
}

/// Frames of a stack panel's children.
pub fn child_frames(panel: &Element) -> Vec<panekit_layout::Rect> {
    panel
        .kind()
        .children()
        .into_iter()
        .map(Element::frame)
        .collect()
}
