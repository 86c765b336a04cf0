//! Custom assertions for layout tests.

use panekit_layout::{Rect, Size};

/// Assert that two lengths match within tolerance.
#[track_caller]
pub fn assert_near(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "Length mismatch: expected {expected}, got {actual} (tolerance: {tolerance})"
    );
}

/// Assert that two sizes match within tolerance.
#[track_caller]
pub fn assert_size_near(actual: Size, expected: Size, tolerance: f32) {
    assert!(
        (actual.width - expected.width).abs() <= tolerance
            && (actual.height - expected.height).abs() <= tolerance,
        "Size mismatch: expected {}x{}, got {}x{} (tolerance: {})",
        expected.width,
        expected.height,
        actual.width,
        actual.height,
        tolerance
    );
}

/// Assert that two rectangles match within tolerance.
#[track_caller]
pub fn assert_rect_near(actual: Rect, expected: Rect, tolerance: f32) {
    let close = [
        (actual.x, expected.x),
        (actual.y, expected.y),
        (actual.width, expected.width),
        (actual.height, expected.height),
    ]
    .iter()
    .all(|(a, e)| (a - e).abs() <= tolerance);

    assert!(
        close,
        "Rect mismatch: expected {:?}, got {:?} (tolerance: {})",
        expected, actual, tolerance
    );
}

/// Assert that `inner` lies within `outer`.
#[track_caller]
pub fn assert_contained(inner: Rect, outer: Rect) {
    let eps = 1e-3;
    assert!(
        inner.x >= outer.x - eps
            && inner.y >= outer.y - eps
            && inner.right() <= outer.right() + eps
            && inner.bottom() <= outer.bottom() + eps,
        "{inner:?} escapes {outer:?}"
    );
}
