//! Property-based invariant tests for track resolution and stacking.
//!
//! 1. Absolute tracks resolve to their value clamped into bounds.
//! 2. Equal star weights split the remaining space evenly with no leakage.
//! 3. Clamped star distribution never hands out more than is available and
//!    respects every max bound.
//! 4. With min and max bounds (including min > max and huge weights) every
//!    star track lands inside its bounds, and the tracks not held at a bound
//!    share the rest in proportion to their weights.
//! 5. Offsets are the running sum of actual sizes plus spacing.
//! 6. Vertical stacks place children at the prefix sums of their heights.

mod support;

use panekit_layout::{
    clamp_extent, resolve_tracks, GridLength, Orientation, Rect, Size, TrackDefinition,
};
use proptest::prelude::*;
use support::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn tolerance(scale: f32) -> f32 {
    1e-3 * scale.max(1.0)
}

fn capped_star_strategy() -> impl Strategy<Value = TrackDefinition> {
    (0.0f32..=10.0, proptest::option::of(0.0f32..=500.0)).prop_map(|(weight, max)| {
        let track = TrackDefinition::star(weight).unwrap();
        match max {
            Some(max) => track.with_max(max).unwrap(),
            None => track,
        }
    })
}

fn weight_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![0.0f32..=10.0, 1e20f32..=1e30]
}

fn bounded_star_strategy() -> impl Strategy<Value = TrackDefinition> {
    (
        weight_strategy(),
        proptest::option::of(0.0f32..=400.0),
        proptest::option::of(0.0f32..=500.0),
    )
        .prop_map(|(weight, min, max)| {
            let mut track = TrackDefinition::star(weight).unwrap();
            if let Some(min) = min {
                track = track.with_min(min).unwrap();
            }
            if let Some(max) = max {
                track = track.with_max(max).unwrap();
            }
            track
        })
}

/// Lower bound a track can actually reach; the max wins when min > max.
fn floor_of(track: &TrackDefinition) -> f32 {
    track.min().min(track.max())
}

fn mixed_track_strategy() -> impl Strategy<Value = TrackDefinition> {
    prop_oneof![
        (0.0f32..=300.0).prop_map(|v| TrackDefinition::absolute(v).unwrap()),
        Just(TrackDefinition::auto()),
        bounded_star_strategy(),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Absolute tracks
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn absolute_resolves_to_clamped_value(
        value in 0.0f32..=1000.0,
        min in 0.0f32..=500.0,
        max in 0.0f32..=1000.0,
    ) {
        let mut tracks = vec![
            TrackDefinition::new(GridLength::Absolute(value)).unwrap()
                .with_min(min).unwrap()
                .with_max(max).unwrap(),
        ];
        resolve_tracks(&mut tracks, 2000.0, &[], 0.0);
        prop_assert_eq!(tracks[0].actual(), clamp_extent(value, min, max));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Equal star weights
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn equal_stars_split_evenly(
        count in 1usize..=12,
        weight in 0.1f32..=5.0,
        extent in 0.0f32..=5000.0,
    ) {
        let mut tracks: Vec<TrackDefinition> =
            (0..count).map(|_| TrackDefinition::star(weight).unwrap()).collect();

        resolve_tracks(&mut tracks, extent, &[], 0.0);

        let share = extent / count as f32;
        for track in &tracks {
            prop_assert!((track.actual() - share).abs() <= tolerance(extent));
        }
        let total: f32 = tracks.iter().map(TrackDefinition::actual).sum();
        prop_assert!((total - extent).abs() <= tolerance(extent));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Clamped distribution
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamped_stars_never_exceed_remaining(
        tracks in proptest::collection::vec(capped_star_strategy(), 1..=10),
        extent in 0.0f32..=3000.0,
    ) {
        let mut tracks = tracks;
        resolve_tracks(&mut tracks, extent, &[], 0.0);

        let total: f32 = tracks.iter().map(TrackDefinition::actual).sum();
        prop_assert!(total <= extent + tolerance(extent));
        for track in &tracks {
            prop_assert!(track.actual() >= 0.0);
            prop_assert!(track.actual() <= track.max());
        }
    }

    #[test]
    fn unclamped_stars_absorb_surplus(
        tracks in proptest::collection::vec(capped_star_strategy(), 1..=10),
        extent in 0.0f32..=3000.0,
    ) {
        // One unbounded positive-weight track means nothing is left over.
        let mut tracks = tracks;
        tracks.push(TrackDefinition::star(1.0).unwrap());
        resolve_tracks(&mut tracks, extent, &[], 0.0);

        let total: f32 = tracks.iter().map(TrackDefinition::actual).sum();
        prop_assert!((total - extent).abs() <= tolerance(extent));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Min and max bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bounded_stars_stay_within_bounds(
        tracks in proptest::collection::vec(bounded_star_strategy(), 1..=10),
        extent in 0.0f32..=3000.0,
    ) {
        let mut tracks = tracks;
        resolve_tracks(&mut tracks, extent, &[], 0.0);

        for track in &tracks {
            prop_assert!(track.actual().is_finite());
            prop_assert_eq!(track.clamp(track.actual()), track.actual());
        }
    }

    #[test]
    fn unbound_stars_share_in_proportion(
        tracks in proptest::collection::vec(bounded_star_strategy(), 1..=10),
        extent in 0.0f32..=3000.0,
    ) {
        let mut tracks = tracks;
        resolve_tracks(&mut tracks, extent, &[], 0.0);

        let eps = 1e-2;
        let ratios: Vec<f32> = tracks
            .iter()
            .filter(|t| {
                let weight = t.length().star_weight();
                weight > 0.0 && t.actual() > floor_of(t) + eps && t.actual() < t.max() - eps
            })
            .map(|t| t.actual() / t.length().star_weight())
            .collect();

        if let Some(&first) = ratios.first() {
            for ratio in &ratios {
                prop_assert!((ratio - first).abs() <= 1e-3 * first.abs());
            }
            // an open track with space means every bit of the extent went out
            let total: f32 = tracks.iter().map(TrackDefinition::actual).sum();
            prop_assert!((total - extent).abs() <= tolerance(extent));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Offsets
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offsets_are_running_sums(
        tracks in proptest::collection::vec(mixed_track_strategy(), 1..=10),
        auto in proptest::collection::vec(0.0f32..=200.0, 0..=10),
        extent in 0.0f32..=3000.0,
        spacing in 0.0f32..=20.0,
    ) {
        let mut tracks = tracks;
        let used = resolve_tracks(&mut tracks, extent, &auto, spacing);

        let mut position = 0.0f32;
        for track in &tracks {
            prop_assert!((track.offset() - position).abs() <= tolerance(position));
            position += track.actual() + spacing;
        }
        prop_assert!((used - (position - spacing)).abs() <= tolerance(position));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Stacking
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn vertical_stack_uses_prefix_sums(
        heights in proptest::collection::vec(0.0f32..=100.0, 0..=8),
        width in 1.0f32..=400.0,
    ) {
        let children = heights.iter().map(|&h| leaf(10.0, h)).collect();
        let mut panel = stack(Orientation::Vertical, children);

        panel.measure(Size::INFINITE).unwrap();
        let total: f32 = heights.iter().sum();
        prop_assert!((panel.desired_size().height - total).abs() <= tolerance(total));

        panel.arrange(Rect::new(0.0, 0.0, width, total)).unwrap();
        let mut y = 0.0f32;
        for (frame, height) in child_frames(&panel).iter().zip(&heights) {
            prop_assert!((frame.y - y).abs() <= tolerance(y));
            prop_assert_eq!(frame.width, width);
            y += height;
        }
    }
}
