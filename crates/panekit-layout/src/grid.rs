//! # Grid Layout
//!
//! Row/column layout driven by [`TrackDefinition`]s.
//!
//! ## Track resolution
//!
//! [`resolve_tracks`] sizes one axis:
//! 1. `Absolute` tracks take their value clamped into `[min, max]`
//! 2. `Auto` tracks take the largest content contribution, clamped
//! 3. What is left of the extent (after spacing) is shared by `Star` tracks
//!    in proportion to their weights
//! 4. Star shares that clamping moves are frozen and the difference is
//!    redistributed over the remaining star tracks until nothing clamps.
//!    Minimum violations freeze first when they outweigh maximum ones, and
//!    the other way round, so every frozen bound still binds at the end
//! 5. Offsets are the running sum of actual sizes plus spacing
//!
//! Under an infinite extent there is nothing to share, so star tracks are
//! sized to content like auto tracks.
//!
//! ## Content contributions
//!
//! Children occupying a single track contribute their desired extent to
//! it. Children spanning several tracks spread whatever the spanned tracks
//! do not already cover evenly over the content-sized tracks they span.

use panekit_core::{Rect, Size};
use tracing::{debug, trace, warn};

use crate::{Element, GridLength, LayoutError, TrackDefinition};

// ==================== Track Resolution ====================

/// Resolve actual sizes and offsets for `tracks` within `extent`.
///
/// `auto_extents[i]` is the content requirement of track `i` (missing
/// entries count as zero). Returns the total length used, spacing included.
pub fn resolve_tracks(
    tracks: &mut [TrackDefinition],
    extent: f32,
    auto_extents: &[f32],
    spacing: f32,
) -> f32 {
    if tracks.is_empty() {
        return 0.0;
    }

    let content_sized_stars = !extent.is_finite();
    let total_spacing = spacing * (tracks.len() - 1) as f32;

    let mut fixed: f32 = 0.0;
    for (i, track) in tracks.iter_mut().enumerate() {
        let content = auto_extents.get(i).copied().unwrap_or(0.0);
        let actual = match track.length() {
            GridLength::Absolute(value) => track.clamp(value),
            GridLength::Auto => track.clamp(content),
            GridLength::Star(_) if content_sized_stars => track.clamp(content),
            GridLength::Star(_) => continue,
        };
        track.set_actual(actual);
        fixed += actual;
    }

    if !content_sized_stars {
        let remaining = (extent - fixed - total_spacing).max(0.0);
        distribute_star_space(tracks, remaining);
    }

    let mut position = 0.0;
    for track in tracks.iter_mut() {
        track.set_offset(position);
        position += track.actual() + spacing;
    }
    let used = position - spacing;

    debug!(
        tracks = tracks.len(),
        extent,
        used,
        "resolved tracks"
    );
    used
}

/// Share `remaining` among star tracks by weight, freezing clamped tracks.
///
/// Each pass sums how far clamping moved the open tracks. When the net
/// movement is positive only the tracks raised to their minimum freeze,
/// when negative only those capped at their maximum, and when zero every
/// clamped track freezes. A frozen bound therefore stays binding as the
/// remaining space shifts. Each pass freezes at least one track or
/// finishes, so at most one pass per star track runs. Space left over once
/// every track is frozen stays unassigned.
fn distribute_star_space(tracks: &mut [TrackDefinition], remaining: f32) {
    let mut open: Vec<usize> = tracks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.length().is_star())
        .map(|(i, _)| i)
        .collect();
    let star_count = open.len();

    let mut moved = vec![0.0f32; tracks.len()];
    let mut assigned: f32 = 0.0;

    for pass in 0..star_count {
        if open.is_empty() {
            break;
        }

        let available = (remaining - assigned).max(0.0);
        let mut scale = 1.0f32;
        let mut total_weight: f32 = open.iter().map(|&i| tracks[i].length().star_weight()).sum();
        if !total_weight.is_finite() {
            // weights relative to the largest keep the sum finite
            scale = open
                .iter()
                .map(|&i| tracks[i].length().star_weight())
                .fold(0.0f32, f32::max);
            total_weight = open
                .iter()
                .map(|&i| tracks[i].length().star_weight() / scale)
                .sum();
        }

        let mut net = 0.0f32;
        for &i in &open {
            // all-zero weights: nobody gets a share
            let share = if total_weight > 0.0 {
                available * (tracks[i].length().star_weight() / scale / total_weight)
            } else {
                0.0
            };
            let actual = tracks[i].clamp(share);
            tracks[i].set_actual(actual);
            moved[i] = actual - share;
            net += moved[i];
        }

        let before = open.len();
        open.retain(|&i| {
            let freeze = if net > 0.0 {
                moved[i] > 0.0
            } else if net < 0.0 {
                moved[i] < 0.0
            } else {
                moved[i] != 0.0
            };
            if freeze {
                assigned += tracks[i].actual();
            }
            !freeze
        });

        debug!(
            pass,
            open = before,
            frozen = before - open.len(),
            available,
            "star distribution pass"
        );
        if open.len() == before {
            break;
        }
    }
}

// ==================== Grid Panel ====================

/// Cell position and span of a grid child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self::cell(0, 0)
    }
}

impl GridPlacement {
    /// A single cell.
    pub fn cell(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            row_span: 1,
            column_span: 1,
        }
    }

    /// A block of cells; spans below one are treated as one.
    pub fn span(row: usize, column: usize, row_span: usize, column_span: usize) -> Self {
        Self {
            row,
            column,
            row_span: row_span.max(1),
            column_span: column_span.max(1),
        }
    }
}

/// A child element together with its cell placement.
#[derive(Debug)]
pub struct GridChild {
    pub placement: GridPlacement,
    pub element: Element,
}

/// Which axis of the grid a computation runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridAxis {
    Columns,
    Rows,
}

impl GridAxis {
    fn extent(self, size: Size) -> f32 {
        match self {
            GridAxis::Columns => size.width,
            GridAxis::Rows => size.height,
        }
    }
}

/// Panel placing children in cells of a row/column grid.
#[derive(Debug, Default)]
pub struct Grid {
    columns: Vec<TrackDefinition>,
    rows: Vec<TrackDefinition>,
    column_spacing: f32,
    row_spacing: f32,
    children: Vec<GridChild>,
    implicit_column: TrackDefinition,
    implicit_row: TrackDefinition,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = TrackDefinition>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = TrackDefinition>) -> Self {
        self.rows = rows.into_iter().collect();
        self
    }

    pub fn with_spacing(mut self, column: f32, row: f32) -> Result<Self, LayoutError> {
        self.set_spacing(column, row)?;
        Ok(self)
    }

    pub fn columns(&self) -> &[TrackDefinition] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut Vec<TrackDefinition> {
        &mut self.columns
    }

    pub fn rows(&self) -> &[TrackDefinition] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<TrackDefinition> {
        &mut self.rows
    }

    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    pub fn row_spacing(&self) -> f32 {
        self.row_spacing
    }

    /// Gaps inserted between adjacent columns and rows.
    pub fn set_spacing(&mut self, column: f32, row: f32) -> Result<(), LayoutError> {
        let column = crate::validate_length("Grid.column_spacing", column)?;
        let row = crate::validate_length("Grid.row_spacing", row)?;
        self.column_spacing = column;
        self.row_spacing = row;
        Ok(())
    }

    pub fn add_child(&mut self, element: Element, placement: GridPlacement) {
        self.children.push(GridChild { placement, element });
    }

    pub fn children(&self) -> &[GridChild] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [GridChild] {
        &mut self.children
    }

    /// Child occupying the given cell as its top-left corner.
    pub fn child_at(&self, row: usize, column: usize) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.placement.row == row && c.placement.column == column)
            .map(|c| &c.element)
    }

    fn tracks(&self, axis: GridAxis) -> &[TrackDefinition] {
        match axis {
            GridAxis::Columns if self.columns.is_empty() => std::slice::from_ref(&self.implicit_column),
            GridAxis::Columns => &self.columns,
            GridAxis::Rows if self.rows.is_empty() => std::slice::from_ref(&self.implicit_row),
            GridAxis::Rows => &self.rows,
        }
    }

    fn tracks_mut(&mut self, axis: GridAxis) -> &mut [TrackDefinition] {
        match axis {
            GridAxis::Columns if self.columns.is_empty() => {
                std::slice::from_mut(&mut self.implicit_column)
            }
            GridAxis::Columns => &mut self.columns,
            GridAxis::Rows if self.rows.is_empty() => std::slice::from_mut(&mut self.implicit_row),
            GridAxis::Rows => &mut self.rows,
        }
    }

    fn spacing(&self, axis: GridAxis) -> f32 {
        match axis {
            GridAxis::Columns => self.column_spacing,
            GridAxis::Rows => self.row_spacing,
        }
    }

    /// Start and span of `placement` on `axis`, clamped into the defined tracks.
    fn span_of(&self, placement: GridPlacement, axis: GridAxis) -> (usize, usize) {
        let count = self.tracks(axis).len();
        let (start, span) = match axis {
            GridAxis::Columns => (placement.column, placement.column_span),
            GridAxis::Rows => (placement.row, placement.row_span),
        };
        let clamped_start = start.min(count - 1);
        let clamped_span = span.max(1).min(count - clamped_start);
        if clamped_start != start || clamped_span != span.max(1) {
            warn!(?axis, start, span, count, "grid placement clamped into range");
        }
        (clamped_start, clamped_span)
    }

    /// Extent of a span using resolved actual sizes.
    fn span_extent(&self, axis: GridAxis, start: usize, span: usize) -> f32 {
        let tracks = &self.tracks(axis)[start..start + span];
        let sizes: f32 = tracks.iter().map(TrackDefinition::actual).sum();
        sizes + self.spacing(axis) * (span - 1) as f32
    }

    /// Extent of a span made only of absolute tracks, if it is one.
    fn fixed_span_extent(&self, axis: GridAxis, start: usize, span: usize) -> Option<f32> {
        let tracks = &self.tracks(axis)[start..start + span];
        let mut total = self.spacing(axis) * (span - 1) as f32;
        for track in tracks {
            match track.length() {
                GridLength::Absolute(value) => total += track.clamp(value),
                _ => return None,
            }
        }
        Some(total)
    }

    /// Per-track content requirements on `axis` from measured children.
    fn content_contributions(&self, axis: GridAxis, extent: f32) -> Vec<f32> {
        let tracks = self.tracks(axis);
        let content_sized = |track: &TrackDefinition| match track.length() {
            GridLength::Auto => true,
            GridLength::Star(_) => !extent.is_finite(),
            GridLength::Absolute(_) => false,
        };

        let mut contributions = vec![0.0f32; tracks.len()];
        let mut spanning = Vec::new();

        for child in &self.children {
            let (start, span) = self.span_of(child.placement, axis);
            let desired = axis.extent(child.element.desired_size());
            if span == 1 {
                contributions[start] = contributions[start].max(desired);
            } else {
                spanning.push((start, span, desired));
            }
        }

        for (start, span, desired) in spanning {
            let range = start..start + span;
            let covered: f32 = range
                .clone()
                .map(|i| match tracks[i].length() {
                    GridLength::Absolute(value) => tracks[i].clamp(value),
                    _ if content_sized(&tracks[i]) => contributions[i],
                    _ => 0.0,
                })
                .sum::<f32>()
                + self.spacing(axis) * (span - 1) as f32;

            let receivers: Vec<usize> = range.filter(|&i| content_sized(&tracks[i])).collect();
            let deficit = desired - covered;
            if deficit > 0.0 && !receivers.is_empty() {
                let share = deficit / receivers.len() as f32;
                for i in receivers {
                    contributions[i] += share;
                }
            }
        }

        contributions
    }

    fn resolve_axis(&mut self, axis: GridAxis, extent: f32) -> f32 {
        let contributions = self.content_contributions(axis, extent);
        let spacing = self.spacing(axis);
        resolve_tracks(self.tracks_mut(axis), extent, &contributions, spacing)
    }

    /// Cell rectangle of a child relative to `origin`.
    fn cell_rect(&self, placement: GridPlacement, content: Rect) -> Rect {
        let (column, column_span) = self.span_of(placement, GridAxis::Columns);
        let (row, row_span) = self.span_of(placement, GridAxis::Rows);
        Rect::new(
            content.x + self.tracks(GridAxis::Columns)[column].offset(),
            content.y + self.tracks(GridAxis::Rows)[row].offset(),
            self.span_extent(GridAxis::Columns, column, column_span),
            self.span_extent(GridAxis::Rows, row, row_span),
        )
    }

    pub(crate) fn measure_override(&mut self, available: Size) -> Result<Size, LayoutError> {
        // First pass: fixed spans get their exact size, everything else the
        // whole extent.
        for index in 0..self.children.len() {
            let placement = self.children[index].placement;
            let (column, column_span) = self.span_of(placement, GridAxis::Columns);
            let (row, row_span) = self.span_of(placement, GridAxis::Rows);
            let constraint = Size::new(
                self.fixed_span_extent(GridAxis::Columns, column, column_span)
                    .unwrap_or(available.width),
                self.fixed_span_extent(GridAxis::Rows, row, row_span)
                    .unwrap_or(available.height),
            );
            self.children[index].element.measure(constraint)?;
        }

        let width = self.resolve_axis(GridAxis::Columns, available.width);
        let height = self.resolve_axis(GridAxis::Rows, available.height);

        // Second pass: children see the cell they actually got.
        for index in 0..self.children.len() {
            let cell = self.cell_rect(self.children[index].placement, Rect::zero());
            trace!(index, ?cell, "grid child cell");
            self.children[index].element.measure(cell.size())?;
        }

        Ok(Size::new(width, height))
    }

    pub(crate) fn arrange_override(&mut self, content: Rect) -> Result<Size, LayoutError> {
        self.resolve_axis(GridAxis::Columns, content.width);
        self.resolve_axis(GridAxis::Rows, content.height);

        for index in 0..self.children.len() {
            let cell = self.cell_rect(self.children[index].placement, content);
            self.children[index].element.arrange(cell)?;
        }

        Ok(content.size())
    }
}
