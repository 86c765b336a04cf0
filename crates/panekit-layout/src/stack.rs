//! Stack panel: children laid out in a single line.
//!
//! Measure walks children in order and hands each one the space the
//! previous children left along the stack axis; earlier children get first
//! claim. Arrange places children back to back, each as long as its desired
//! size along the stack axis and as wide as the panel across it.

use panekit_core::{Point, Rect, Size, Thickness};
use tracing::trace;

use crate::{Element, LayoutError};

/// Stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The perpendicular orientation.
    pub fn cross(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    /// Extent of `size` along the stack axis.
    pub fn main(self, size: Size) -> f32 {
        match self {
            Orientation::Vertical => size.height,
            Orientation::Horizontal => size.width,
        }
    }

    /// Extent of `size` across the stack axis.
    pub fn cross_extent(self, size: Size) -> f32 {
        self.cross().main(size)
    }

    /// Build a size from stack-axis and cross-axis extents.
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Orientation::Vertical => Size::new(cross, main),
            Orientation::Horizontal => Size::new(main, cross),
        }
    }

    /// Offset `origin` by `main` along the stack axis.
    fn advance(self, origin: Point, main: f32) -> Point {
        match self {
            Orientation::Vertical => Point::new(origin.x, origin.y + main),
            Orientation::Horizontal => Point::new(origin.x + main, origin.y),
        }
    }

    /// Sum of the two edges lying on the stack axis.
    fn edges(self, edges: Thickness) -> f32 {
        match self {
            Orientation::Vertical => edges.vertical(),
            Orientation::Horizontal => edges.horizontal(),
        }
    }
}

/// Panel stacking its children vertically or horizontally.
#[derive(Debug, Default)]
pub struct StackPanel {
    orientation: Orientation,
    children: Vec<Element>,
}

impl StackPanel {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            children: Vec::new(),
        }
    }

    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn remove(&mut self, index: usize) -> Option<Element> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    pub(crate) fn measure_override(&mut self, available: Size) -> Result<Size, LayoutError> {
        let axis = self.orientation;
        let cross_available = axis.cross_extent(available);
        let mut remaining = axis.main(available);
        let mut main_total: f32 = 0.0;
        let mut cross_max: f32 = 0.0;

        for (index, child) in self.children.iter_mut().enumerate() {
            child.measure(axis.size(remaining, cross_available))?;
            let desired = child.desired_size();

            main_total += axis.main(desired);
            cross_max = cross_max.max(axis.cross_extent(desired)).min(cross_available);
            remaining = (remaining - axis.main(desired)).max(0.0);

            trace!(index, ?desired, remaining, "stack child measured");
        }

        Ok(axis.size(main_total, cross_max))
    }

    pub(crate) fn arrange_override(&mut self, content: Rect) -> Result<Size, LayoutError> {
        let axis = self.orientation;
        let cross = axis.cross_extent(content.size());
        let mut location = content.location();
        let mut remaining = axis.main(content.size());

        for (index, child) in self.children.iter_mut().enumerate() {
            let slot_size = axis.size(axis.main(child.desired_size()), cross);
            child.arrange(Rect::from_parts(location, slot_size))?;
            if child.is_collapsed() {
                continue;
            }

            let step = axis.main(child.render_size()) + axis.edges(child.margin());
            location = axis.advance(location, step);
            remaining = (remaining - step).max(0.0);

            trace!(index, frame = ?child.frame(), remaining, "stack child arranged");
        }

        Ok(content.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Alignment;

    fn leaf(width: f32, height: f32) -> Element {
        Element::content(Size::new(width, height)).unwrap()
    }

    fn stack(orientation: Orientation, children: Vec<Element>) -> Element {
        Element::new(StackPanel::new(orientation).with_children(children))
    }

    #[test]
    fn test_vertical_measure_sums_heights() {
        let mut panel = stack(
            Orientation::Vertical,
            vec![leaf(40.0, 10.0), leaf(70.0, 20.0), leaf(10.0, 30.0)],
        );

        panel.measure(Size::new(f32::INFINITY, f32::INFINITY)).unwrap();
        assert_eq!(panel.desired_size(), Size::new(70.0, 60.0));
    }

    #[test]
    fn test_vertical_arrange_offsets() {
        let mut panel = stack(
            Orientation::Vertical,
            vec![leaf(40.0, 10.0), leaf(70.0, 20.0), leaf(10.0, 30.0)],
        );

        panel.measure(Size::INFINITE).unwrap();
        panel.arrange(Rect::new(0.0, 0.0, 100.0, 60.0)).unwrap();

        let frames: Vec<Rect> = panel
            .stack_panel()
            .unwrap()
            .children()
            .iter()
            .map(Element::frame)
            .collect();
        assert_eq!(
            frames,
            vec![
                Rect::new(0.0, 0.0, 100.0, 10.0),
                Rect::new(0.0, 10.0, 100.0, 20.0),
                Rect::new(0.0, 30.0, 100.0, 30.0),
            ]
        );
        assert_eq!(panel.render_size(), Size::new(100.0, 60.0));
    }

    #[test]
    fn test_horizontal_mirrors_vertical() {
        let mut panel = stack(
            Orientation::Horizontal,
            vec![leaf(10.0, 40.0), leaf(20.0, 70.0), leaf(30.0, 10.0)],
        );

        panel.measure(Size::INFINITE).unwrap();
        assert_eq!(panel.desired_size(), Size::new(60.0, 70.0));

        panel.arrange(Rect::new(0.0, 0.0, 60.0, 100.0)).unwrap();
        let xs: Vec<f32> = panel
            .stack_panel()
            .unwrap()
            .children()
            .iter()
            .map(|c| c.frame().x)
            .collect();
        assert_eq!(xs, vec![0.0, 10.0, 30.0]);
        assert!(panel
            .stack_panel()
            .unwrap()
            .children()
            .iter()
            .all(|c| c.frame().height == 100.0));
    }

    #[test]
    fn test_cross_axis_is_capped_by_constraint() {
        let mut panel = stack(Orientation::Vertical, vec![leaf(500.0, 10.0)]);
        panel.measure(Size::new(120.0, f32::INFINITY)).unwrap();
        assert_eq!(panel.desired_size(), Size::new(120.0, 10.0));
    }

    #[test]
    fn test_earlier_children_claim_space_first() {
        let mut panel = stack(Orientation::Vertical, vec![leaf(10.0, 80.0), leaf(10.0, 80.0)]);
        panel.measure(Size::new(100.0, 100.0)).unwrap();

        let children = panel.stack_panel().unwrap().children();
        assert_eq!(children[0].desired_size().height, 80.0);
        // only 20 left for the second child
        assert_eq!(children[1].desired_size().height, 20.0);
    }

    #[test]
    fn test_margins_advance_the_cursor() {
        let spaced = leaf(10.0, 10.0)
            .with_margin(Thickness::new(0.0, 5.0, 0.0, 5.0))
            .unwrap();
        let mut panel = stack(Orientation::Vertical, vec![spaced, leaf(10.0, 10.0)]);

        panel.measure(Size::INFINITE).unwrap();
        assert_eq!(panel.desired_size().height, 30.0);

        panel.arrange(Rect::new(0.0, 0.0, 50.0, 30.0)).unwrap();
        let children = panel.stack_panel().unwrap().children();
        assert_eq!(children[0].frame(), Rect::new(0.0, 5.0, 50.0, 10.0));
        assert_eq!(children[0].render_size().height, 10.0);
        assert_eq!(children[1].frame().y, 20.0);
    }

    #[test]
    fn test_cross_alignment_of_children() {
        let narrow = leaf(20.0, 10.0).with_alignment(Alignment::End, Alignment::Stretch);
        let mut panel = stack(Orientation::Vertical, vec![narrow]);

        panel.measure(Size::new(100.0, 100.0)).unwrap();
        panel.arrange(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();

        let child = &panel.stack_panel().unwrap().children()[0];
        assert_eq!(child.frame(), Rect::new(80.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_padding_offsets_children() {
        let mut panel = stack(Orientation::Vertical, vec![leaf(10.0, 10.0)]);
        panel.set_padding(Thickness::uniform(4.0)).unwrap();

        panel.measure(Size::INFINITE).unwrap();
        assert_eq!(panel.desired_size(), Size::new(18.0, 18.0));

        panel.arrange(Rect::new(0.0, 0.0, 18.0, 18.0)).unwrap();
        let child = &panel.stack_panel().unwrap().children()[0];
        assert_eq!(child.frame(), Rect::new(4.0, 4.0, 10.0, 10.0));
    }

    #[test]
    fn test_orientation_change_forces_remeasure() {
        let mut panel = stack(Orientation::Vertical, vec![leaf(10.0, 20.0), leaf(10.0, 20.0)]);
        panel.measure(Size::INFINITE).unwrap();
        assert_eq!(panel.desired_size(), Size::new(10.0, 40.0));

        panel
            .stack_panel_mut()
            .unwrap()
            .set_orientation(Orientation::Horizontal);
        assert!(!panel.is_measure_valid());

        panel.measure(Size::INFINITE).unwrap();
        assert_eq!(panel.desired_size(), Size::new(20.0, 20.0));
    }

    #[test]
    fn test_collapsed_child_is_skipped() {
        let mut hidden = leaf(10.0, 50.0);
        hidden.set_visibility(crate::Visibility::Collapsed);
        let mut panel = stack(Orientation::Vertical, vec![hidden, leaf(10.0, 10.0)]);

        panel.measure(Size::INFINITE).unwrap();
        assert_eq!(panel.desired_size().height, 10.0);

        panel.arrange(Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(panel.stack_panel().unwrap().children()[1].frame().y, 0.0);
    }

    #[test]
    fn test_empty_panel_measures_to_zero() {
        let mut panel = stack(Orientation::Horizontal, Vec::new());
        panel.measure(Size::new(100.0, 100.0)).unwrap();
        assert_eq!(panel.desired_size(), Size::ZERO);
    }
}
