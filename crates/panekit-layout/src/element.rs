//! Layout elements and the base measure/arrange protocol.
//!
//! An [`Element`] carries the state every node shares (margin, padding,
//! alignment, size bounds, dirty flags, desired size, final frame) and an
//! [`ElementKind`] that decides how its content or children are sized.
//!
//! The base handles margins, padding, explicit sizes and alignment, so the
//! per-kind overrides only see the content area and only distribute space.
//!
//! Children are reachable mutably only through [`Element::kind_mut`] and the
//! typed `*_mut` accessors, which invalidate the element. Any change deep in
//! the tree therefore invalidates every ancestor on the way down.

use std::fmt;

use panekit_core::{Rect, Size, Thickness};
use panekit_viewhost::{NativePeer, PeerFactory, PeerId, PeerKind};
use serde::Serialize;
use tracing::trace;

use crate::{
    clamp_extent, validate_length, validate_max, Flyout, Grid, LayoutError, MenuFlyout,
    ProgressBar, StackPanel,
};

/// Placement of an element inside the slot its parent assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Start,
    Center,
    End,
    #[default]
    Stretch,
}

impl Alignment {
    /// Start coordinate of an extent of `size` inside `[start, start + available]`.
    fn place(self, start: f32, available: f32, size: f32) -> f32 {
        match self {
            Alignment::Start | Alignment::Stretch => start,
            Alignment::Center => start + (available - size) / 2.0,
            Alignment::End => start + available - size,
        }
    }
}

/// Whether an element takes part in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Measures to zero and occupies no space.
    Collapsed,
}

/// Leaf content with a fixed intrinsic size.
///
/// If the element has a native peer, the peer's measure hint wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Content {
    intrinsic: Size,
}

impl Content {
    pub fn new(intrinsic: Size) -> Result<Self, LayoutError> {
        let mut content = Self::default();
        content.set_intrinsic(intrinsic)?;
        Ok(content)
    }

    pub fn intrinsic(&self) -> Size {
        self.intrinsic
    }

    pub fn set_intrinsic(&mut self, size: Size) -> Result<(), LayoutError> {
        validate_length("Content.width", size.width)?;
        validate_length("Content.height", size.height)?;
        self.intrinsic = size;
        Ok(())
    }
}

/// The closed set of element kinds.
#[derive(Debug)]
pub enum ElementKind {
    Content(Content),
    StackPanel(StackPanel),
    Grid(Grid),
    Flyout(Flyout),
    MenuFlyout(MenuFlyout),
    ProgressBar(ProgressBar),
}

impl ElementKind {
    /// Peer kind requested from a [`PeerFactory`].
    pub fn peer_kind(&self) -> PeerKind {
        match self {
            ElementKind::Content(_) => PeerKind::Content,
            ElementKind::StackPanel(_) => PeerKind::StackPanel,
            ElementKind::Grid(_) => PeerKind::Grid,
            ElementKind::Flyout(_) => PeerKind::Flyout,
            ElementKind::MenuFlyout(_) => PeerKind::MenuFlyout,
            ElementKind::ProgressBar(_) => PeerKind::ProgressBar,
        }
    }

    pub fn name(&self) -> &'static str {
        self.peer_kind().name()
    }

    /// Direct children in layout order.
    pub fn children(&self) -> Vec<&Element> {
        match self {
            ElementKind::StackPanel(panel) => panel.children().iter().collect(),
            ElementKind::Grid(grid) => grid.children().iter().map(|c| &c.element).collect(),
            ElementKind::Flyout(flyout) => flyout.content().into_iter().collect(),
            ElementKind::Content(_) | ElementKind::MenuFlyout(_) | ElementKind::ProgressBar(_) => {
                Vec::new()
            }
        }
    }

    fn measure(
        &mut self,
        peer: Option<&mut Box<dyn NativePeer>>,
        available: Size,
    ) -> Result<Size, LayoutError> {
        match self {
            ElementKind::Content(content) => Ok(peer
                .and_then(|p| p.measure_hint(available))
                .unwrap_or(content.intrinsic)),
            ElementKind::StackPanel(panel) => panel.measure_override(available),
            ElementKind::Grid(grid) => grid.measure_override(available),
            ElementKind::Flyout(flyout) => flyout.measure_override(available),
            ElementKind::MenuFlyout(menu) => Ok(menu.measure_override(peer, available)),
            ElementKind::ProgressBar(bar) => Ok(bar.measure_override(peer, available)),
        }
    }

    fn arrange(&mut self, content: Rect) -> Result<Size, LayoutError> {
        match self {
            ElementKind::Content(_) | ElementKind::ProgressBar(_) => Ok(content.size()),
            ElementKind::StackPanel(panel) => panel.arrange_override(content),
            ElementKind::Grid(grid) => grid.arrange_override(content),
            ElementKind::Flyout(flyout) => flyout.arrange_override(content),
            ElementKind::MenuFlyout(menu) => Ok(menu.arrange_override(content)),
        }
    }
}

impl From<Content> for ElementKind {
    fn from(content: Content) -> Self {
        ElementKind::Content(content)
    }
}

impl From<StackPanel> for ElementKind {
    fn from(panel: StackPanel) -> Self {
        ElementKind::StackPanel(panel)
    }
}

impl From<Grid> for ElementKind {
    fn from(grid: Grid) -> Self {
        ElementKind::Grid(grid)
    }
}

impl From<Flyout> for ElementKind {
    fn from(flyout: Flyout) -> Self {
        ElementKind::Flyout(flyout)
    }
}

impl From<MenuFlyout> for ElementKind {
    fn from(menu: MenuFlyout) -> Self {
        ElementKind::MenuFlyout(menu)
    }
}

impl From<ProgressBar> for ElementKind {
    fn from(bar: ProgressBar) -> Self {
        ElementKind::ProgressBar(bar)
    }
}

/// Serializable view of an arranged tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub kind: &'static str,
    pub desired: Size,
    pub frame: Rect,
    pub children: Vec<LayoutSnapshot>,
}

/// A node taking part in measure and arrange.
pub struct Element {
    kind: ElementKind,
    peer: Option<Box<dyn NativePeer>>,

    margin: Thickness,
    padding: Thickness,
    horizontal_alignment: Alignment,
    vertical_alignment: Alignment,
    width: Option<f32>,
    height: Option<f32>,
    min_width: f32,
    min_height: f32,
    max_width: f32,
    max_height: f32,
    visibility: Visibility,

    desired_size: Size,
    render_size: Size,
    frame: Rect,

    measure_valid: bool,
    arrange_valid: bool,
    last_available: Option<Size>,
    last_slot: Option<Rect>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind)
            .field("peer", &self.peer_id())
            .field("desired_size", &self.desired_size)
            .field("frame", &self.frame)
            .field("measure_valid", &self.measure_valid)
            .field("arrange_valid", &self.arrange_valid)
            .finish_non_exhaustive()
    }
}

impl Element {
    pub fn new(kind: impl Into<ElementKind>) -> Self {
        Self {
            kind: kind.into(),
            peer: None,
            margin: Thickness::zero(),
            padding: Thickness::zero(),
            horizontal_alignment: Alignment::Stretch,
            vertical_alignment: Alignment::Stretch,
            width: None,
            height: None,
            min_width: 0.0,
            min_height: 0.0,
            max_width: f32::INFINITY,
            max_height: f32::INFINITY,
            visibility: Visibility::Visible,
            desired_size: Size::ZERO,
            render_size: Size::ZERO,
            frame: Rect::zero(),
            measure_valid: false,
            arrange_valid: false,
            last_available: None,
            last_slot: None,
        }
    }

    /// A leaf with the given intrinsic size.
    pub fn content(intrinsic: Size) -> Result<Self, LayoutError> {
        Ok(Self::new(Content::new(intrinsic)?))
    }

    /// Attach an already created native peer.
    pub fn with_peer(mut self, peer: Box<dyn NativePeer>) -> Self {
        self.peer = Some(peer);
        self.invalidate_measure();
        self
    }

    /// Ask `factory` for a peer matching this element's kind and attach it.
    pub fn realize(self, factory: &dyn PeerFactory) -> Result<Self, LayoutError> {
        let peer = factory.create_peer(self.kind.peer_kind())?;
        Ok(self.with_peer(peer))
    }

    pub fn with_margin(mut self, margin: Thickness) -> Result<Self, LayoutError> {
        self.set_margin(margin)?;
        Ok(self)
    }

    pub fn with_alignment(mut self, horizontal: Alignment, vertical: Alignment) -> Self {
        self.set_horizontal_alignment(horizontal);
        self.set_vertical_alignment(vertical);
        self
    }

    // ==================== Measure / Arrange ====================

    /// Compute the desired size under `available`.
    ///
    /// Components of `available` may be `+inf`. NaN or negative components
    /// are rejected. A repeated call with the same constraint is a no-op
    /// while the element is valid.
    pub fn measure(&mut self, available: Size) -> Result<(), LayoutError> {
        if available.has_nan() || available.has_negative() {
            return Err(LayoutError::InvalidConstraint {
                width: available.width,
                height: available.height,
            });
        }

        if self.measure_valid && self.last_available == Some(available) {
            trace!(kind = self.kind.name(), ?available, "measure skipped");
            return Ok(());
        }

        if self.visibility == Visibility::Collapsed {
            self.commit_measure(available, Size::ZERO);
            return Ok(());
        }

        let outer = available.deflate(self.margin);
        let bounded = Size::new(
            clamp_extent(self.width.unwrap_or(outer.width), self.min_width, self.max_width),
            clamp_extent(self.height.unwrap_or(outer.height), self.min_height, self.max_height),
        );

        let content = self
            .kind
            .measure(self.peer.as_mut(), bounded.deflate(self.padding))?;
        if content.has_nan() || content.has_negative() || !content.is_finite() {
            return Err(LayoutError::InvalidGeometry {
                width: content.width,
                height: content.height,
            });
        }

        let own = content.inflate(self.padding);
        let own = Size::new(
            clamp_extent(self.width.unwrap_or(own.width), self.min_width, self.max_width),
            clamp_extent(self.height.unwrap_or(own.height), self.min_height, self.max_height),
        );
        let desired = own.inflate(self.margin).min(available);

        trace!(kind = self.kind.name(), ?available, ?desired, "measured");
        self.commit_measure(available, desired);
        Ok(())
    }

    fn commit_measure(&mut self, available: Size, desired: Size) {
        self.desired_size = desired;
        self.measure_valid = true;
        self.last_available = Some(available);
        self.arrange_valid = false;
    }

    /// Place the element inside `slot` (parent coordinates).
    ///
    /// The element must have a valid measure. The resulting frame is pushed
    /// to the native peer, if any.
    pub fn arrange(&mut self, slot: Rect) -> Result<(), LayoutError> {
        let size = slot.size();
        if slot.x.is_nan() || slot.y.is_nan() || size.has_nan() || size.has_negative() || !size.is_finite() {
            return Err(LayoutError::InvalidConstraint {
                width: slot.width,
                height: slot.height,
            });
        }

        if !self.measure_valid {
            return Err(LayoutError::NotMeasured);
        }

        if self.arrange_valid && self.last_slot == Some(slot) {
            trace!(kind = self.kind.name(), ?slot, "arrange skipped");
            return Ok(());
        }

        if self.visibility == Visibility::Collapsed {
            return self.commit_arrange(slot, Rect::new(slot.x, slot.y, 0.0, 0.0));
        }

        let inner = slot.deflate(self.margin);
        let desired = self.desired_size.deflate(self.margin);

        let width = arranged_extent(
            self.horizontal_alignment,
            inner.width,
            desired.width,
            self.width,
            self.min_width,
            self.max_width,
        );
        let height = arranged_extent(
            self.vertical_alignment,
            inner.height,
            desired.height,
            self.height,
            self.min_height,
            self.max_height,
        );
        let x = self.horizontal_alignment.place(inner.x, inner.width, width);
        let y = self.vertical_alignment.place(inner.y, inner.height, height);

        let content = Rect::new(0.0, 0.0, width, height).deflate(self.padding);
        let used = self.kind.arrange(content)?.inflate(self.padding);

        self.commit_arrange(slot, Rect::new(x, y, used.width, used.height))
    }

    fn commit_arrange(&mut self, slot: Rect, frame: Rect) -> Result<(), LayoutError> {
        if let Some(peer) = self.peer.as_mut() {
            peer.apply_frame(frame)?;
        }
        trace!(kind = self.kind.name(), ?slot, ?frame, "arranged");
        self.frame = frame;
        self.render_size = frame.size();
        self.arrange_valid = true;
        self.last_slot = Some(slot);
        Ok(())
    }

    /// Force the next measure (and arrange) to run.
    pub fn invalidate_measure(&mut self) {
        self.measure_valid = false;
        self.arrange_valid = false;
    }

    /// Force the next arrange to run.
    pub fn invalidate_arrange(&mut self) {
        self.arrange_valid = false;
    }

    // ==================== Accessors ====================

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Mutable access to the kind; invalidates measure.
    pub fn kind_mut(&mut self) -> &mut ElementKind {
        self.invalidate_measure();
        &mut self.kind
    }

    pub fn stack_panel(&self) -> Option<&StackPanel> {
        match &self.kind {
            ElementKind::StackPanel(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn stack_panel_mut(&mut self) -> Option<&mut StackPanel> {
        match self.kind_mut() {
            ElementKind::StackPanel(panel) => Some(panel),
            _ => None,
        }
    }

    pub fn grid(&self) -> Option<&Grid> {
        match &self.kind {
            ElementKind::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    pub fn grid_mut(&mut self) -> Option<&mut Grid> {
        match self.kind_mut() {
            ElementKind::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    pub fn flyout(&self) -> Option<&Flyout> {
        match &self.kind {
            ElementKind::Flyout(flyout) => Some(flyout),
            _ => None,
        }
    }

    pub fn flyout_mut(&mut self) -> Option<&mut Flyout> {
        match self.kind_mut() {
            ElementKind::Flyout(flyout) => Some(flyout),
            _ => None,
        }
    }

    pub fn menu_flyout_mut(&mut self) -> Option<&mut MenuFlyout> {
        match self.kind_mut() {
            ElementKind::MenuFlyout(menu) => Some(menu),
            _ => None,
        }
    }

    pub fn progress_bar_mut(&mut self) -> Option<&mut ProgressBar> {
        match self.kind_mut() {
            ElementKind::ProgressBar(bar) => Some(bar),
            _ => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut Content> {
        match self.kind_mut() {
            ElementKind::Content(content) => Some(content),
            _ => None,
        }
    }

    pub fn peer_id(&self) -> Option<PeerId> {
        self.peer.as_ref().map(|p| p.id())
    }

    /// Size requested by the last measure, margin included.
    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    /// Size assigned by the last arrange, margin excluded.
    pub fn render_size(&self) -> Size {
        self.render_size
    }

    /// Final frame in parent coordinates, margin excluded.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn is_measure_valid(&self) -> bool {
        self.measure_valid
    }

    pub fn is_arrange_valid(&self) -> bool {
        self.arrange_valid
    }

    pub fn is_collapsed(&self) -> bool {
        self.visibility == Visibility::Collapsed
    }

    pub fn margin(&self) -> Thickness {
        self.margin
    }

    pub fn set_margin(&mut self, margin: Thickness) -> Result<(), LayoutError> {
        self.margin = validate_thickness("Element.margin", margin)?;
        self.invalidate_measure();
        Ok(())
    }

    pub fn padding(&self) -> Thickness {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Thickness) -> Result<(), LayoutError> {
        self.padding = validate_thickness("Element.padding", padding)?;
        self.invalidate_measure();
        Ok(())
    }

    pub fn horizontal_alignment(&self) -> Alignment {
        self.horizontal_alignment
    }

    pub fn set_horizontal_alignment(&mut self, alignment: Alignment) {
        if self.horizontal_alignment != alignment {
            self.horizontal_alignment = alignment;
            self.invalidate_arrange();
        }
    }

    pub fn vertical_alignment(&self) -> Alignment {
        self.vertical_alignment
    }

    pub fn set_vertical_alignment(&mut self, alignment: Alignment) {
        if self.vertical_alignment != alignment {
            self.vertical_alignment = alignment;
            self.invalidate_arrange();
        }
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    /// Explicit width, or `None` to size to content.
    pub fn set_width(&mut self, width: Option<f32>) -> Result<(), LayoutError> {
        self.width = width.map(|w| validate_length("Element.width", w)).transpose()?;
        self.invalidate_measure();
        Ok(())
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    /// Explicit height, or `None` to size to content.
    pub fn set_height(&mut self, height: Option<f32>) -> Result<(), LayoutError> {
        self.height = height.map(|h| validate_length("Element.height", h)).transpose()?;
        self.invalidate_measure();
        Ok(())
    }

    pub fn set_min_width(&mut self, value: f32) -> Result<(), LayoutError> {
        self.min_width = validate_length("Element.min_width", value)?;
        self.invalidate_measure();
        Ok(())
    }

    pub fn set_min_height(&mut self, value: f32) -> Result<(), LayoutError> {
        self.min_height = validate_length("Element.min_height", value)?;
        self.invalidate_measure();
        Ok(())
    }

    pub fn set_max_width(&mut self, value: f32) -> Result<(), LayoutError> {
        self.max_width = validate_max("Element.max_width", value)?;
        self.invalidate_measure();
        Ok(())
    }

    pub fn set_max_height(&mut self, value: f32) -> Result<(), LayoutError> {
        self.max_height = validate_max("Element.max_height", value)?;
        self.invalidate_measure();
        Ok(())
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.invalidate_measure();
        }
    }

    /// Capture the arranged tree.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            kind: self.kind.name(),
            desired: self.desired_size,
            frame: self.frame,
            children: self.kind.children().into_iter().map(Element::snapshot).collect(),
        }
    }
}

/// Extent along one axis after alignment and size bounds.
fn arranged_extent(
    alignment: Alignment,
    available: f32,
    desired: f32,
    explicit: Option<f32>,
    min: f32,
    max: f32,
) -> f32 {
    let natural = match alignment {
        Alignment::Stretch => available,
        _ => desired.min(available),
    };
    clamp_extent(explicit.unwrap_or(natural), min, max)
}

fn validate_thickness(property: &'static str, edges: Thickness) -> Result<Thickness, LayoutError> {
    if edges.is_valid() {
        return Ok(edges);
    }
    // report the first offending edge
    for value in [edges.left, edges.top, edges.right, edges.bottom] {
        validate_length(property, value)?;
    }
    Ok(edges)
}
