//! Layout root: owns the configuration and drives full layout passes.

use panekit_core::{Point, Rect, Size};
use tracing::info;

use crate::{
    validate_length, Element, Grid, LayoutError, MenuFlyout, MenuItem, ProgressBar, Theme,
    TrackDefinition,
};

/// Layout configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Size of the area the root element is laid out in.
    pub viewport: Size,
    /// Default gap between grid columns.
    pub column_spacing: f32,
    /// Default gap between grid rows.
    pub row_spacing: f32,
    /// Theme passed to controls built through the host.
    pub theme: Theme,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            column_spacing: 0.0,
            row_spacing: 0.0,
            theme: Theme::default(),
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<(), LayoutError> {
        validate_length("LayoutConfig.viewport.width", self.viewport.width)?;
        validate_length("LayoutConfig.viewport.height", self.viewport.height)?;
        validate_length("LayoutConfig.column_spacing", self.column_spacing)?;
        validate_length("LayoutConfig.row_spacing", self.row_spacing)?;
        self.theme.validate()
    }
}

/// Runs measure and arrange for a root element.
#[derive(Debug)]
pub struct LayoutHost {
    config: LayoutConfig,
    passes: u64,
}

impl LayoutHost {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config, passes: 0 })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    /// Number of completed layout passes.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn resize(&mut self, viewport: Size) -> Result<(), LayoutError> {
        validate_length("LayoutConfig.viewport.width", viewport.width)?;
        validate_length("LayoutConfig.viewport.height", viewport.height)?;
        self.config.viewport = viewport;
        Ok(())
    }

    /// Measure `root` against the viewport and arrange it to fill it.
    pub fn update_layout(&mut self, root: &mut Element) -> Result<Size, LayoutError> {
        let viewport = self.config.viewport;
        let _span = tracing::info_span!("update_layout", ?viewport).entered();

        root.measure(viewport)?;
        root.arrange(Rect::from_parts(Point::ORIGIN, viewport))?;
        self.passes += 1;

        info!(
            pass = self.passes,
            desired = ?root.desired_size(),
            frame = ?root.frame(),
            "layout updated"
        );
        Ok(root.render_size())
    }

    /// A grid using the configured spacing.
    pub fn grid(
        &self,
        columns: impl IntoIterator<Item = TrackDefinition>,
        rows: impl IntoIterator<Item = TrackDefinition>,
    ) -> Result<Grid, LayoutError> {
        Grid::new()
            .with_columns(columns)
            .with_rows(rows)
            .with_spacing(self.config.column_spacing, self.config.row_spacing)
    }

    /// A menu flyout with buttons for `labels`; `None` entries become separators.
    pub fn menu<'a>(&self, labels: impl IntoIterator<Item = Option<&'a str>>) -> MenuFlyout {
        let theme = &self.config.theme;
        MenuFlyout::new(theme).with_items(labels.into_iter().map(|label| match label {
            Some(text) => MenuItem::button(text, theme),
            None => MenuItem::separator(),
        }))
    }

    pub fn progress_bar(&self) -> ProgressBar {
        ProgressBar::new(&self.config.theme)
    }
}

/// Builder for [`LayoutHost`].
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: LayoutConfig,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.config.viewport = Size::new(width, height);
        self
    }

    pub fn spacing(mut self, column: f32, row: f32) -> Self {
        self.config.column_spacing = column;
        self.config.row_spacing = row;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn build(self) -> Result<LayoutHost, LayoutError> {
        LayoutHost::new(self.config)
    }
}
