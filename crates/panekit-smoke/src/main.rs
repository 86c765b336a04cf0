//! panekit smoke harness
//!
//! Builds a small application shell (sidebar, content grid, popup menu,
//! progress bar) on headless native peers, replays a scripted sequence of
//! viewport resizes and dumps the final arranged tree as JSON.

use anyhow::Context;
use panekit_layout::{
    Alignment, Content, Element, Flyout, GridPlacement, LayoutBuilder, LayoutHost, Size,
    StackPanel, Theme, Thickness, TrackDefinition,
};
use panekit_viewhost::{HeadlessPeerFactory, PeerKind};
use tracing::{info, warn};

/// Parse command line arguments
struct Args {
    width: f32,
    height: f32,
    theme_file: Option<String>,
    dump: Option<String>,
    steps: u32,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let mut width = 1100.0f32;
        let mut height = 640.0f32;
        let mut theme_file = None;
        let mut dump = None;
        let mut steps = 30u32;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => {
                    if let Some(val) = args.next() {
                        width = val.parse().unwrap_or(1100.0);
                    }
                }
                "--height" => {
                    if let Some(val) = args.next() {
                        height = val.parse().unwrap_or(640.0);
                    }
                }
                "--steps" => {
                    if let Some(val) = args.next() {
                        steps = val.parse().unwrap_or(30);
                    }
                }
                "--theme" => {
                    theme_file = args.next();
                }
                "--dump" => {
                    dump = args.next();
                }
                other => warn!(arg = other, "ignoring unknown argument"),
            }
        }

        Self {
            width,
            height,
            theme_file,
            dump,
            steps,
        }
    }

    /// Load the theme from file or fall back to the default one.
    fn load_theme(&self) -> anyhow::Result<Theme> {
        match &self.theme_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading theme {path}"))?;
                Ok(Theme::from_json(&json)?)
            }
            None => Ok(Theme::default()),
        }
    }
}

fn build_shell(host: &LayoutHost, factory: &HeadlessPeerFactory) -> anyhow::Result<Element> {
    let mut grid = host.grid(
        [
            TrackDefinition::absolute(220.0)?.with_min(120.0)?,
            TrackDefinition::star(1.0)?,
        ],
        [
            TrackDefinition::absolute(40.0)?,
            TrackDefinition::star(1.0)?,
            TrackDefinition::auto(),
        ],
    )?;

    let toolbar = StackPanel::horizontal().with_children(
        (0..4)
            .map(|_| Element::new(Content::default()).realize(factory))
            .collect::<Result<Vec<_>, _>>()?,
    );
    grid.add_child(
        Element::new(toolbar).realize(factory)?,
        GridPlacement::span(0, 0, 1, 2),
    );

    let mut sidebar = Element::new(StackPanel::vertical()).realize(factory)?;
    sidebar.set_padding(Thickness::uniform(6.0))?;
    if let Some(panel) = sidebar.stack_panel_mut() {
        for _ in 0..6 {
            panel.push(Element::new(Content::default()).realize(factory)?);
        }
    }
    grid.add_child(sidebar, GridPlacement::cell(1, 0));

    let menu = Element::new(host.menu([Some("New"), Some("Open"), None, Some("Quit")]))
        .with_alignment(Alignment::Start, Alignment::Start)
        .realize(factory)?;
    let popup = Element::new(Flyout::with_content(menu))
        .with_alignment(Alignment::End, Alignment::Start)
        .realize(factory)?;
    grid.add_child(popup, GridPlacement::cell(1, 1));

    let mut progress = host.progress_bar();
    progress.set_value(42.0)?;
    let mut status = Element::new(progress).realize(factory)?;
    status.set_margin(Thickness::new(8.0, 4.0, 8.0, 4.0))?;
    grid.add_child(status, GridPlacement::span(2, 0, 1, 2));

    Ok(Element::new(grid).realize(factory)?)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!(
        width = args.width,
        height = args.height,
        theme = ?args.theme_file,
        dump = ?args.dump,
        steps = args.steps,
        "Starting panekit smoke harness"
    );

    let theme = args.load_theme()?;
    let mut host = LayoutBuilder::new()
        .viewport(args.width, args.height)
        .spacing(4.0, 4.0)
        .theme(theme)
        .build()?;

    let factory = HeadlessPeerFactory::new()
        .with_hint(PeerKind::Content, Size::new(96.0, 28.0))
        .with_hint(PeerKind::MenuFlyout, Size::new(180.0, 110.0));
    let mut root = build_shell(&host, &factory)?;

    host.update_layout(&mut root)?;

    // Scripted resize: shrink the viewport, then grow it back
    for step in 0..args.steps {
        let t = step as f32 / args.steps.max(1) as f32;
        let shrink = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
        let viewport = Size::new(
            (args.width * (1.0 - 0.5 * shrink)).max(1.0),
            (args.height * (1.0 - 0.3 * shrink)).max(1.0),
        );
        host.resize(viewport)?;
        host.update_layout(&mut root)?;
    }

    host.resize(Size::new(args.width, args.height))?;
    host.update_layout(&mut root)?;

    info!(
        passes = host.passes(),
        frames_applied = factory.log().len(),
        "Smoke run complete"
    );

    let snapshot = serde_json::to_string_pretty(&root.snapshot())?;
    match &args.dump {
        Some(path) => {
            std::fs::write(path, snapshot).with_context(|| format!("writing {path}"))?;
            info!(%path, "Layout snapshot written");
        }
        None => println!("{snapshot}"),
    }

    Ok(())
}
