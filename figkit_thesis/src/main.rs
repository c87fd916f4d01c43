// Copyright 2025 the Figkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `figkit`: renders the thesis figures to SVG and HTML, optionally after scripted events.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use figkit_data::FsSource;
use figkit_thesis::{Page, RenderConfig, ScriptedEvent, panel_svg, render_page, thesis_figures};
use tracing_subscriber::EnvFilter;

/// Milliseconds between two scripted events; long enough for every transition to finish.
const EVENT_SPACING_MS: f64 = 2000.0;

#[derive(Parser, Debug)]
#[command(name = "figkit")]
#[command(version)]
#[command(about = "Render the rescoring thesis figures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every figure and write one SVG per panel plus `index.html`.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON config file; absent fields keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the `figNN/` data folders (overrides the config)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output directory (overrides the config)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Scripted interaction, e.g. `fig04:select:mixture-comet=B`; repeatable
    #[arg(short, long = "event")]
    events: Vec<ScriptedEvent>,

    /// Write the state at the moment of the last event instead of settling transitions
    #[arg(long)]
    no_settle: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render(args) => render(&args),
    }
}

fn load_config(args: &RenderArgs) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            RenderConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    if let Some(data) = &args.data {
        config.data_dir.clone_from(data);
    }
    if let Some(out) = &args.out {
        config.out_dir.clone_from(out);
    }
    Ok(config)
}

fn render(args: &RenderArgs) -> Result<()> {
    let config = load_config(args)?;
    let source = FsSource::new(&config.data_dir);
    let mut page = Page::new(thesis_figures(&config));

    let ready = page.load_all(&source, 0.0);
    tracing::info!(ready, data = %config.data_dir.display(), "figures loaded");

    let mut now = 0.0;
    for event in &args.events {
        now += EVENT_SPACING_MS;
        page.advance(now);
        if let Err(err) = page.run_script(event, &source, now) {
            tracing::warn!(figure = %event.figure, error = %err, "scripted event failed");
        }
    }
    if args.no_settle {
        page.advance(now);
    } else {
        page.settle();
    }

    write_outputs(&page, &config.out_dir)
}

fn write_outputs(page: &Page, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let mut written = 0_usize;
    for figure in page.figures() {
        for panel in figure.panels().into_iter().filter(|p| p.is_rendered()) {
            let path = out_dir.join(format!("{}-{}.svg", figure.id(), panel.name));
            fs::write(&path, panel_svg(panel))
                .with_context(|| format!("writing {}", path.display()))?;
            written += 1;
        }
    }
    let index = out_dir.join("index.html");
    fs::write(&index, render_page("Rescoring peptide identifications", page))
        .with_context(|| format!("writing {}", index.display()))?;
    tracing::info!(svgs = written, out = %out_dir.display(), "wrote figures");
    Ok(())
}
