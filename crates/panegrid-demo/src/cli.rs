use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use panegrid_core::{Grid, PaneSwitcher, SwitcherConfig, Viewport};
use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::replay::Replay;
use crate::script::Script;

#[derive(Debug, Parser)]
#[command(
    name = "panegrid-demo",
    about = "Replay a gesture script against a grid pane switcher",
    version
)]
pub struct Cli {
    /// Number of panes.
    #[arg(long, default_value_t = 9)]
    pub panes: usize,

    /// Number of rows; must divide the pane count.
    #[arg(long, default_value_t = 3)]
    pub rows: usize,

    /// Viewport width.
    #[arg(long, default_value_t = 360.0)]
    pub width: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 640.0)]
    pub height: f64,

    /// Pane shown before the first step.
    #[arg(long, default_value_t = 0)]
    pub start: usize,

    /// Tuning file (`.json` for JSON, TOML otherwise).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gesture script; the built-in tour when omitted.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Write a JSON-lines trace of every event and frame to stdout.
    #[arg(long)]
    pub json: bool,

    /// Settle onto the nearest pane when a drag is cancelled.
    #[arg(long = "settle-on-cancel")]
    pub settle_on_cancel: bool,

    /// Print the effective configuration as TOML and exit.
    #[arg(long = "print-config")]
    pub print_config: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run(cli)
}

/// Install the stderr subscriber; `RUST_LOG` overrides the `info` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber already installed by the embedding process wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

pub fn run_with_output(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(&cli)?;
    if cli.print_config {
        match config.to_toml_string() {
            Ok(text) => write!(out, "{text}")?,
            Err(err) => tracing::warn!(error = %err, "could not render configuration"),
        }
        return Ok(());
    }

    let script = match &cli.script {
        Some(path) => Script::from_file(path)?,
        None => Script::builtin(),
    };

    let grid = Grid::new(cli.panes, cli.rows)?;
    let viewport = Viewport::new(cli.width, cli.height)?;
    let switcher = PaneSwitcher::new(grid, viewport, config)?.with_initial_pane(cli.start);
    tracing::info!(
        panes = cli.panes,
        rows = cli.rows,
        columns = grid.columns(),
        start = switcher.active_pane(),
        steps = script.steps.len(),
        "replay starting"
    );

    let summary = if cli.json {
        let summary = Replay::new(switcher).with_trace(out).run(&script)?;
        tracing::info!(summary = %serde_json::to_string(&summary)?, "replay finished");
        summary
    } else {
        let summary = Replay::new(switcher).run(&script)?;
        writeln!(out, "steps:    {}", summary.steps)?;
        writeln!(out, "frames:   {}", summary.frames)?;
        writeln!(out, "switches: {:?}", summary.switches)?;
        writeln!(
            out,
            "final:    pane {} at ({}, {})",
            summary.final_pane, summary.final_offset[0], summary.final_offset[1]
        )?;
        summary
    };
    tracing::debug!(final_pane = summary.final_pane, "done");
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SwitcherConfig> {
    let mut config = match &cli.config {
        Some(path) if is_json(path) => SwitcherConfig::from_json_file(path)?,
        Some(path) => SwitcherConfig::from_toml_file(path)?,
        None => SwitcherConfig::default(),
    };
    if cli.settle_on_cancel {
        config = config.with_settle_on_cancel(true);
    }
    Ok(config.validated()?)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
