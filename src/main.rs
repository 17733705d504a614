//! Tracelens CLI
//!
//! Renders flame timelines and per-line cost tables from execution trace
//! files produced by an external tracing engine.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use tracelens::flame::{layout, render, FlameModel};
use tracelens::output::{read_export, render_svg, to_export, write_export, write_svg, SvgConfig};
use tracelens::trace::{normalize, read_trace_file};
use tracelens::utils::config::SCHEMA_VERSION;
use tracelens::utils::format_duration;

/// Tracelens - flame timelines for replayed execution traces
#[derive(Parser, Debug)]
#[command(name = "tracelens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a trace file into an SVG flame timeline
    Render {
        /// Path to the trace JSON file
        #[arg(short, long)]
        trace: PathBuf,

        /// Output path for the SVG timeline
        #[arg(short, long, default_value = "timeline.svg")]
        output: PathBuf,

        /// Also write the render model as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Timeline title
        #[arg(long)]
        title: Option<String>,

        /// Timeline width in pixels
        #[arg(long, default_value = "1200")]
        width: u32,

        /// Print a text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Print per-line cumulative costs for a trace file
    Lines {
        /// Path to the trace JSON file
        #[arg(short, long)]
        trace: PathBuf,

        /// Number of hottest lines to show
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// Validate a timeline export JSON file
    Validate {
        /// Path to the export JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Render {
            trace,
            output,
            json,
            title,
            width,
            summary,
        } => {
            execute_render(trace, output, json, title, width, summary)?;
        }

        Commands::Lines { trace, top } => {
            execute_lines(trace, top)?;
        }

        Commands::Validate { file } => {
            validate_export_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Run the full pipeline on a trace file and write outputs
///
/// **Private** - internal command implementation
fn execute_render(
    trace: PathBuf,
    output: PathBuf,
    json: Option<PathBuf>,
    title: Option<String>,
    width: u32,
    summary: bool,
) -> Result<()> {
    let events = read_trace_file(&trace)?;
    let model = layout(normalize(&events));
    let view = render(&model);

    let mut config = SvgConfig::new().with_width(width);
    if let Some(title) = title {
        config = config.with_title(title);
    }

    let svg = render_svg(&view, &config);
    write_svg(&svg, &output)?;
    println!("✓ Timeline written to {}", output.display());

    if let Some(json_path) = json {
        let export = to_export(&model, &view);
        write_export(&export, &json_path)?;
        println!("✓ Render model written to {}", json_path.display());
    }

    if summary {
        print_summary(&model);
    }

    Ok(())
}

/// Print the hottest blocks with durations and shares
///
/// **Private** - internal command implementation
fn print_summary(model: &FlameModel) {
    if model.is_empty() {
        println!("No profile data in trace.");
        return;
    }

    println!();
    println!("Total time: {}", format_duration(model.total_time));
    println!("{:<30} {:>12} {:>8}", "Block", "Duration", "%");

    let mut blocks: Vec<_> = model.blocks.iter().collect();
    blocks.sort_by(|a, b| b.duration.cmp(&a.duration));

    for block in blocks.iter().take(10) {
        let share = block.width_fraction(model.total_time) * 100.0;
        println!(
            "{:<30} {:>12} {:>7.1}%",
            block.display_name(),
            format_duration(block.duration),
            share
        );
    }
}

/// Print per-line cumulative costs, hottest first
///
/// **Private** - internal command implementation
fn execute_lines(trace: PathBuf, top: usize) -> Result<()> {
    let events = read_trace_file(&trace)?;
    let normalized = normalize(&events);

    if normalized.line_times.is_empty() {
        println!("No line timing data in trace.");
        return Ok(());
    }

    let mut lines: Vec<(u32, u64)> = normalized
        .line_times
        .iter()
        .filter(|(_, &ns)| ns > 0)
        .map(|(&line, &ns)| (line, ns))
        .collect();
    lines.sort_by(|a, b| b.1.cmp(&a.1));

    println!("{:<8} {:>12}", "Line", "Time");
    for (line, ns) in lines.iter().take(top) {
        println!("{:<8} {:>12}", line, format_duration(*ns));
    }

    Ok(())
}

/// Validate a timeline export JSON file
///
/// **Private** - internal command implementation
fn validate_export_file(file_path: PathBuf) -> Result<()> {
    println!("Validating export: {}", file_path.display());

    let export = read_export(&file_path)?;

    println!("✓ Valid timeline export");
    println!("  Version: {}", export.version);
    println!("  Total Time: {}", export.total_label);
    println!("  Blocks: {}", export.rects.len());
    println!("  Annotated Lines: {}", export.line_times.len());
    println!("  Placeholder: {}", export.placeholder);

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Tracelens Export Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string        - Schema version (e.g., '1.0.0')");
        println!("  total_time_ns: number  - Sum of included durations");
        println!("  total_label: string    - Formatted total time");
        println!("  placeholder: bool      - True when nothing was laid out");
        println!("  rects: array           - Paint-ready rectangles");
        println!("    left_pct: number     - Left edge, percent of width");
        println!("    width_pct: number    - Width, percent of width");
        println!("    bottom_px: number    - Offset from baseline");
        println!("    height_px: number    - Block height");
        println!("    hue: number          - Deterministic label hue");
        println!("    label: string        - Text, empty when suppressed");
        println!("    tooltip: string      - Hover text");
        println!("  line_times: object     - Line number -> nanoseconds");
        println!("  generated_at: string   - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Tracelens v{}", env!("CARGO_PKG_VERSION"));
    println!("Export Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Flame timelines and source overlays for replayed execution traces.");
}
