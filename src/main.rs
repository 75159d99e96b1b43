//! CLI entry point for reactive-dashboard
//!
//! Provides commands for validating layout files, printing their outline,
//! running the built-in dashboards against scripted input events, and
//! exporting a dashboard layout as JSON.

use clap::{Parser, Subcommand};
use colored::*;
use reactive_dashboard::config::{read_layout, write_page, DashboardConfig, PageFile, Theme};
use reactive_dashboard::core::{ComponentTree, TreeBuilder};
use reactive_dashboard::data::DatasetSource;
use reactive_dashboard::ui::builders::layout_spec;
use reactive_dashboard::ui::{render_tree, run_lines, AppContext, ConsoleSink, OutputSink, Variant};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "reactive-dashboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and validate a layout file
    Check {
        /// Path to a JSON layout file
        #[arg(short, long)]
        layout: PathBuf,

        /// Dataset available to charts and tables, as NAME=LOCATION
        #[arg(short, long = "dataset", value_parser = parse_dataset_arg)]
        datasets: Vec<(String, String)>,
    },

    /// Print the outline of a layout file
    Tree {
        /// Path to a JSON layout file
        #[arg(short, long)]
        layout: PathBuf,

        /// Dataset available to charts and tables, as NAME=LOCATION
        #[arg(short, long = "dataset", value_parser = parse_dataset_arg)]
        datasets: Vec<(String, String)>,
    },

    /// Run a built-in dashboard against input events
    Demo {
        /// Dashboard to run (bar or full)
        #[arg(short, long, default_value = "bar")]
        variant: Variant,

        /// Path to a TOML dashboard config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Input event, as `node-id.property = value`
        #[arg(short, long = "event")]
        events: Vec<String>,

        /// Also read events from standard input, one per line
        #[arg(long)]
        stdin: bool,
    },

    /// Write a built-in dashboard layout and its page settings as JSON
    Export {
        /// Dashboard to export (bar or full)
        #[arg(short, long, default_value = "bar")]
        variant: Variant,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        /// Path to a TOML dashboard config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { layout, datasets } => check_layout(&layout, &datasets)?,
        Commands::Tree { layout, datasets } => {
            let tree = build_layout(&layout, &datasets)?;
            print!("{}", render_tree(&tree));
        }
        Commands::Demo {
            variant,
            config,
            events,
            stdin,
        } => run_demo(variant, config.as_deref(), &events, stdin)?,
        Commands::Export {
            variant,
            output,
            config,
        } => export_layout(variant, &output, config.as_deref())?,
    }

    Ok(())
}

/// Splits `NAME=LOCATION`
fn parse_dataset_arg(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, location)) if !name.trim().is_empty() && !location.trim().is_empty() => {
            Ok((name.trim().to_string(), location.trim().to_string()))
        }
        _ => Err(format!("expected NAME=LOCATION, got '{}'", arg)),
    }
}

/// Expands a leading `~` in a user-supplied path
fn expand(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Loads the config file, or the variant's default look without one
fn load_config(path: Option<&Path>, variant: Variant) -> anyhow::Result<DashboardConfig> {
    match path {
        Some(path) => {
            let path = expand(path)?;
            println!("{} Loading config: {}", "→".cyan(), path.display());
            Ok(DashboardConfig::load(&path)?)
        }
        None => Ok(DashboardConfig {
            theme: Theme::preset(variant.theme_name()).unwrap_or_default(),
            ..DashboardConfig::default()
        }),
    }
}

/// Reads a layout file and builds it against the given datasets
fn build_layout(layout: &Path, datasets: &[(String, String)]) -> anyhow::Result<ComponentTree> {
    let path = expand(layout)?;
    let spec = read_layout(&path)?;

    let mut builder = TreeBuilder::new();
    for (name, location) in datasets {
        let data = DatasetSource::locate(location).load()?;
        builder = builder.dataset(name.clone(), data);
    }

    Ok(builder.build(&spec)?)
}

/// Validates a layout file and lists its addressable nodes
fn check_layout(layout: &Path, datasets: &[(String, String)]) -> anyhow::Result<()> {
    println!("{} Checking layout: {}", "→".cyan(), layout.display());

    let tree = match build_layout(layout, datasets) {
        Ok(tree) => tree,
        Err(e) => {
            println!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let ids = tree.ids();
    println!(
        "{} {} nodes, {} with an id",
        "✓".green(),
        tree.node_count(),
        ids.len()
    );
    for id in ids {
        let kind = tree.get(id.as_str()).map(|node| node.kind().to_string());
        println!(
            "  {} {}",
            id.as_str().cyan(),
            kind.unwrap_or_default().dimmed()
        );
    }
    println!("\n{} {}", "✓".green().bold(), "Layout is valid".bold());

    Ok(())
}

/// Starts a dashboard, feeds it events and prints what changed
fn run_demo(
    variant: Variant,
    config: Option<&Path>,
    events: &[String],
    stdin: bool,
) -> anyhow::Result<()> {
    let config = load_config(config, variant)?;
    let mut ctx = AppContext::from_variant(config, variant)?;
    println!(
        "{} {} dashboard: {} nodes, {} rules",
        "✓".green(),
        variant.to_string().bold(),
        ctx.tree().node_count(),
        ctx.registry().len()
    );

    let mut sink = ConsoleSink;
    let initial = ctx.start()?;
    sink.deliver(&initial);

    let scripted = run_lines(&mut ctx, Cursor::new(events.join("\n")), &mut sink)?;
    let mut skipped = scripted.skipped;
    if stdin {
        skipped += run_lines(&mut ctx, io::stdin().lock(), &mut sink)?.skipped;
    }

    println!("\n{}", "Outline:".bold());
    print!("{}", ctx.outline());

    let report = ctx.shutdown();
    println!(
        "\n{} {} events, {} changes, {} failures",
        "✓".green(),
        report.events,
        report.changes,
        report.failures
    );
    if skipped > 0 {
        println!("{} Skipped {} invalid events", "⚠".yellow(), skipped);
    }

    Ok(())
}

/// Writes a dashboard layout and its page settings to a JSON file
fn export_layout(variant: Variant, output: &Path, config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config, variant)?;
    let output = expand(output)?;

    let page = PageFile::new(&config, layout_spec(&config, variant)?);
    write_page(&output, &page)?;
    println!(
        "{} Wrote {} layout to {}",
        "✓".green(),
        variant,
        output.display()
    );

    Ok(())
}
