use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sortscope_config::{SortscopeConfig, load_config, save_config};
use sortscope_datagen::DataGenerator;
use sortscope_engine::{PerformanceReport, SortSummary, Workbench, WorkbenchConfig};
use sortscope_error::ContainerError;
use sortscope_logging::{LogLevel, Logger};
use sortscope_render::{LayoutOptions, layout_tree, render_rows, render_tree};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sortscope")]
#[command(about = "Compare search and sort comparison counts across arrays, linked lists and a BST.", long_about = None)]
struct Cli {
    /// YAML or JSON config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// RNG seed for reproducible samples.
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// How many random values to generate.
    #[arg(long, global = true)]
    count: Option<usize>,
    /// Capacity of both arrays.
    #[arg(long, global = true)]
    capacity: Option<usize>,
    /// Comma-separated values to load instead of random data.
    #[arg(long, global = true, value_delimiter = ',', allow_negative_numbers = true, value_parser = parse_value)]
    values: Option<Vec<i64>>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Log debug detail to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the sample and list the unsorted containers.
    Generate,
    /// Sort the sorted array and sorted list and list them.
    Sort,
    /// Build the tree from the head of the unsorted array and draw it.
    Tree,
    /// Search every container for each value and report comparisons.
    Search {
        #[arg(value_name = "VALUE", required = true, allow_negative_numbers = true, value_parser = parse_value)]
        targets: Vec<i64>,
    },
    /// Print tree node coordinates as JSON for a drawing surface.
    Layout {
        /// Canvas width; the root is centred on it.
        #[arg(long, default_value_t = 800.0)]
        width: f64,
    },
    /// Write the effective configuration to a file.
    InitConfig { path: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// User text to a typed value; the containers never see strings.
fn parse_value(text: &str) -> std::result::Result<i64, ContainerError> {
    text.trim()
        .parse()
        .map_err(|_| ContainerError::InvalidInput(format!("'{text}' is not an integer")))
}

fn resolve_config(cli: &Cli) -> Result<SortscopeConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SortscopeConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(count) = cli.count {
        config.count = count;
    }
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    if cli.verbose {
        config.logging.level = LogLevel::Debug;
    }
    config.validate()?;
    Ok(config)
}

fn prepare(cli: &Cli, config: &SortscopeConfig, logger: &mut Logger) -> Result<Workbench> {
    let mut bench = Workbench::new(WorkbenchConfig::from(config));
    match &cli.values {
        Some(values) => bench.load(values, logger)?,
        None => {
            let mut generator = DataGenerator::new(config.seed);
            bench.load_random(&mut generator, config.count, config.max_value, logger)?
        }
    };
    Ok(bench)
}

#[derive(Serialize)]
struct Listing<'a> {
    unsorted_array: &'a [i64],
    unsorted_linked_list: Vec<&'a i64>,
}

#[derive(Serialize)]
struct SortedListing<'a> {
    sorted_array: &'a [i64],
    sorted_linked_list: Vec<&'a i64>,
    summary: SortSummary,
}

#[derive(Serialize)]
struct TreeView<'a> {
    height: usize,
    in_order: Vec<&'a i64>,
    diagram: String,
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

fn write_report(out: &mut impl Write, report: &PerformanceReport) -> Result<()> {
    writeln!(out, "Searching for: {}", report.value)?;
    for result in &report.results {
        writeln!(out, "{}:", result.structure)?;
        writeln!(out, "Found: {}", result.outcome.found)?;
        writeln!(out, "Comparisons: {}", result.outcome.comparisons)?;
    }
    Ok(())
}

fn run(cli: &Cli, config: &SortscopeConfig, logger: &mut Logger, out: &mut impl Write) -> Result<()> {
    let width = config.row_width;
    match &cli.cmd {
        Command::InitConfig { path } => {
            save_config(config, path)?;
            writeln!(out, "wrote: {}", path.display())?;
        }

        Command::Generate => {
            let bench = prepare(cli, config, logger)?;
            match cli.format {
                OutputFormat::Json => write_json(
                    out,
                    &Listing {
                        unsorted_array: bench.unsorted_array().as_slice(),
                        unsorted_linked_list: bench.unsorted_list().iter().collect(),
                    },
                )?,
                OutputFormat::Text => {
                    writeln!(out, "Unsorted Array:")?;
                    write!(out, "{}", render_rows(bench.unsorted_array().iter(), width))?;
                    writeln!(out, "Unsorted Linked List:")?;
                    write!(out, "{}", render_rows(bench.unsorted_list().iter(), width))?;
                }
            }
        }

        Command::Sort => {
            let mut bench = prepare(cli, config, logger)?;
            let summary = bench.sort_all(logger);
            match cli.format {
                OutputFormat::Json => write_json(
                    out,
                    &SortedListing {
                        sorted_array: bench.sorted_array().as_slice(),
                        sorted_linked_list: bench.sorted_list().iter().collect(),
                        summary,
                    },
                )?,
                OutputFormat::Text => {
                    writeln!(out, "Sorted Array:")?;
                    write!(out, "{}", render_rows(bench.sorted_array().iter(), width))?;
                    writeln!(out, "Sorted Linked List:")?;
                    write!(out, "{}", render_rows(bench.sorted_list().iter(), width))?;
                    writeln!(out, "Sort comparisons (array): {}", summary.array.comparisons)?;
                    writeln!(out, "Sort comparisons (linked list): {}", summary.list.comparisons)?;
                    writeln!(out, "Orders agree: {}", summary.consistent)?;
                }
            }
        }

        Command::Tree => {
            let mut bench = prepare(cli, config, logger)?;
            let height = bench.build_tree(logger);
            let diagram = render_tree(bench.bst());
            match cli.format {
                OutputFormat::Json => write_json(
                    out,
                    &TreeView {
                        height,
                        in_order: bench.bst().in_order(),
                        diagram,
                    },
                )?,
                OutputFormat::Text => {
                    writeln!(out, "Total Visible Layers of the BST: {height}")?;
                    write!(out, "{diagram}")?;
                }
            }
        }

        Command::Search { targets } => {
            let mut bench = prepare(cli, config, logger)?;
            bench.sort_all(logger);
            bench.build_tree(logger);
            let reports: Vec<PerformanceReport> = targets
                .iter()
                .map(|&value| bench.search_all(value, logger))
                .collect();
            match cli.format {
                OutputFormat::Json => write_json(out, &reports)?,
                OutputFormat::Text => {
                    for report in &reports {
                        write_report(out, report)?;
                    }
                }
            }
        }

        Command::Layout { width } => {
            let mut bench = prepare(cli, config, logger)?;
            bench.build_tree(logger);
            let layout = layout_tree(bench.bst(), LayoutOptions::centered(*width));
            write_json(out, &layout)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let mut logger = Logger::stderr(config.logging.clone());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &config, &mut logger, &mut out)
}
