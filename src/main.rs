//! jsontrove - browse folders, JSON files and zip archives as one tree.
//!
//! Usage:
//!   jtv [PATH]               Print the navigation tree
//!   jtv tree [PATH]          Print the navigation tree with options
//!   jtv list [PATH]          List every selectable address
//!   jtv show ADDRESS         Print the JSON tree behind an address
//!   jtv export [PATH]        Export the navigation tree to JSON
//!   jtv --help               Show help

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::EnvFilter;

use jsontrove_core::{Address, BrowseConfig, NavigationTree, NodeKind, TreeNode};
use jsontrove_scan::{ContentResolver, DirectoryScanner};

#[derive(Parser)]
#[command(
    name = "jsontrove",
    version,
    about = "Browse folders, JSON files and zip archives as one tree",
    long_about = "jsontrove shows a folder as a single tree in which zip archives are \
                  expanded into their entries.\n\n\
                  Every JSON file or archive entry has an address; pass it to \
                  `jtv show ADDRESS` to see the document as a tree."
)]
struct Cli {
    /// Folder to browse (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the navigation tree
    Tree {
        #[command(flatten)]
        browse: BrowseArgs,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List every selectable address
    List {
        #[command(flatten)]
        browse: BrowseArgs,
    },

    /// Print the JSON tree behind an address
    Show {
        /// Plain path or `zip:<archive>,<entry>` address
        address: String,

        /// Maximum depth to display
        #[arg(short, long)]
        depth: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Export the navigation tree to JSON
    Export {
        #[command(flatten)]
        browse: BrowseArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct BrowseArgs {
    /// Folder to browse
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Skip hidden files and folders
    #[arg(long)]
    no_hidden: bool,

    /// Glob pattern of names to skip (repeatable)
    #[arg(short, long = "ignore")]
    ignore: Vec<String>,

    /// Show directory and file names lower-cased
    #[arg(long)]
    lowercase: bool,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    follow_symlinks: bool,
}

impl BrowseArgs {
    fn to_config(&self) -> Result<BrowseConfig> {
        BrowseConfig::builder()
            .root(self.path.clone())
            .include_hidden(!self.no_hidden)
            .ignore_patterns(self.ignore.clone())
            .lowercase_names(self.lowercase)
            .follow_symlinks(self.follow_symlinks)
            .build()
            .map_err(|e| eyre!("Invalid options: {e}"))
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Tree {
            browse,
            depth,
            format,
        }) => {
            run_tree(&browse.to_config()?, depth, format)?;
        }
        Some(Command::List { browse }) => {
            run_list(&browse.to_config()?)?;
        }
        Some(Command::Show {
            address,
            depth,
            format,
        }) => {
            run_show(Address::from_raw(address), depth, format)?;
        }
        Some(Command::Export { browse, output }) => {
            run_export(&browse.to_config()?, output)?;
        }
        None => {
            run_tree(&BrowseConfig::new(cli.path), None, OutputFormat::Text)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber honoring `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_tree(config: &BrowseConfig) -> Result<NavigationTree> {
    DirectoryScanner::new()
        .scan(config)
        .with_context(|| format!("Cannot build tree for {}", config.root.display()))
}

/// Print the navigation tree.
fn run_tree(config: &BrowseConfig, max_depth: Option<usize>, format: OutputFormat) -> Result<()> {
    let tree = build_tree(config)?;

    match format {
        OutputFormat::Text => {
            print_node(&tree.root, max_depth);
            println!();
            println!(
                " {} directories, {} JSON files, {} archives ({} entries)",
                tree.stats.directories,
                tree.stats.json_files,
                tree.stats.archives,
                tree.stats.archive_entries
            );
            println!(" Built in {:.2}s", tree.build_duration.as_secs_f64());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree.root)?);
        }
    }

    Ok(())
}

/// Print every selectable address, one per line.
fn run_list(config: &BrowseConfig) -> Result<()> {
    let tree = build_tree(config)?;
    for address in tree.addresses() {
        println!("{address}");
    }
    Ok(())
}

/// Resolve an address and print its content tree.
fn run_show(address: Address, max_depth: Option<usize>, format: OutputFormat) -> Result<()> {
    let resolver = ContentResolver::new();
    let content = resolver
        .load_tree(&address)
        .with_context(|| format!("Cannot display {address}"))?;

    let Some(content) = content else {
        eprintln!("No JSON content at {address}");
        return Ok(());
    };

    match format {
        OutputFormat::Text => print_node(&content, max_depth),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&content)?),
    }

    Ok(())
}

/// Export the navigation tree to JSON.
fn run_export(config: &BrowseConfig, output: Option<PathBuf>) -> Result<()> {
    let tree = build_tree(config)?;
    let json = serde_json::to_string_pretty(&tree)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)
                .with_context(|| format!("Cannot write {}", output_path.display()))?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

/// Print a node and its descendants, indented by depth.
fn print_node(root: &TreeNode, max_depth: Option<usize>) {
    let max_depth = max_depth.unwrap_or(usize::MAX);

    for (depth, node) in root.walk().filter(|(depth, _)| *depth <= max_depth) {
        let indent = "  ".repeat(depth);
        let marker = if node.kind.has_children() { "▼ " } else { "  " };
        let suffix = match node.kind {
            NodeKind::Directory => "/",
            _ => "",
        };
        println!("{indent}{marker}{}{suffix}", node.name);
    }
}
