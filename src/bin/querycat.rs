use clap::{Parser, Subcommand};
use querycat::catalog::Catalog;
use querycat::cli as prog_cli;
use querycat::config::{AppConfig, load_config};
use querycat::logger;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "querycat", version, about = "Browse example document-database queries", long_about=None)]
struct Cli {
    /// Path to a config file (TOML)
    #[arg(long, help = "Path to a config file (TOML). If omitted, standard locations are searched.")]
    config: Option<PathBuf>,
    /// Override catalog file (takes precedence over config)
    #[arg(long, help = "Catalog file to use instead of the built-in examples")]
    catalog: Option<PathBuf>,
    #[arg(long, help = "Output mode: human|plain|json. Defaults to human.")]
    output: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "List examples, optionally restricted to one category")]
    List {
        #[arg(long, short, help = "Category: crud|advanced-query|aggregation|indexing")]
        category: Option<String>,
    },
    #[command(about = "Show one example by its number")]
    Show {
        #[arg(help = "Example number as printed by `list` (starts at 1)")]
        id: usize,
    },
    #[command(about = "List categories with their example counts")]
    Categories,
    #[command(about = "Find examples whose description or query contains a term")]
    Search {
        #[arg(help = "Case-insensitive search term")]
        term: String,
    },
    #[command(about = "Export examples to a file (NDJSON/CSV)")]
    Export {
        #[arg(help = "Path to output file")]
        file: PathBuf,
        #[arg(long, help = "Format: ndjson|csv; defaults to ndjson")]
        format: Option<String>,
        #[arg(long, short, help = "Only export this category")]
        category: Option<String>,
    },
    #[command(about = "Check that a catalog file parses and report its size")]
    Validate {
        #[arg(help = "Catalog file to check")]
        file: PathBuf,
    },
}

fn init_logging(cfg: &AppConfig) {
    let res = if let Some(path) = cfg.log_config.as_ref() {
        logger::init_path(path)
    } else if let Some(dir) = cfg.log_dir.as_ref() {
        logger::configure_logging(Some(dir.as_path()), cfg.log_level.as_deref(), cfg.log_retention)
    } else {
        return;
    };
    if let Err(e) = res {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn open_catalog(cfg: &AppConfig) -> Result<Catalog, Box<dyn std::error::Error>> {
    match cfg.catalog_path.as_ref() {
        Some(p) => Ok(Catalog::from_path(p)?),
        None => Ok(Catalog::builtin().clone()),
    }
}

fn main() {
    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_ref());
    let mut cfg = loaded.config;
    if cli.catalog.is_some() { cfg.catalog_path = cli.catalog.clone(); }
    if cli.output.is_some() { cfg.output = cli.output.clone(); }
    init_logging(&cfg);
    for w in &loaded.warnings {
        log::warn!("{w}");
        eprintln!("warning: {w}");
    }
    log::debug!("effective config: {:?}", cfg);

    let catalog = match open_catalog(&cfg) {
        Ok(c) => c,
        Err(e) => { eprintln!("error: {}", e); std::process::exit(1); }
    };
    let mode = prog_cli::parse_output_mode(cfg.output.as_deref());

    let cmd = match cli.command {
        Commands::List { category } => prog_cli::Command::List { category },
        Commands::Show { id } => prog_cli::Command::Show { id },
        Commands::Categories => prog_cli::Command::Categories,
        Commands::Search { term } => prog_cli::Command::Search { term },
        Commands::Export { file, format, category } => prog_cli::Command::Export { file, format, category },
        Commands::Validate { file } => prog_cli::Command::Validate { file },
    };
    if let Err(e) = prog_cli::run_with_format(&catalog, cmd, mode) {
        log::error!("command failed: {e}");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
