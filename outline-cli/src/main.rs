//! Command-line interface for paper outlines
//! This binary detects the genre of Markdown papers, builds their outline and prints it in one
//! of the registered formats, or prints the sections matching a query.
//!
//! Usage:
//!   outline `<path>` [--genre `<genre>`] [--format `<format>`]   - Print the outline of a file or directory
//!   outline `<path>` --role `<role>` [--title `<text>`] ...      - Print matching sections
//!   outline --list-genres | --list-formats                      - List what is available

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use ignore::WalkBuilder;
use outline_config::{Loader, OutlineConfig};
use outline_parser::outline::formats::FormatRegistry;
use outline_parser::outline::{
    get_section_content, DocumentLoader, GenreRegistry, NodeFilter, Outline,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() {
    let matches = Command::new("outline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract the outline of academic papers written in Markdown")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Markdown file, or directory searched for *.md files")
                .required_unless_present_any(["list-genres", "list-formats"])
                .index(1),
        )
        .arg(
            Arg::new("genre")
                .long("genre")
                .short('g')
                .help("Skip detection and use this genre (e.g. 'thesis', 'JournalPaperStrategy')"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (see --list-formats)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .help("Confidence below which the detected genre is reported as uncertain")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("role")
                .long("role")
                .help("Print sections with this role"),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .help("Print sections at this level")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i32)),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Print sections whose title contains this text"),
        )
        .arg(
            Arg::new("exact-title")
                .long("exact-title")
                .help("Print sections with exactly this title"),
        )
        .arg(
            Arg::new("dedup")
                .long("dedup")
                .help("Do not repeat sections nested in another match")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log detection scores and builder decisions to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-genres")
                .long("list-genres")
                .help("List the registered genres")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List the available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> CliResult<()> {
    if matches.get_flag("list-genres") {
        handle_list_genres_command();
        return Ok(());
    }
    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return Ok(());
    }

    let config = load_config(matches)?;
    init_tracing(config.detection.verbose);

    let path = matches
        .get_one::<String>("path")
        .ok_or("a path is required unless listing genres or formats")?;
    let filter = query_filter(matches);
    handle_outline_command(Path::new(path), &config, filter.as_ref())
}

/// Defaults, then `--config` (or `./outline.toml`), then flags
fn load_config(matches: &ArgMatches) -> CliResult<OutlineConfig> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_local_file("."),
    };

    if let Some(genre) = matches.get_one::<String>("genre") {
        loader = loader.genre(genre)?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.format(format)?;
    }
    if let Some(threshold) = matches.get_one::<f64>("threshold") {
        loader = loader.threshold(*threshold)?;
    }
    if matches.get_flag("dedup") {
        loader = loader.deduplicate(true)?;
    }
    if matches.get_flag("verbose") {
        loader = loader.verbose(true)?;
    }

    Ok(loader.build()?)
}

/// Logs go to stderr so that stdout only carries the outline.
fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// `None` when no query flag was given
fn query_filter(matches: &ArgMatches) -> Option<NodeFilter> {
    let mut filter = NodeFilter::new();
    if let Some(role) = matches.get_one::<String>("role") {
        filter = filter.role(role.as_str());
    }
    if let Some(level) = matches.get_one::<i32>("level") {
        filter = filter.level(*level);
    }
    if let Some(title) = matches.get_one::<String>("title") {
        filter = filter.title(title.as_str());
    }
    if let Some(title) = matches.get_one::<String>("exact-title") {
        filter = filter.exact_title(title.as_str());
    }
    (!filter.is_empty()).then_some(filter)
}

/// Markdown files under `path`, or `path` itself when it is a file
fn collect_inputs(path: &Path) -> CliResult<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut inputs = Vec::new();
    for entry in WalkBuilder::new(path).build() {
        let entry = entry?;
        let is_markdown = entry.path().extension().is_some_and(|ext| ext == "md");
        if entry.file_type().is_some_and(|t| t.is_file()) && is_markdown {
            inputs.push(entry.into_path());
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Handle the outline command for a file or a directory
fn handle_outline_command(
    path: &Path,
    config: &OutlineConfig,
    filter: Option<&NodeFilter>,
) -> CliResult<()> {
    let registry = GenreRegistry::with_defaults();
    let formats = FormatRegistry::with_defaults();
    let detector = config.detection.detector()?;
    // fail on an unknown format before reading any input
    let format = formats.get(&config.output.format)?;

    let inputs = collect_inputs(path)?;
    let show_headers = path.is_dir();
    if show_headers && inputs.is_empty() {
        tracing::warn!(path = %path.display(), "no Markdown files found");
    }

    for input in inputs {
        let outline: Outline = DocumentLoader::from_path(&input)?.outline(
            &registry,
            &detector,
            config.detection.genre.as_deref(),
        )?;

        if show_headers {
            println!("==> {} <==", input.display());
        }

        let rendered = match filter {
            Some(filter) => get_section_content(&outline.tree, filter, config.query.mode()),
            None => format.serialize(&outline)?,
        };
        print!("{}", rendered);
    }

    Ok(())
}

/// Handle the list-genres command
fn handle_list_genres_command() {
    let registry = GenreRegistry::with_defaults();
    println!("Available genres:\n");

    for genre in registry.list() {
        println!("  {}", genre.name());
        println!("    {}", genre.description());
        println!();
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let formats = FormatRegistry::with_defaults();
    println!("Available formats:\n");

    for name in formats.list_formats() {
        if let Ok(format) = formats.get(&name) {
            println!("  {}", name);
            println!("    {}", format.description());
            println!();
        }
    }
}
