use archivador::{config, identity, ingest, output, parse, record, render, store};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "archivador")]
#[command(about = "Static site generator for document archives")]
#[command(long_about = "\
Static site generator for document archives

Your filesystem is the data source. Each document lives in its own
directory, described by a details.md metadata file; the directory name is
the document's permanent id.

Content structure:

  documents/
  ├── rumasa/
  │   ├── details.md               # Metadata (**Nombre:** ..., **Tags:** ...)
  │   └── expediente.pdf           # The archived files themselves
  └── prestige/
      └── details.md

Metadata lines look like '**Nombre:** Expediente Rumasa'; the Tags field
may continue across '- item' lines. Unrecognized lines are skipped and
reported, never fatal.

Ingested documents land in a SQLite database (archivo.db). Rendering reads
the database and writes one HTML page per document plus an index of the 10
latest additions, skipping pages that already exist unless --force or
OVERRIDE_ALL is set.")]
#[command(version)]
struct Cli {
    /// Path to the SQLite database (overrides archivador.toml)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output directory for the rendered site (overrides archivador.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Path to the site configuration file
    #[arg(long, default_value = "archivador.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse one details.md and upsert it into the database
    Add { path: PathBuf },
    /// Walk a documents tree and upsert every details.md found
    Ingest { root: PathBuf },
    /// Render one HTML page per stored document plus the index page
    Render {
        /// Re-render document pages that already exist
        #[arg(long)]
        force: bool,
    },
    /// Run the full pipeline: ingest a documents tree, then render
    Build {
        root: PathBuf,
        /// Re-render document pages that already exist
        #[arg(long)]
        force: bool,
    },
    /// Parse a details.md and show the normalized record without persisting
    Check { path: PathBuf },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let site = config::load_config(&cli.config)?;
    let db_path = cli.db.unwrap_or_else(|| site.db.clone());
    let output_dir = cli.output.unwrap_or_else(|| site.output.clone());

    match cli.command {
        Command::Add { path } => {
            run_add(&path, &db_path);
        }
        Command::Ingest { root } => {
            let store = store::Store::open(&db_path)?;
            let summary = ingest::ingest_tree(&root, &store);
            output::print_lines(&output::format_ingest_summary(&summary));
        }
        Command::Render { force } => {
            let store = store::Store::open(&db_path)?;
            let options = render_options(output_dir, force, &site);
            let summary = render::render_site(&store, &options)?;
            output::print_lines(&output::format_render_summary(&summary));
        }
        Command::Build { root, force } => {
            let store = store::Store::open(&db_path)?;

            println!("==> Stage 1: Ingesting {}", root.display());
            let summary = ingest::ingest_tree(&root, &store);
            output::print_lines(&output::format_ingest_summary(&summary));

            println!("==> Stage 2: Rendering → {}", output_dir.display());
            let options = render_options(output_dir, force, &site);
            let render_summary = render::render_site(&store, &options)?;
            output::print_lines(&output::format_render_summary(&render_summary));
        }
        Command::Check { path } => {
            run_check(&path)?;
        }
    }

    Ok(())
}

/// Process one document, best-effort: a missing file or a persistence
/// failure is reported to the operator and the command still exits cleanly,
/// so a CI step adding documents never hard-fails on one bad entry.
fn run_add(path: &Path, db_path: &Path) {
    let result = store::Store::open(db_path)
        .map_err(ingest::IngestError::from)
        .and_then(|store| ingest::process_document(path, &store));
    match result {
        Ok(processed) => output::print_lines(&output::format_processed(&processed)),
        Err(err) => println!("Error: {err}"),
    }
}

/// Dry-run of the ingest pipeline: parse and normalize, print the would-be
/// record, persist nothing.
fn run_check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        println!("Error: file not found: {}", path.display());
        return Ok(());
    }

    let text = std::fs::read_to_string(path)?;
    let parsed = parse::parse(&text);
    let id = identity::resolve(path)?;
    let (document, warnings) = record::normalize(&parsed, &id);

    output::print_lines(&output::format_record(&document));
    for warning in &warnings {
        println!("Warning: {warning}");
    }
    if !parsed.skipped.is_empty() {
        println!("Skipped {} unrecognized line(s)", parsed.skipped.len());
    }
    Ok(())
}

fn render_options(output_dir: PathBuf, force: bool, site: &config::SiteConfig) -> render::RenderOptions {
    render::RenderOptions {
        output_dir,
        force: force || config::override_from_env(),
        title: site.title.clone(),
    }
}
