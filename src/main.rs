//! AudioShelf: audiobook library scanner.
//!
//! Thin binary entry point. All logic lives in the `audioshelf-core` crate.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use audioshelf_core::export::{self, ExportFormat};
use audioshelf_core::library::{self, JsonLibraryStore, LibraryStore};
use audioshelf_core::scanner::progress::ScanProgress;
use audioshelf_core::{start_scan, Book, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "audioshelf")]
#[command(version, about = "Find audiobooks in folders on disk", long_about = None)]
#[command(after_help = "EXAMPLES:
    audioshelf scan ~/Audiobooks              List the books under a folder
    audioshelf folders add ~/Audiobooks       Remember a folder for refresh
    audioshelf refresh                        Rescan remembered folders
    audioshelf books --format csv             Print stored books as CSV")]
struct Cli {
    /// JSON file with `audio_extensions` / `image_extensions`
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Library file holding scan folders and stored books
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        default_value = "audioshelf-library.json"
    )]
    library: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan folders and print the books found, without touching the library
    Scan {
        /// Folders to scan, in order
        #[arg(required = true, value_name = "ROOT")]
        roots: Vec<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Manage the folders a refresh scans
    Folders {
        #[command(subcommand)]
        action: FolderAction,
    },
    /// Rescan all configured folders and replace the stored books
    Refresh,
    /// Print the books stored by the last refresh
    Books {
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Subcommand, Debug)]
enum FolderAction {
    /// List configured folders
    List,
    /// Add a folder
    Add { path: PathBuf },
    /// Remove a folder
    Remove { path: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
    Csv,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ExportFormat::Text,
            Format::Json => ExportFormat::Json,
            Format::Csv => ExportFormat::Csv,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so exports on stdout stay clean.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    match cli.command {
        Commands::Scan { roots, format } => scan(roots, config, format),
        Commands::Folders { action } => folders(&cli.library, action),
        Commands::Refresh => refresh(&cli.library, &config),
        Commands::Books { format } => {
            let store = open_store(&cli.library)?;
            match store.last_scan()? {
                Some(at) => tracing::info!(
                    "Last refreshed {}",
                    at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
                ),
                None => tracing::info!("Library has never been refreshed"),
            }
            print_books(&store.books()?, format)
        }
    }
}

fn scan(roots: Vec<PathBuf>, config: ScanConfig, format: Format) -> anyhow::Result<()> {
    let handle = start_scan(roots, config).context("starting scan thread")?;

    let mut report = None;
    for msg in handle.progress_rx.iter() {
        match msg {
            ScanProgress::RootStarted { root, index, total } => {
                tracing::info!("[{}/{}] Scanning {}", index + 1, total, root.display());
            }
            ScanProgress::Issue(issue) => {
                tracing::debug!("Unreadable: {}", issue.path.display());
            }
            ScanProgress::RootFinished { root, books_found } => {
                tracing::info!("{} book(s) in {}", books_found, root.display());
            }
            ScanProgress::Complete(r) => report = Some(r),
        }
    }
    // Joins the scan thread; the channel is already drained.
    let waited = handle.wait();
    let Some(report) = report.or(waited) else {
        bail!("scan thread exited without a report");
    };

    print_books(&report.books, format)
}

fn folders(library_path: &Path, action: FolderAction) -> anyhow::Result<()> {
    let store = open_store(library_path)?;
    match action {
        FolderAction::List => {
            let mut out = io::stdout().lock();
            for folder in store.scan_folders()? {
                writeln!(out, "{}", folder.path.display())?;
            }
        }
        FolderAction::Add { path } => {
            if store.add_scan_folder(&path)? {
                tracing::info!("Added {}", path.display());
            } else {
                tracing::info!("{} is already configured", path.display());
            }
        }
        FolderAction::Remove { path } => {
            if !store.remove_scan_folder(&path)? {
                bail!("{} is not a configured folder", path.display());
            }
            tracing::info!("Removed {}", path.display());
        }
    }
    Ok(())
}

fn refresh(library_path: &Path, config: &ScanConfig) -> anyhow::Result<()> {
    let store = open_store(library_path)?;
    let report = library::refresh_library(&store, config).context("refreshing library")?;
    for issue in &report.issues {
        tracing::warn!("Skipped {}: {}", issue.path.display(), issue.message);
    }
    println!(
        "{} books, {} files in {:.2?}",
        export::format_count(report.books.len() as u64),
        export::format_count(report.file_count() as u64),
        report.duration
    );
    Ok(())
}

fn open_store(path: &Path) -> anyhow::Result<JsonLibraryStore> {
    JsonLibraryStore::open(path).with_context(|| format!("opening library {}", path.display()))
}

fn print_books(books: &[Book], format: Format) -> anyhow::Result<()> {
    let out = io::stdout().lock();
    export::write_books(out, books, format.into()).context("writing books")?;
    Ok(())
}
