//! neo-rom CLI — build `.neo` cartridge containers from loose ROM dumps.
//!
//! # Usage
//!
//! ```bash
//! neo-rom convert -i roms/kof94 -o kof94.neo -n "King of Fighters 94" -g fighting -y 1994 --ngh 55
//! neo-rom dump kof94.neo
//! neo-rom dump kof94.neo --json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};

use neo_rom::metadata::{lenient, parse_year};
use neo_rom::{
    encoded_len, is_latin1, read_header, GameMetadata, Genre, NeoBuilder, ParsedHeader,
    SourceFileSet, HEADER_SIZE, MANUFACTURER_LEN, NAME_LEN,
};

// ───────────────────────────── CLI definition ─────────────────────────────

/// Top-level CLI entry point for the `neo-rom` binary.
#[derive(Parser)]
#[command(
    name = "neo-rom",
    about = "Build .neo cartridge containers from arcade ROM dumps",
    version
)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available sub-commands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a directory of ROM files into a .neo container.
    Convert {
        /// Directory containing the ROM files.
        #[arg(short, long)]
        input: PathBuf,

        /// Output .neo file path.
        #[arg(short, long)]
        output: PathBuf,

        /// Game name (defaults to the output file name without extension).
        #[arg(short, long)]
        name: Option<String>,

        /// Genre name, e.g. "Fighting" (case-insensitive).
        #[arg(short, long, default_value = "Other")]
        genre: String,

        /// Release year (defaults to the current year).
        #[arg(short, long)]
        year: Option<String>,

        /// Manufacturer name.
        #[arg(short, long, default_value = "SNK")]
        manufacturer: String,

        /// NGH number as printed on the board, e.g. "55".
        #[arg(long)]
        ngh: Option<String>,

        /// Screenshot index.
        #[arg(long)]
        screenshot: Option<String>,
    },

    /// Display the header of a .neo file.
    Dump {
        /// Input .neo file path.
        input: PathBuf,

        /// Output the parsed header as JSON.
        #[arg(long)]
        json: bool,
    },
}

// ────────────────────────────── main ──────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            name,
            genre,
            year,
            manufacturer,
            ngh,
            screenshot,
        } => {
            let options = ConvertOptions {
                name,
                genre,
                year,
                manufacturer,
                ngh,
                screenshot,
            };
            cmd_convert(&input, &output, options)
        }

        Commands::Dump { input, json } => cmd_dump(&input, json),
    }
}

// ──────────────────────────── convert ──────────────────────────────

/// Metadata flags passed to `convert`.
struct ConvertOptions {
    name: Option<String>,
    genre: String,
    year: Option<String>,
    manufacturer: String,
    ngh: Option<String>,
    screenshot: Option<String>,
}

/// Convert a directory of ROM files into a `.neo` container.
fn cmd_convert(input: &Path, output: &Path, options: ConvertOptions) -> Result<()> {
    if !input.exists() {
        bail!("Input directory does not exist: {}", input.display());
    }
    if !input.is_dir() {
        bail!("Input is not a directory: {}", input.display());
    }
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            bail!("Output directory does not exist: {}", parent.display());
        }
    }

    let metadata = resolve_metadata(output, options)?;

    let files = SourceFileSet::from_dir(input)
        .with_context(|| format!("Failed to read ROM directory: {}", input.display()))?;
    if files.is_empty() {
        tracing::warn!(dir = %input.display(), "No ROM files found, writing header only");
    }

    let container = NeoBuilder::new(metadata)
        .finalize(&files, output)
        .with_context(|| format!("Failed to build NEO file: {}", output.display()))?;

    tracing::debug!(
        size = container.bytes.len(),
        total = %human_size(container.bytes.len() as u64),
        "Conversion finished"
    );

    println!("{} built to {}", input.display(), output.display());
    Ok(())
}

/// Validate the `convert` flags and turn them into [`GameMetadata`].
fn resolve_metadata(output: &Path, options: ConvertOptions) -> Result<GameMetadata> {
    let name = match options.name {
        Some(name) => name,
        None => output
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .with_context(|| {
                format!("Cannot derive a game name from {}", output.display())
            })?,
    };
    check_field("Name", &name, NAME_LEN)?;

    let manufacturer = options.manufacturer;
    check_field("Manufacturer", &manufacturer, MANUFACTURER_LEN)?;

    let genre: Genre = options.genre.parse()?;

    let year = match options.year.as_deref() {
        Some(text) => lenient(Some(text), parse_year),
        None => current_year(),
    };

    let mut metadata = GameMetadata::new(name, year)
        .with_manufacturer(manufacturer)
        .with_genre(genre);
    metadata.ngh = options.ngh;
    metadata.screenshot = options.screenshot;
    Ok(metadata)
}

/// Reject header text that is too long or not representable in Latin-1.
fn check_field(label: &str, value: &str, limit: usize) -> Result<()> {
    if !is_latin1(value) {
        bail!(
            "{} '{}' contains characters outside Latin-1 (U+0000..U+00FF)",
            label,
            value
        );
    }
    let len = encoded_len(value);
    if len > limit {
        bail!(
            "{} '{}' is {} bytes, the limit is {} bytes",
            label,
            value,
            len,
            limit
        );
    }
    Ok(())
}

fn current_year() -> u32 {
    u32::try_from(chrono::Local::now().year()).unwrap_or(0)
}

// ───────────────────────────── dump ───────────────────────────────

/// Display the header of a `.neo` file.
///
/// If `--json` is specified, outputs the parsed header as JSON.
/// Otherwise, prints a human-readable summary.
fn cmd_dump(input: &Path, json: bool) -> Result<()> {
    let header = read_header(input)
        .with_context(|| format!("Failed to read NEO header: {}", input.display()))?;
    let file_size = std::fs::metadata(input)
        .with_context(|| format!("Cannot stat file: {}", input.display()))?
        .len();

    let info = FileInfo {
        path: input,
        header: &header,
        file_size,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info.to_json())?);
    } else {
        info.print_human();
    }

    Ok(())
}

/// Collected information about a `.neo` file, used for display.
struct FileInfo<'a> {
    /// Path to the `.neo` file.
    path: &'a Path,
    /// Parsed file header.
    header: &'a ParsedHeader,
    /// Total file size in bytes.
    file_size: u64,
}

impl FileInfo<'_> {
    /// Build a JSON representation of the file info.
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "file": self.path.display().to_string(),
            "file_size": self.file_size,
            "version": self.header.version,
            "metadata": self.header.metadata,
            "sizes": self.header.sizes,
        })
    }

    /// Print a human-readable summary of the `.neo` file.
    fn print_human(&self) {
        let meta = &self.header.metadata;

        println!();
        println!("  NEO File Information");
        println!("  ============================================");
        println!("  File:         {}", self.path.display());
        println!(
            "  Size:         {} bytes ({})",
            self.file_size,
            human_size(self.file_size)
        );
        println!("  Version:      {}", self.header.version);
        println!("  Name:         {}", meta.name);
        println!("  Manufacturer: {}", meta.manufacturer);
        println!("  Year:         {}", meta.year);
        println!("  Genre:        {}", meta.genre);
        println!("  NGH:          {}", meta.ngh.as_deref().unwrap_or("(none)"));
        println!("  Screenshot:   {}", meta.screenshot);

        println!();
        println!("  ROM sizes");
        println!("  --------------------------------------------");
        let labels = ["P", "S", "M", "V1", "V2", "C"];
        for (label, size) in labels.iter().zip(self.header.sizes.to_array()) {
            println!(
                "  {:<3} {:>10} (0x{:08X}) {}",
                label,
                size,
                size,
                human_size(u64::from(size))
            );
        }

        let expected = HEADER_SIZE as u64 + self.header.sizes.total();
        if expected != self.file_size {
            println!();
            println!(
                "  Warning: header describes {} bytes, file has {}",
                expected, self.file_size
            );
        }
    }
}

// ──────────────────────── helper functions ─────────────────────────

/// Format a byte count as a human-readable size string.
fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GiB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MiB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KiB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
