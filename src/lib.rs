//! Boxport: bounding-box annotation dataset converter.
//!
//! Boxport converts object-annotation datasets between on-disk formats
//! (per-image label files, nested YAML/JSON documents, binary blobs)
//! through one canonical in-memory representation, so every format only
//! needs a reader and a writer against that model.
//!
//! # Modules
//!
//! - [`boxes`]: record types, format codecs, filters, and dataset dispatch
//! - [`error`]: error types for boxport operations

pub mod boxes;
pub mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use boxes::codec::{format_names, make_codec, CodecOptions};
use boxes::dispatch::{generate, parse};

pub use error::BoxportError;

/// The boxport CLI application.
#[derive(Parser)]
#[command(name = "boxport")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert annotations from one format to another.
    Convert(ConvertArgs),

    /// List the supported format names.
    Formats,
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Input format.
    input_format: String,

    /// Annotation file, folder, glob, or %d sequence expression.
    input_path: PathBuf,

    /// Output format.
    output_format: String,

    /// Output file or folder.
    output_path: PathBuf,

    /// If a multi-file expression is given as input, take every Nth file.
    #[arg(long, short, default_value_t = 1, value_name = "N")]
    stride: usize,

    /// If a multi-file expression is given as input, start at this index.
    #[arg(long, short, default_value_t = 0, value_name = "N")]
    offset: usize,

    /// Codec options, e.g. image_width=1000 class_label_map=person,car.
    #[arg(long, short, num_args = 0.., value_name = "KEY=VALUE")]
    kwargs: Vec<String>,
}

/// Run the boxport CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BoxportError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Formats) => {
            for name in format_names() {
                println!("{name}");
            }
            Ok(())
        }
        None => {
            println!("boxport {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Bounding-box annotation dataset converter.");
            println!();
            println!("Run 'boxport --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), BoxportError> {
    let options = CodecOptions::from_kwargs(&args.kwargs)?;

    // Resolve the output codec up front: configuration and topology
    // problems must surface before any input is read.
    let output_codec = make_codec(&args.output_format, &options)?;
    if output_codec.is_per_image() && !args.output_path.is_dir() {
        if args.output_path.extension().is_some() {
            return Err(BoxportError::OutputNotDirectory {
                path: args.output_path.clone(),
            });
        }
        log::info!(
            "[{}] folder does not exist, creating...",
            args.output_format
        );
        std::fs::create_dir_all(&args.output_path)?;
    }

    let dataset = parse(
        &args.input_format,
        &args.input_path,
        args.stride,
        args.offset,
        &options,
    )?;
    generate(&args.output_format, &dataset, &args.output_path, &options)?;

    println!("Converted {} images", dataset.len());
    Ok(())
}
