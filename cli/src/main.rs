//! ungdoc CLI - Google Docs JSON to Markdown conversion tool

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use ungdoc::model::{document_path, kebab_case};
use ungdoc::{
    convert_batch, parse_file, BatchInput, ConvertOptions, ConvertedDocument, JsonFormat,
    Metadata, MetadataOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "ungdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert Google Docs JSON exports to Markdown", long_about = None)]
struct Cli {
    /// Input document JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output Markdown file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// JSON file with the metadata record
        #[arg(long, value_name = "FILE")]
        metadata: Option<PathBuf>,

        /// Move every heading one level deeper
        #[arg(long)]
        demote_headings: bool,

        /// Turn indented paragraphs into blockquotes
        #[arg(long)]
        indented_blockquotes: bool,

        /// JSON file mapping document ids to output paths
        #[arg(long, value_name = "FILE")]
        crosslinks: Option<PathBuf>,

        /// Leave out the YAML frontmatter
        #[arg(long)]
        no_frontmatter: bool,
    },

    /// Convert a document to JSON elements
    Json {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Convert every document under a directory
    Batch {
        /// Directory of document JSON files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Move every heading one level deeper
        #[arg(long)]
        demote_headings: bool,

        /// Turn indented paragraphs into blockquotes
        #[arg(long)]
        indented_blockquotes: bool,

        /// Leave out the YAML frontmatter
        #[arg(long)]
        no_frontmatter: bool,

        /// Default metadata field (KEY=VALUE), repeatable
        #[arg(long = "default", value_name = "KEY=VALUE")]
        defaults: Vec<String>,

        /// Rename a metadata field (OLD=NEW), repeatable
        #[arg(long = "rename", value_name = "OLD=NEW")]
        renames: Vec<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Markdown {
            input,
            output,
            metadata,
            demote_headings,
            indented_blockquotes,
            crosslinks,
            no_frontmatter,
        }) => {
            let options = ConvertOptions::new()
                .with_demote_headings(demote_headings)
                .with_indented_blockquotes(indented_blockquotes);
            cmd_markdown(
                &input,
                output.as_deref(),
                metadata.as_deref(),
                crosslinks.as_deref(),
                options,
                !no_frontmatter,
            )
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Batch {
            input,
            output,
            demote_headings,
            indented_blockquotes,
            no_frontmatter,
            defaults,
            renames,
        }) => {
            let options = ConvertOptions::new()
                .with_demote_headings(demote_headings)
                .with_indented_blockquotes(indented_blockquotes);
            metadata_options(&defaults, &renames).and_then(|metadata_options| {
                cmd_batch(
                    &input,
                    output.as_deref(),
                    options,
                    &metadata_options,
                    !no_frontmatter,
                )
            })
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: Markdown if input is provided
            if let Some(input) = cli.input {
                cmd_markdown(
                    &input,
                    cli.output.as_deref(),
                    None,
                    None,
                    ConvertOptions::new(),
                    true,
                )
            } else {
                println!("{}", "Usage: ungdoc <FILE> [OUTPUT]".yellow());
                println!("       ungdoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    metadata: Option<&Path>,
    crosslinks: Option<&Path>,
    mut options: ConvertOptions,
    frontmatter: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;

    let mut record = Metadata::from_document(&doc);
    if let Some(path) = metadata {
        let extra: serde_json::Value = serde_json::from_str(&fs::read_to_string(path)?)?;
        for (key, value) in Metadata::from_value(extra).fields {
            record.insert(key, value);
        }
    }

    if let Some(path) = crosslinks {
        let paths: HashMap<String, String> = serde_json::from_str(&fs::read_to_string(path)?)?;
        options = options.with_crosslinks(paths);
    }

    let converted = ConvertedDocument::new(&doc, record, options);
    let markdown =
        converted.to_markdown_with(&RenderOptions::new().with_frontmatter(frontmatter))?;

    if let Some(path) = output {
        fs::write(path, &markdown)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", markdown);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = ungdoc::to_json(input, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file(input)?;
    let converted = ConvertedDocument::new(&doc, Metadata::from_document(&doc), ConvertOptions::new());

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref id) = doc.document_id {
        println!("{}: {}", "Document ID".bold(), id);
    }
    if let Some(ref title) = doc.title {
        println!("{}: {}", "Title".bold(), title);
    }
    println!("{}: {}", "Body blocks".bold(), doc.content().len());
    println!("{}: {}", "Lists".bold(), doc.lists.len());
    println!("{}: {}", "Inline objects".bold(), doc.inline_objects.len());
    println!(
        "{}: {}",
        "Cover".bold(),
        if converted.cover().is_some() { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = converted.to_markdown_with_stats(&RenderOptions::new().with_frontmatter(false))?.stats;
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Blockquotes".bold(), stats.blockquote_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Footnotes".bold(), stats.footnote_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if !converted.headings().is_empty() {
        println!();
        println!("{}", "Outline".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for heading in converted.headings() {
            let indent = "  ".repeat(heading.level.saturating_sub(1) as usize);
            println!("{}{}", indent, heading.text);
        }
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    options: ConvertOptions,
    metadata_options: &MetadataOptions,
    frontmatter: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_markdown", name))
    });

    let files = collect_json_files(input)?;
    if files.is_empty() {
        println!("{} {}", "No JSON files found in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(files.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Reading documents...");
    let mut failed = 0;
    let mut parsed = Vec::with_capacity(files.len());
    let mut inputs = Vec::with_capacity(files.len());
    for file in &files {
        match parse_file(file) {
            Ok(doc) => {
                let mut metadata = Metadata::from_document(&doc);
                metadata.insert("path", output_path_for(input, file));
                metadata.update(metadata_options);
                inputs.push(BatchInput::new(doc, metadata));
                parsed.push(file);
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), file.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.set_message("Converting...");
    let render_options = RenderOptions::new().with_frontmatter(frontmatter);
    let results = convert_batch(&inputs, &options, &render_options);
    pb.inc(1);

    let mut written = 0;
    for (file, result) in parsed.into_iter().zip(results) {
        match result {
            Ok(converted) => {
                let path = converted.metadata.path().unwrap_or_default();
                let target = output_dir.join(format!("{}.md", path.trim_start_matches('/')));
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&target, &converted.markdown)?;
                written += 1;
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), file.display(), e));
                failed += 1;
            }
        }
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} documents written to {}",
        "Done!".green().bold(),
        written,
        output_dir.display()
    );
    if failed > 0 {
        println!("{} {} documents failed", "Warning:".yellow().bold(), failed);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "ungdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Google Docs to Markdown conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/ungdoc".dimmed());
    println!("License: MIT");
}

/// Every `*.json` file under a directory, sorted by name. Symlinks are not followed.
fn collect_json_files(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "json")
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Output path of a file: kebab-cased folders and stem, relative to the root.
fn output_path_for(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);

    let parent = relative
        .parent()
        .map(|folder| {
            folder
                .components()
                .map(|c| kebab_case(&c.as_os_str().to_string_lossy()))
                .filter(|segment| !segment.is_empty())
                .fold(String::new(), |acc, segment| format!("{}/{}", acc, segment))
        })
        .unwrap_or_default();
    let stem = relative.file_stem().unwrap_or_default().to_string_lossy();

    document_path(&parent, &stem)
}

/// Parse `--default` and `--rename` pairs.
fn metadata_options(
    defaults: &[String],
    renames: &[String],
) -> Result<MetadataOptions, Box<dyn std::error::Error>> {
    let mut options = MetadataOptions::new();

    for pair in defaults {
        let (key, value) = split_pair(pair)?;
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        options = options.with_default(key, value);
    }
    for pair in renames {
        let (from, to) = split_pair(pair)?;
        options = options.with_mapping(from, to);
    }

    Ok(options)
}

fn split_pair(pair: &str) -> Result<(&str, &str), String> {
    pair.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("Expected KEY=VALUE, got {:?}", pair))
}
