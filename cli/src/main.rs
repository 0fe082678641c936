//! manualkit CLI - manual inspection, translation status, and BOM comparison

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use manualkit::render::{self, ManualView};
use manualkit::{
    compare_stored_boms, load_bundle, translation_report, JsonFormat, ManualStore, MemoryStore,
    RenderOptions, SectionTree,
};

#[derive(Parser)]
#[command(name = "manualkit")]
#[command(version)]
#[command(about = "Inspect manuals, track translations, compare BOMs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document information and the section outline
    Info {
        /// Manual bundle (JSON)
        #[arg(value_name = "BUNDLE")]
        bundle: PathBuf,
    },

    /// Show translation completeness for one language
    Status {
        /// Manual bundle (JSON)
        #[arg(value_name = "BUNDLE")]
        bundle: PathBuf,

        /// Target language code (e.g., "de")
        #[arg(short, long)]
        language: String,
    },

    /// Export the manual to Markdown, text, or JSON
    Export {
        /// Manual bundle (JSON)
        #[arg(value_name = "BUNDLE")]
        bundle: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: ExportFormat,

        /// Apply a language overlay (language code)
        #[arg(short, long)]
        language: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include a metadata header
        #[arg(long)]
        metadata: bool,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Compare two BOMs and report matches and unique items
    Compare {
        /// Manual bundle (JSON)
        #[arg(value_name = "BUNDLE")]
        bundle: PathBuf,

        /// First BOM id
        #[arg(value_name = "BOM_A")]
        bom_a: u64,

        /// Second BOM id
        #[arg(value_name = "BOM_B")]
        bom_b: u64,

        /// Emit the comparison as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// Markdown
    #[value(alias = "md")]
    Markdown,
    /// Plain text
    Text,
    /// JSON
    Json,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { bundle } => cmd_info(&bundle),
        Commands::Status { bundle, language } => cmd_status(&bundle, &language),
        Commands::Export {
            bundle,
            format,
            language,
            output,
            metadata,
            max_heading,
        } => cmd_export(&bundle, format, language.as_deref(), output, metadata, max_heading),
        Commands::Compare {
            bundle,
            bom_a,
            bom_b,
            json,
        } => cmd_compare(&bundle, bom_a, bom_b, json),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn resolve_language(store: &MemoryStore, code: &str) -> Result<u64, String> {
    let languages = store.languages(false).map_err(|e| e.to_string())?;
    languages
        .iter()
        .find(|l| l.code == code)
        .map(|l| l.id)
        .ok_or_else(|| format!("unknown language code '{code}'"))
}

fn cmd_info(bundle: &PathBuf) -> Result<(), String> {
    let store = load_bundle(bundle).map_err(|e| e.to_string())?;
    let document = store.document().map_err(|e| e.to_string())?;
    let sections = store.sections().map_err(|e| e.to_string())?;
    let tree = SectionTree::build(&sections);

    println!("{}", document.title.bold());
    if let Some(version) = &document.version {
        println!("  version: {version}");
    }
    println!("  status:  {}", document.status.as_str());
    println!("  sections: {}", tree.len());

    let mut module_count = 0;
    for section in &sections {
        module_count += store.modules(section.id).map_err(|e| e.to_string())?.len();
    }
    println!("  modules:  {module_count}");

    println!();
    for node in tree.linearize() {
        let indent = "  ".repeat(node.depth);
        println!("{indent}{} {}", "-".dimmed(), node.section.title);
    }
    Ok(())
}

fn cmd_status(bundle: &PathBuf, language: &str) -> Result<(), String> {
    let store = load_bundle(bundle).map_err(|e| e.to_string())?;
    let language_id = resolve_language(&store, language)?;
    let report = translation_report(&store, language_id).map_err(|e| e.to_string())?;

    for status in &report.sections {
        let indent = "  ".repeat(status.depth);
        let verdict = if status.missing {
            "missing".red().to_string()
        } else {
            "complete".green().to_string()
        };
        println!(
            "{indent}{} [{verdict}] ({}/{} modules)",
            status.title, status.module_translated, status.module_total
        );
    }

    println!();
    let percent = format!("{}%", report.percent());
    let percent = if report.is_complete() {
        percent.green().bold()
    } else {
        percent.yellow().bold()
    };
    println!(
        "{} {percent} ({}/{} sections, {}/{} modules)",
        "total:".bold(),
        report.translated_sections,
        report.total_sections,
        report.translated_modules,
        report.total_modules
    );
    Ok(())
}

fn cmd_export(
    bundle: &PathBuf,
    format: ExportFormat,
    language: Option<&str>,
    output: Option<PathBuf>,
    metadata: bool,
    max_heading: u8,
) -> Result<(), String> {
    let store = load_bundle(bundle).map_err(|e| e.to_string())?;
    log::debug!("loaded bundle from {}", bundle.display());
    let language_id = match language {
        Some(code) => Some(resolve_language(&store, code)?),
        None => None,
    };

    let view = ManualView::from_store(&store, language_id).map_err(|e| e.to_string())?;
    let options = RenderOptions::new()
        .with_metadata(metadata)
        .with_max_heading(max_heading);

    let content = match format {
        ExportFormat::Markdown => render::to_markdown(&view, &options),
        ExportFormat::Text => render::to_text(&view, &options),
        ExportFormat::Json => render::to_json(&view, JsonFormat::Pretty),
    }
    .map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            fs::write(&path, content).map_err(|e| e.to_string())?;
            println!("{} {}", "wrote".green(), path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn cmd_compare(bundle: &PathBuf, bom_a: u64, bom_b: u64, json: bool) -> Result<(), String> {
    let store = load_bundle(bundle).map_err(|e| e.to_string())?;
    let comparison = compare_stored_boms(&store, bom_a, bom_b).map_err(|e| e.to_string())?;

    if json {
        let text = serde_json::to_string_pretty(&comparison).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    println!("{}", "matches".bold());
    if comparison.matches.is_empty() {
        println!("  (none)");
    }
    for m in &comparison.matches {
        println!(
            "  {} ~ {} ({})",
            m.a.display_code(),
            m.b.display_code(),
            format!("{}", m.score).cyan()
        );
    }

    println!("{}", format!("unique to BOM {bom_a}").bold());
    for entry in &comparison.unique_to_a {
        println!("  {} {}", entry.display_code(), entry.description().unwrap_or("–"));
    }

    println!("{}", format!("unique to BOM {bom_b}").bold());
    for entry in &comparison.unique_to_b {
        println!("  {} {}", entry.display_code(), entry.description().unwrap_or("–"));
    }

    let plan = comparison.migration_plan();
    println!();
    println!(
        "{} {} to review, {} to author, {} to retire",
        "migration:".bold(),
        plan.carried_over,
        plan.to_author,
        plan.to_retire
    );
    Ok(())
}
