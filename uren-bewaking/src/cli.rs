//! Definitie en implementatie van de CLI-commando's
//!
//! - standaardcommando: batchconversie van een map met exports
//! - `mapping`: toon de actieve vertaaltabel

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use tracing::info;

use crate::batch::{Batch, RawFile};
use crate::config::VertaalTabel;
use crate::export::{self, Locale};

/// Bestandsnamen van de uitvoer
const PIVOT_NL: &str = "uren_per_bewakingscode.csv";
const PIVOT_EN: &str = "eng_uren_per_bewakingscode.csv";
const FACTS: &str = "kostprijs_per_bewakingscode.csv";

#[derive(Subcommand)]
pub enum Commands {
    /// Toon de actieve vertaaltabel (specificatiecode → bewakingscode)
    Mapping {
        /// Presetnaam of pad naar een JSON-bestand
        #[arg(long, default_value = "standaard")]
        mapping: String,
    },
}

/// Argumenten voor de batchconversie (standaardcommando)
#[derive(Args)]
pub struct ConvertArgs {
    /// Map met specificatie-uren CSV-bestanden, of één bestand
    #[arg(short, long)]
    pub input: PathBuf,

    /// Uitvoermap voor de resultaatbestanden
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Vertaaltabel: presetnaam of pad naar een JSON-bestand
    #[arg(long, default_value = "standaard")]
    pub mapping: String,

    /// Uitvoerformaat voor de draaitabel
    #[arg(long, value_enum, default_value_t = OutputFormat::Both)]
    pub format: OutputFormat,

    /// Schrijf ook de kostprijs-feitentabel
    #[arg(long)]
    pub facts: bool,

    /// Maximaal aantal parallel geparste bestanden
    #[arg(long, alias = "threads")]
    pub jobs: Option<usize>,

    /// Schrijf het batchrapport als JSON naar dit pad
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Locale(s) van de draaitabel-uitvoer
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Nederlands (puntkomma, decimale komma)
    Nl,
    /// Engels/Amerikaans (komma, decimale punt)
    En,
    /// Beide bestanden
    Both,
}

/// Voert de batchconversie uit
pub fn cmd_convert(args: &ConvertArgs) -> Result<()> {
    let tabel = VertaalTabel::from_spec(&args.mapping)?;

    let paths = collect_files(&args.input)?;
    if paths.is_empty() {
        anyhow::bail!("No CSV files found in {}", args.input.display());
    }

    println!("=== Conversie specificatie-uren → bewakingscode ===");
    println!("Input: {}", args.input.display());
    println!("Bestanden: {}", paths.len());
    println!("Mapping: {}", args.mapping);
    println!("Output: {}", args.output.display());

    let mut batch = Batch::new(&tabel).with_jobs(args.jobs);
    for path in &paths {
        match RawFile::read(path) {
            Ok(file) => batch.push(file),
            Err(err) => {
                let filename = path.display().to_string();
                batch.push_unreadable(&filename, &err.to_string());
            }
        }
    }

    let result = batch.run();

    std::fs::create_dir_all(&args.output).context(format!(
        "Failed to create output directory: {}",
        args.output.display()
    ))?;

    if matches!(args.format, OutputFormat::Nl | OutputFormat::Both) {
        let path = args.output.join(PIVOT_NL);
        export::write_pivot(&result.pivot, Locale::Dutch, &path)?;
        println!("Geschreven: {}", path.display());
    }
    if matches!(args.format, OutputFormat::En | OutputFormat::Both) {
        let path = args.output.join(PIVOT_EN);
        export::write_pivot(&result.pivot, Locale::English, &path)?;
        println!("Geschreven: {}", path.display());
    }
    if args.facts {
        let path = args.output.join(FACTS);
        export::write_facts(&result.facts, &path)?;
        println!("Geschreven: {}", path.display());
    }

    result.report.display();

    if !result.pivot.codes.is_empty() {
        println!("\n--- UREN PER BEWAKINGSCODE (TOTAAL) ---");
        for (code, totaal) in result.pivot.totalen_per_code() {
            println!("  {}: {:.2} uren", code, totaal);
        }
    }

    if let Some(report_path) = &args.report {
        result.report.save_to_file(report_path)?;
        println!("Rapport: {}", report_path.display());
    }

    info!(summary = %result.report.summary(), "batch afgerond");
    Ok(())
}

/// Toont de actieve vertaaltabel
pub fn cmd_mapping(mapping: &str) -> Result<()> {
    let tabel = VertaalTabel::from_spec(mapping)?;

    println!("Vertaaltabel ({} regels):", tabel.regels().len());
    println!(
        "{:<10} {:<28} {:<8} BEWAKINGOMSCHRIJVING",
        "SPECCODE", "OMSCHRIJVING", "BEWAKING"
    );
    for regel in tabel.regels() {
        println!(
            "{:<10} {:<28} {:<8} {}",
            regel.specificatiecode,
            regel.omschrijving,
            regel.bewakingscode.as_deref().unwrap_or("-"),
            regel.bewakingomschrijving.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}

/// Zoekt alle CSV-bestanden onder het pad (recursief, hoofdletterongevoelig)
fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    let entries = std::fs::read_dir(path)
        .context(format!("Cannot read directory: {}", path.display()))?;

    for entry in entries {
        let entry = entry?;
        let entry_path = entry.path();

        if entry_path.is_dir() {
            files.extend(collect_files(&entry_path)?);
        } else if is_csv(&entry_path) {
            files.push(entry_path);
        }
    }

    // Stabiele verwerkingsvolgorde, onafhankelijk van de directory-volgorde
    files.sort();
    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
