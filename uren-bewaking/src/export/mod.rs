//! Export van de resultaattabellen naar CSV
//!
//! De draaitabel gaat in twee locales naar buiten: Nederlands (puntkomma
//! als scheidingsteken, komma als decimaalteken) voor een Nederlands
//! Office-pakket, en Engels/Amerikaans (komma en punt) voor de rest.
//! De feitentabel is altijd Engels, die is voor analytische consumptie.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregate::{FactRow, PivotTable};

/// Uitvoerlocale voor de draaitabel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// Puntkomma als scheidingsteken, komma als decimaalteken
    Dutch,
    /// Komma als scheidingsteken, punt als decimaalteken
    English,
}

impl Locale {
    fn delimiter(self) -> u8 {
        match self {
            Locale::Dutch => b';',
            Locale::English => b',',
        }
    }

    /// Formatteert een waarde met twee decimalen in deze locale
    fn format_decimal(self, value: f64) -> String {
        let formatted = format!("{:.2}", value);
        match self {
            Locale::Dutch => formatted.replace('.', ","),
            Locale::English => formatted,
        }
    }
}

/// Schrijft de draaitabel naar een CSV-bestand
pub fn write_pivot(pivot: &PivotTable, locale: Locale, path: &Path) -> Result<()> {
    let file = File::create(path)
        .context(format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(pivot_to_csv(pivot, locale)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Rendert de draaitabel als CSV-tekst
///
/// Kolommen: `projectcode` gevolgd door `<bewakingscode>_uren` in
/// kolomvolgorde. Deterministisch: zelfde tabel geeft byte-identieke tekst.
pub fn pivot_to_csv(pivot: &PivotTable, locale: Locale) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(locale.delimiter())
        .from_writer(Vec::new());

    let mut header = vec!["projectcode".to_string()];
    header.extend(pivot.codes.iter().map(|code| format!("{}_uren", code)));
    writer.write_record(&header)?;

    for row in &pivot.rows {
        let mut record = vec![row.projectcode.clone()];
        record.extend(row.uren.iter().map(|&v| locale.format_decimal(v)));
        writer.write_record(&record)?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Schrijft de feitentabel naar een CSV-bestand
pub fn write_facts(facts: &[FactRow], path: &Path) -> Result<()> {
    let file = File::create(path)
        .context(format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(facts_to_csv(facts)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Rendert de feitentabel als CSV-tekst
pub fn facts_to_csv(facts: &[FactRow]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(Vec::new());

    writer.write_record(["Bewakingscode", "Projectcode", "Project_Key", "Kostprijs"])?;

    for fact in facts {
        writer.write_record([
            fact.bewakingscode.as_str(),
            fact.projectcode.as_str(),
            fact.project_key.as_str(),
            &Locale::English.format_decimal(fact.kostprijs),
        ])?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
