//! Batchrapport met graceful degradation
//!
//! Eén kapot bestand breekt nooit de hele batch: het rapport verzamelt
//! per bestand het resultaat en toont achteraf wat niet verwerkt is.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Globale status van de batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchStatus {
    /// Alle bestanden verwerkt
    Success,
    /// Verwerkt met overgeslagen bestanden
    PartialSuccess,
    /// Geen enkel bestand verwerkt
    Failed,
}

/// Een niet verwerkt bestand met de reden
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnprocessedFile {
    pub filename: String,
    pub reason: String,
}

/// Volledig rapport van één batchrun
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Duur van de verwerking
    pub duration_secs: f64,
    /// Globale status
    pub status: BatchStatus,

    // Globale tellers
    /// Aantal succesvol verwerkte bestanden
    pub files_processed: usize,
    /// Aantal niet verwerkte bestanden
    pub files_failed: usize,
    /// Aantal geparste dataregels
    pub rows_parsed: usize,
    /// Aantal overgeslagen dataregels (verkeerd aantal velden)
    pub rows_skipped: usize,

    // Resultaattellers, gezet na de aggregatie
    /// Aantal projecten in de draaitabel
    pub projects: usize,
    /// Aantal bewakingscode-kolommen
    pub bewakingscodes: usize,
    /// Totaal aantal uren over de hele draaitabel
    pub totaal_uren: f64,

    /// Niet verwerkte bestanden met reden
    pub unprocessed: Vec<UnprocessedFile>,
    /// Specificatiecodes die niet in de vertaaltabel staan
    pub unmapped_codes: Vec<String>,
}

impl Default for BatchReport {
    fn default() -> Self {
        Self {
            duration_secs: 0.0,
            status: BatchStatus::Success,
            files_processed: 0,
            files_failed: 0,
            rows_parsed: 0,
            rows_skipped: 0,
            projects: 0,
            bewakingscodes: 0,
            totaal_uren: 0.0,
            unprocessed: Vec::new(),
            unmapped_codes: Vec::new(),
        }
    }
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registreert een succesvol verwerkt bestand
    pub fn record_file_success(&mut self, rows: usize, skipped: usize) {
        self.files_processed += 1;
        self.rows_parsed += rows;
        self.rows_skipped += skipped;
    }

    /// Registreert een niet verwerkt bestand
    pub fn record_file_failure(&mut self, filename: &str, reason: &str) {
        self.files_failed += 1;
        self.unprocessed.push(UnprocessedFile {
            filename: filename.to_string(),
            reason: reason.to_string(),
        });
    }

    /// Zet de resultaattellers na de aggregatie
    pub fn set_totals(&mut self, projects: usize, bewakingscodes: usize, totaal_uren: f64) {
        self.projects = projects;
        self.bewakingscodes = bewakingscodes;
        self.totaal_uren = totaal_uren;
    }

    /// Zet de duur van de batch
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Bepaalt de eindstatus op basis van de tellers
    pub fn finalize(&mut self) {
        self.status = if self.files_failed == 0 {
            BatchStatus::Success
        } else if self.files_processed > 0 {
            BatchStatus::PartialSuccess
        } else {
            BatchStatus::Failed
        };
    }

    /// Toont het rapport op de console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("BATCHRAPPORT");
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duur: {:.2}s", self.duration_secs);

        println!("\n--- SAMENVATTING ---");
        println!(
            "Bestanden: {} verwerkt, {} niet verwerkt",
            self.files_processed, self.files_failed
        );
        println!(
            "Dataregels: {} geparst, {} overgeslagen",
            self.rows_parsed, self.rows_skipped
        );
        println!("Projecten: {}", self.projects);
        println!("Bewakingscodes: {}", self.bewakingscodes);
        println!("Totaal aantal uren: {:.2}", self.totaal_uren);

        if !self.unprocessed.is_empty() {
            println!("\n--- NIET VERWERKT ({}) ---", self.unprocessed.len());
            for file in &self.unprocessed {
                println!("  {}: {}", file.filename, file.reason);
            }
        }

        if !self.unmapped_codes.is_empty() {
            println!(
                "\n--- ONBEKENDE SPECIFICATIECODES ({}) ---",
                self.unmapped_codes.len()
            );
            for code in &self.unmapped_codes {
                println!("  {}", code);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Slaat het rapport op als JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Compacte samenvatting voor het log
    pub fn summary(&self) -> String {
        format!(
            "{} bestand(en) verwerkt, {} niet verwerkt, {} projecten, {:.2} uren",
            self.files_processed, self.files_failed, self.projects, self.totaal_uren
        )
    }
}
