//! Batchdriver: van ruwe bestanden naar draaitabel, feitentabel en rapport
//!
//! Per bestand is het parsen puur en onafhankelijk; de bestanden gaan
//! daarom parallel door de parser. Het samenvoegen en aggregeren gebeurt
//! pas als alle resultaten binnen zijn, omdat de kolomset en de sommen
//! van de volledige batch afhangen.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use specuren::{ParseResult, SpecRow, SpecurenError};

use crate::aggregate::{aggregate, FactRow, PivotTable};
use crate::config::VertaalTabel;
use crate::report::BatchReport;

/// Eén aangeboden bestand, volledig in het geheugen
#[derive(Debug, Clone)]
pub struct RawFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Leest een bestand van schijf
    pub fn read(path: &Path) -> std::io::Result<Self> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path)?;
        Ok(Self { filename, bytes })
    }
}

/// Resultaat van één batchrun
#[derive(Debug)]
pub struct BatchResult {
    pub pivot: PivotTable,
    pub facts: Vec<FactRow>,
    pub report: BatchReport,
}

/// Accumulator voor één batch
pub struct Batch<'a> {
    tabel: &'a VertaalTabel,
    jobs: Option<usize>,
    files: Vec<RawFile>,
    report: BatchReport,
}

impl<'a> Batch<'a> {
    pub fn new(tabel: &'a VertaalTabel) -> Self {
        Self {
            tabel,
            jobs: None,
            files: Vec::new(),
            report: BatchReport::new(),
        }
    }

    /// Maximaal aantal parallel geparste bestanden
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Voegt een bestand aan de batch toe
    pub fn push(&mut self, file: RawFile) {
        self.files.push(file);
    }

    /// Registreert een bestand dat al vóór het parsen afviel (bv. leesfout)
    pub fn push_unreadable(&mut self, filename: &str, reason: &str) {
        self.report.record_file_failure(filename, reason);
    }

    /// Verwerkt de hele batch: dedupliceren, parallel parsen, samenvoegen
    /// en één aggregatiepas over alle geaccepteerde regels
    pub fn run(mut self) -> BatchResult {
        let started = Instant::now();

        let unique = self.dedupe_by_checksum();
        let results = parse_all(&unique, self.jobs);

        // Samenvoegen in aanbiedvolgorde; per projectcode telt de eerste
        let mut seen_projects: HashMap<String, String> = HashMap::new();
        let mut merged: Vec<(String, SpecRow)> = Vec::new();

        for (file, result) in unique.iter().zip(results) {
            match result {
                Ok(parsed) => {
                    if let Some(earlier) = seen_projects.get(&parsed.projectcode) {
                        warn!(
                            file = %file.filename,
                            project = %parsed.projectcode,
                            "projectcode al verwerkt, bestand overgeslagen"
                        );
                        self.report.record_file_failure(
                            &file.filename,
                            &format!(
                                "Projectcode {} is al verwerkt via {}",
                                parsed.projectcode, earlier
                            ),
                        );
                        continue;
                    }

                    info!(
                        file = %file.filename,
                        project = %parsed.projectcode,
                        encoding = parsed.encoding,
                        rows = parsed.rows.len(),
                        "bestand verwerkt"
                    );

                    seen_projects.insert(parsed.projectcode.clone(), file.filename.clone());
                    self.report
                        .record_file_success(parsed.rows.len(), parsed.skipped_rows.len());

                    let projectcode = parsed.projectcode;
                    merged.extend(
                        parsed
                            .rows
                            .into_iter()
                            .map(|row| (projectcode.clone(), row)),
                    );
                }
                Err(err) => {
                    warn!(file = %file.filename, error = %err, "bestand niet verwerkt");
                    self.report
                        .record_file_failure(&file.filename, &err.to_string());
                }
            }
        }

        let result = aggregate(&merged, self.tabel);
        self.report.unmapped_codes = result.unmapped;
        self.report.set_totals(
            result.pivot.rows.len(),
            result.pivot.codes.len(),
            result.pivot.totaal_uren(),
        );
        self.report.set_duration(started.elapsed());
        self.report.finalize();

        BatchResult {
            pivot: result.pivot,
            facts: result.facts,
            report: self.report,
        }
    }

    /// Filtert bestanden met identieke inhoud (blake3) uit de batch
    fn dedupe_by_checksum(&mut self) -> Vec<RawFile> {
        let mut seen: HashMap<String, String> = HashMap::new();
        let mut unique = Vec::new();

        for file in std::mem::take(&mut self.files) {
            let checksum = blake3::hash(&file.bytes).to_hex().to_string();
            match seen.get(&checksum) {
                Some(earlier) => {
                    warn!(file = %file.filename, duplicate_of = %earlier, "duplicaat overgeslagen");
                    self.report.record_file_failure(
                        &file.filename,
                        &format!("Identieke inhoud als {}", earlier),
                    );
                }
                None => {
                    seen.insert(checksum, file.filename.clone());
                    unique.push(file);
                }
            }
        }

        unique
    }
}

/// Verwerkt een batch in één aanroep
pub fn run_batch(files: Vec<RawFile>, tabel: &VertaalTabel, jobs: Option<usize>) -> BatchResult {
    let mut batch = Batch::new(tabel).with_jobs(jobs);
    for file in files {
        batch.push(file);
    }
    batch.run()
}

/// Parst alle bestanden parallel, met behoud van volgorde
fn parse_all(files: &[RawFile], jobs: Option<usize>) -> Vec<Result<ParseResult, SpecurenError>> {
    let parse = || {
        files
            .par_iter()
            .map(|file| specuren::parse(&file.bytes))
            .collect()
    };

    match jobs {
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(parse),
            Err(err) => {
                warn!(error = %err, "threadpool niet beschikbaar, standaardpool gebruikt");
                parse()
            }
        },
        None => parse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::BatchStatus;

    fn export(projectcode: &str, rows: &[&str]) -> Vec<u8> {
        let mut content = format!("SPECIFICATIE UREN van project: {}\n\n\n", projectcode);
        content.push_str(";Omschrijving;Minuten;Uren;Toeslag uren (%);Uren;Uurtarief;= Loonkosten\n");
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        content.into_bytes()
    }

    fn tabel() -> VertaalTabel {
        VertaalTabel::from_preset("standaard").unwrap()
    }

    #[test]
    fn test_single_file_batch() {
        let files = vec![RawFile::new(
            "225028.csv",
            export(
                "225028",
                &["020CAL;Calibreren;1.902,85;31,71;;31,71;45,00;1.426,95"],
            ),
        )];

        let result = run_batch(files, &tabel(), None);
        assert_eq!(result.report.status, BatchStatus::Success);
        assert_eq!(result.report.files_processed, 1);
        assert_eq!(result.pivot.rows.len(), 1);
        assert_eq!(result.pivot.codes, vec!["K601"]);
    }

    #[test]
    fn test_bad_file_does_not_abort_batch() {
        let files = vec![
            RawFile::new("goed.csv", export("225028", &["020CAL;Calibreren;60,00;1,00;;1,00;45,00;45,00"])),
            RawFile::new("kapot.csv", b"dit is geen specificatie-uren export\n".to_vec()),
        ];

        let result = run_batch(files, &tabel(), None);
        assert_eq!(result.report.status, BatchStatus::PartialSuccess);
        assert_eq!(result.report.files_processed, 1);
        assert_eq!(result.report.files_failed, 1);
        assert_eq!(result.report.unprocessed[0].filename, "kapot.csv");
        assert_eq!(result.pivot.rows.len(), 1);
    }

    #[test]
    fn test_duplicate_content_is_idempotent() {
        let bytes = export(
            "225028",
            &["020CAL;Calibreren;1.902,85;31,71;;31,71;45,00;1.426,95"],
        );
        let once = run_batch(
            vec![RawFile::new("a.csv", bytes.clone())],
            &tabel(),
            None,
        );
        let twice = run_batch(
            vec![
                RawFile::new("a.csv", bytes.clone()),
                RawFile::new("kopie van a.csv", bytes),
            ],
            &tabel(),
            None,
        );

        assert_eq!(once.pivot, twice.pivot);
        assert_eq!(twice.report.files_failed, 1);
        assert!(twice.report.unprocessed[0].reason.contains("a.csv"));
    }

    #[test]
    fn test_duplicate_projectcode_skipped() {
        let files = vec![
            RawFile::new("a.csv", export("225028", &["020CAL;Calibreren;60,00;1,00;;1,00;45,00;45,00"])),
            RawFile::new("b.csv", export("225028", &["090SPU;Spuiten;120,00;2,00;;2,00;45,00;90,00"])),
        ];

        let result = run_batch(files, &tabel(), None);
        assert_eq!(result.report.files_processed, 1);
        assert_eq!(result.report.files_failed, 1);
        // Alleen de regels van het eerste bestand tellen mee
        assert_eq!(result.pivot.codes, vec!["K601"]);
    }

    #[test]
    fn test_empty_batch() {
        let result = run_batch(Vec::new(), &tabel(), None);
        assert_eq!(result.report.status, BatchStatus::Success);
        assert!(result.pivot.rows.is_empty());
        assert!(result.facts.is_empty());
    }

    #[test]
    fn test_all_files_invalid_yields_empty_pivot() {
        let files = vec![
            RawFile::new("een.csv", b"onzin\n".to_vec()),
            RawFile::new("twee.csv", b"nog meer onzin\n".to_vec()),
        ];

        let result = run_batch(files, &tabel(), None);
        assert_eq!(result.report.status, BatchStatus::Failed);
        assert!(result.pivot.rows.is_empty());
        assert_eq!(result.report.unprocessed.len(), 2);
    }

    #[test]
    fn test_jobs_limit() {
        let files: Vec<RawFile> = (0..8)
            .map(|i| {
                RawFile::new(
                    format!("22502{}.csv", i),
                    export(
                        &format!("22502{}", i),
                        &["020CAL;Calibreren;60,00;1,00;;1,00;45,00;45,00"],
                    ),
                )
            })
            .collect();

        let result = run_batch(files, &tabel(), Some(2));
        assert_eq!(result.report.files_processed, 8);
        assert_eq!(result.pivot.rows.len(), 8);
    }
}
