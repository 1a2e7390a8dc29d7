//! Aggregatie van dataregels naar uren en kostprijs per bewakingscode
//!
//! Groepeert op (projectcode, bewakingscode), sommeert netto uren en
//! loonkosten, en zet het resultaat om in een dichte draaitabel plus een
//! platte feitentabel voor downstream analyse.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

use specuren::SpecRow;

use crate::config::VertaalTabel;

/// Maximale lengte van de Project_Key joinsleutel
const PROJECT_KEY_LEN: usize = 6;

/// Draaitabel: één rij per project, één kolom per bewakingscode
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    /// Bewakingscodes, lexicografisch gesorteerd (kolomvolgorde)
    pub codes: Vec<String>,

    /// Rijen, gesorteerd op projectcode
    pub rows: Vec<ProjectSummaryRow>,
}

/// Eén rij uit de draaitabel
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummaryRow {
    pub projectcode: String,

    /// Gesommeerde netto uren, parallel aan [`PivotTable::codes`];
    /// afwezige combinaties zijn 0, nooit leeg
    pub uren: Vec<f64>,
}

/// Eén rij uit de feitentabel (kostprijs per project × bewakingscode)
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    pub bewakingscode: String,
    pub projectcode: String,
    pub project_key: String,
    pub kostprijs: f64,
}

/// Resultaat van de aggregatie
#[derive(Debug, Clone)]
pub struct AggregateResult {
    pub pivot: PivotTable,

    /// Feitentabel, gesorteerd op (bewakingscode, projectcode);
    /// alleen combinaties met kostprijs ongelijk aan nul
    pub facts: Vec<FactRow>,

    /// Specificatiecodes die niet in de vertaaltabel staan, gesorteerd
    pub unmapped: Vec<String>,
}

impl PivotTable {
    /// Totaal aantal uren over de hele tabel
    pub fn totaal_uren(&self) -> f64 {
        self.rows.iter().flat_map(|r| r.uren.iter()).sum()
    }

    /// Totalen per bewakingscode, in kolomvolgorde
    pub fn totalen_per_code(&self) -> Vec<(&str, f64)> {
        self.codes
            .iter()
            .enumerate()
            .map(|(i, code)| {
                let totaal = self.rows.iter().map(|r| r.uren[i]).sum();
                (code.as_str(), totaal)
            })
            .collect()
    }
}

/// Aggregeert de samengevoegde dataregels van alle geaccepteerde bestanden
///
/// Regels waarvan de specificatiecode niet naar een bewakingscode vertaalt
/// dragen nergens aan bij; codes die helemaal niet in de tabel staan worden
/// wel als diagnose teruggegeven. BTreeMaps houden de uitvoer deterministisch.
pub fn aggregate(rows: &[(String, SpecRow)], tabel: &VertaalTabel) -> AggregateResult {
    // (projectcode, bewakingscode) -> (netto uren, loonkosten)
    let mut sums: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();
    let mut unmapped: BTreeSet<String> = BTreeSet::new();

    for (projectcode, row) in rows {
        match tabel.lookup(&row.specificatiecode) {
            Some(code) => {
                let entry = sums
                    .entry((projectcode.clone(), code.to_string()))
                    .or_insert((0.0, 0.0));
                entry.0 += row.netto_uren;
                entry.1 += row.loonkosten;
            }
            None => {
                if !row.specificatiecode.is_empty() && !tabel.contains(&row.specificatiecode) {
                    unmapped.insert(row.specificatiecode.clone());
                }
            }
        }
    }

    let codes: Vec<String> = sums.keys().map(|(_, code)| code.clone()).collect::<BTreeSet<_>>().into_iter().collect();
    let projects: BTreeSet<String> = sums.keys().map(|(project, _)| project.clone()).collect();

    let rows_out = projects
        .into_iter()
        .map(|projectcode| {
            let uren = codes
                .iter()
                .map(|code| {
                    sums.get(&(projectcode.clone(), code.clone()))
                        .map(|(uren, _)| *uren)
                        .unwrap_or(0.0)
                })
                .collect();
            ProjectSummaryRow { projectcode, uren }
        })
        .collect();

    let mut facts: Vec<FactRow> = sums
        .iter()
        .filter(|(_, (_, kosten))| *kosten != 0.0)
        .map(|((projectcode, bewakingscode), (_, kosten))| FactRow {
            bewakingscode: bewakingscode.clone(),
            projectcode: projectcode.clone(),
            project_key: project_key(projectcode),
            kostprijs: *kosten,
        })
        .collect();
    facts.sort_by(|a, b| {
        (&a.bewakingscode, &a.projectcode).cmp(&(&b.bewakingscode, &b.projectcode))
    });

    AggregateResult {
        pivot: PivotTable {
            codes,
            rows: rows_out,
        },
        facts,
        unmapped: unmapped.into_iter().collect(),
    }
}

/// Joinsleutel voor downstream koppelingen: alleen letters en cijfers,
/// ingekort tot [`PROJECT_KEY_LEN`] tekens
pub fn project_key(projectcode: &str) -> String {
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();
    let re = NON_ALNUM.get_or_init(|| Regex::new(r"[^0-9A-Za-z]+").expect("vaste regex"));

    re.replace_all(projectcode, "")
        .chars()
        .take(PROJECT_KEY_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_row(code: &str, netto_uren: f64, loonkosten: f64) -> SpecRow {
        SpecRow {
            specificatiecode: code.to_string(),
            omschrijving: String::new(),
            minuten: netto_uren * 60.0,
            uren: netto_uren,
            toeslag_pct: None,
            netto_uren,
            uurtarief: 45.0,
            loonkosten,
        }
    }

    fn tabel() -> VertaalTabel {
        VertaalTabel::from_preset("standaard").unwrap()
    }

    #[test]
    fn test_sums_within_code() {
        // 020CAL en 035FRE vertalen allebei naar K601
        let rows = vec![
            ("225028".to_string(), spec_row("020CAL", 31.71, 1426.95)),
            ("225028".to_string(), spec_row("035FRE", 10.00, 450.00)),
        ];

        let result = aggregate(&rows, &tabel());
        assert_eq!(result.pivot.codes, vec!["K601"]);
        assert_eq!(result.pivot.rows.len(), 1);
        assert!((result.pivot.rows[0].uren[0] - 41.71).abs() < 1e-9);
    }

    #[test]
    fn test_union_of_codes_with_zero_fill() {
        let rows = vec![
            ("225028".to_string(), spec_row("020CAL", 31.71, 1426.95)),
            ("225028".to_string(), spec_row("090SPU", 8.80, 396.00)),
            ("225310".to_string(), spec_row("020CAL", 5.00, 225.00)),
        ];

        let result = aggregate(&rows, &tabel());
        assert_eq!(result.pivot.codes, vec!["K601", "K604"]);
        assert_eq!(result.pivot.rows.len(), 2);

        // K604 komt alleen in 225028 voor; 225310 krijgt 0
        let row_225310 = &result.pivot.rows[1];
        assert_eq!(row_225310.projectcode, "225310");
        assert_eq!(row_225310.uren, vec![5.00, 0.0]);
    }

    #[test]
    fn test_unmapped_code_excluded_but_reported() {
        let rows = vec![
            ("225028".to_string(), spec_row("020CAL", 1.0, 45.0)),
            ("225028".to_string(), spec_row("999XYZ", 99.0, 4455.0)),
        ];

        let result = aggregate(&rows, &tabel());
        assert_eq!(result.pivot.codes, vec!["K601"]);
        assert!((result.pivot.totaal_uren() - 1.0).abs() < 1e-9);
        assert_eq!(result.unmapped, vec!["999XYZ"]);
    }

    #[test]
    fn test_null_mapped_code_silently_excluded() {
        // 110GLZ staat in de tabel maar heeft bewakingscode null
        let rows = vec![
            ("225028".to_string(), spec_row("020CAL", 1.0, 45.0)),
            ("225028".to_string(), spec_row("110GLZ", 12.0, 540.0)),
        ];

        let result = aggregate(&rows, &tabel());
        assert_eq!(result.pivot.codes, vec!["K601"]);
        assert!(result.unmapped.is_empty());
    }

    #[test]
    fn test_fact_table_sorted_and_nonzero() {
        let rows = vec![
            ("225310".to_string(), spec_row("090SPU", 2.0, 90.0)),
            ("225028".to_string(), spec_row("090SPU", 8.80, 396.00)),
            ("225028".to_string(), spec_row("020CAL", 31.71, 1426.95)),
            ("225028".to_string(), spec_row("100AFM", 0.0, 0.0)),
        ];

        let result = aggregate(&rows, &tabel());
        let keys: Vec<(&str, &str)> = result
            .facts
            .iter()
            .map(|f| (f.bewakingscode.as_str(), f.projectcode.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("K601", "225028"),
                ("K604", "225028"),
                ("K604", "225310"),
            ]
        );
        assert!((result.facts[0].kostprijs - 1426.95).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[], &tabel());
        assert!(result.pivot.codes.is_empty());
        assert!(result.pivot.rows.is_empty());
        assert!(result.facts.is_empty());
    }

    #[test]
    fn test_project_key() {
        assert_eq!(project_key("225028"), "225028");
        assert_eq!(project_key("225028 herzien"), "225028");
        assert_eq!(project_key("22-50"), "2250");
        assert_eq!(project_key("2250289"), "225028");
    }

    #[test]
    fn test_totalen_per_code() {
        let rows = vec![
            ("225028".to_string(), spec_row("020CAL", 1.5, 67.5)),
            ("225310".to_string(), spec_row("020CAL", 2.5, 112.5)),
        ];

        let result = aggregate(&rows, &tabel());
        let totalen = result.pivot.totalen_per_code();
        assert_eq!(totalen.len(), 1);
        assert_eq!(totalen[0].0, "K601");
        assert!((totalen[0].1 - 4.0).abs() < 1e-9);
    }
}
