//! Parser voor de dataregels van de export

use tracing::debug;

use crate::number::{parse_decimal, parse_decimal_or_zero};
use crate::types::{SkippedRow, SpecRow};
use crate::{DATA_START_LINE, DELIMITER};

/// Minimaal aantal velden voor een geldige dataregel
const FIELD_COUNT: usize = 8;

/// Parst de dataregels uit de body-tekst (alles na de kolomkop)
///
/// Regels met te weinig velden worden overgeslagen en geteld, nooit
/// fataal voor het bestand. Volledig lege regels worden genegeerd.
pub fn parse_rows(body: &str) -> (Vec<SpecRow>, Vec<SkippedRow>) {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(_) => continue,
        };

        // Regelnummer in het volledige bestand (de body begint na de kolomkop)
        let line = record
            .position()
            .map(|p| p.line() as usize + DATA_START_LINE)
            .unwrap_or(0);

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        if record.len() < FIELD_COUNT {
            debug!(line, fields = record.len(), "dataregel overgeslagen");
            skipped.push(SkippedRow {
                line,
                fields: record.len(),
            });
            continue;
        }

        rows.push(SpecRow {
            specificatiecode: record.get(0).unwrap_or("").trim().to_string(),
            omschrijving: record.get(1).unwrap_or("").trim().to_string(),
            minuten: parse_decimal_or_zero(record.get(2).unwrap_or("")),
            uren: parse_decimal_or_zero(record.get(3).unwrap_or("")),
            toeslag_pct: parse_decimal(record.get(4).unwrap_or("")),
            netto_uren: parse_decimal_or_zero(record.get(5).unwrap_or("")),
            uurtarief: parse_decimal_or_zero(record.get(6).unwrap_or("")),
            loonkosten: parse_decimal_or_zero(record.get(7).unwrap_or("")),
        });
    }

    (rows, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_row() {
        let body = "020CAL;Afkorten en calibreren;1.902,85;31,71;;31,71;45,00;1.426,95\n";
        let (rows, skipped) = parse_rows(body);

        assert_eq!(rows.len(), 1);
        assert!(skipped.is_empty());

        let row = &rows[0];
        assert_eq!(row.specificatiecode, "020CAL");
        assert_eq!(row.omschrijving, "Afkorten en calibreren");
        assert_eq!(row.minuten, 1902.85);
        assert_eq!(row.uren, 31.71);
        assert_eq!(row.toeslag_pct, None);
        assert_eq!(row.netto_uren, 31.71);
        assert_eq!(row.uurtarief, 45.0);
        assert_eq!(row.loonkosten, 1426.95);
    }

    #[test]
    fn test_parse_negative_surcharge() {
        let body = "090SPU;Spuiten;600,00;10,00;-2,20;9,78;45,00;440,10\n";
        let (rows, _) = parse_rows(body);
        assert_eq!(rows[0].toeslag_pct, Some(-2.20));
        assert_eq!(rows[0].netto_uren, 9.78);
    }

    #[test]
    fn test_skip_short_row() {
        let body = "020CAL;Afkorten en calibreren;1.902,85;31,71;;31,71;45,00;1.426,95\n\
                    kapotte;regel\n\
                    090SPU;Spuiten;600,00;10,00;;10,00;45,00;450,00\n";
        let (rows, skipped) = parse_rows(body);

        assert_eq!(rows.len(), 2);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].fields, 2);
        assert_eq!(skipped[0].line, DATA_START_LINE + 2);
    }

    #[test]
    fn test_ignore_empty_rows() {
        let body = ";;;;;;;\n020CAL;Calibreren;0,00;1,00;;1,00;45,00;45,00\n";
        let (rows, skipped) = parse_rows(body);
        assert_eq!(rows.len(), 1);
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_extra_trailing_fields_tolerated() {
        let body = "020CAL;Calibreren;0,00;1,00;;1,00;45,00;45,00;;\n";
        let (rows, skipped) = parse_rows(body);
        assert_eq!(rows.len(), 1);
        assert!(skipped.is_empty());
    }
}
