//! # specuren
//!
//! Parser voor de specificatie-uren CSV-exports uit Groeneveldsoftware.
//!
//! ## Features
//!
//! - Encodering-detectie met fallback (UTF-8, windows-1252, iso-8859-15)
//! - Validatie van de projectkop en de vaste kolomkop
//! - Getallen in Europees formaat (`1.902,85`)
//! - Kapotte dataregels worden overgeslagen, niet fataal
//!
//! ## Usage
//!
//! ```rust
//! let bytes = b"SPECIFICATIE UREN van project: 225028\n\n\n\
//!     ;Omschrijving;Minuten;Uren;Toeslag uren (%);Uren;Uurtarief;= Loonkosten\n\
//!     020CAL;Afkorten en calibreren;1.902,85;31,71;;31,71;45,00;1.426,95\n";
//!
//! let result = specuren::parse(bytes).unwrap();
//! assert_eq!(result.projectcode, "225028");
//! assert_eq!(result.rows.len(), 1);
//! ```

pub mod decode;
pub mod error;
pub mod header;
pub mod number;
pub mod rows;
pub mod types;

pub use error::SpecurenError;
pub use types::{ParseResult, SkippedRow, SpecRow};

use std::path::Path;

/// Veldscheider van de export
pub const DELIMITER: char = ';';

/// Vaste tekst die de projectcode voorafgaat in cel A1
pub const PROJECT_PREFIX: &str = "SPECIFICATIE UREN van project: ";

/// Verwacht label van de tweede kolom in de kolomkop
pub const HEADER_LABEL: &str = "Omschrijving";

/// Regelindex (0-based) van de kolomkop; regel 2 en 3 worden genegeerd
pub const HEADER_ROW_INDEX: usize = 3;

/// Aantal regels vóór de eerste dataregel
pub const DATA_START_LINE: usize = 4;

/// Parst één specificatie-uren export uit ruwe bytes
///
/// # Errors
///
/// Geeft [`SpecurenError`] als geen encodering de bytes foutloos decodeert,
/// als de eerste regel niet het projectkop-patroon volgt, of als de
/// kolomkop niet het verwachte label heeft. Kapotte dataregels zijn geen
/// fout; die staan in [`ParseResult::skipped_rows`].
pub fn parse(bytes: &[u8]) -> Result<ParseResult, SpecurenError> {
    let (text, encoding) = decode::decode(bytes)?;

    let projectcode = header::extract_projectcode(header::first_line(&text))?;
    header::validate_header_row(text.lines().nth(HEADER_ROW_INDEX))?;

    let body = body_slice(&text);
    let (rows, skipped_rows) = rows::parse_rows(body);

    Ok(ParseResult {
        projectcode,
        encoding,
        rows,
        skipped_rows,
    })
}

/// Leest en parst een export vanaf schijf
pub fn parse_path(path: &Path) -> Result<ParseResult, SpecurenError> {
    let bytes = std::fs::read(path)?;
    parse(&bytes)
}

/// Geeft de tekst vanaf de eerste dataregel
fn body_slice(text: &str) -> &str {
    memchr::memchr_iter(b'\n', text.as_bytes())
        .nth(DATA_START_LINE - 1)
        .map(|pos| &text[pos + 1..])
        .unwrap_or("")
}
