//! Validatie van de projectkop en de vaste kolomkop

use crate::{SpecurenError, DELIMITER, HEADER_LABEL, PROJECT_PREFIX};

/// Geeft de eerste regel van de tekst, zonder regeleinde
pub fn first_line(text: &str) -> &str {
    let line = match memchr::memchr(b'\n', text.as_bytes()) {
        Some(pos) => &text[..pos],
        None => text,
    };
    line.strip_suffix('\r').unwrap_or(line)
}

/// Haalt de projectcode uit de eerste regel
///
/// De code deelt zijn cel met een vaste tekst (Excel-cel A1):
/// `SPECIFICATIE UREN van project: <projectcode>`. De rest van de regel
/// kan lege `;`-cellen bevatten; alleen de eerste cel telt.
pub fn extract_projectcode(line: &str) -> Result<String, SpecurenError> {
    let cell = line.split(DELIMITER).next().unwrap_or("").trim();

    let code = cell
        .strip_prefix(PROJECT_PREFIX)
        .map(str::trim)
        .ok_or_else(|| SpecurenError::pattern_mismatch(cell))?;

    if code.is_empty() {
        return Err(SpecurenError::pattern_mismatch(cell));
    }

    Ok(code.to_string())
}

/// Controleert dat de kolomkop het verwachte label als tweede kolom heeft
///
/// Het label moet exact overeenkomen, zonder trimmen: de export schrijft
/// `;Omschrijving;...` en elke afwijking wijst op een ander bestandstype.
pub fn validate_header_row(line: Option<&str>) -> Result<(), SpecurenError> {
    let line = line.ok_or_else(|| SpecurenError::label_mismatch("<geen kolomkop>"))?;

    let mut fields = line.split(DELIMITER);
    let second = fields
        .nth(1)
        .ok_or_else(|| SpecurenError::label_mismatch("<geen tweede kolom>"))?;

    if second != HEADER_LABEL {
        return Err(SpecurenError::label_mismatch(second));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("regel 1\nregel 2"), "regel 1");
        assert_eq!(first_line("regel 1\r\nregel 2"), "regel 1");
        assert_eq!(first_line("zonder regeleinde"), "zonder regeleinde");
    }

    #[test]
    fn test_extract_projectcode() {
        let code = extract_projectcode("SPECIFICATIE UREN van project: 225028").unwrap();
        assert_eq!(code, "225028");
    }

    #[test]
    fn test_extract_projectcode_with_trailing_cells() {
        // Excel-exports vullen de rest van de regel met lege cellen
        let code = extract_projectcode("SPECIFICATIE UREN van project: 225310;;;;;;;").unwrap();
        assert_eq!(code, "225310");
    }

    #[test]
    fn test_extract_projectcode_missing_prefix() {
        let err = extract_projectcode("UREN van project: 225028").unwrap_err();
        assert!(matches!(
            err,
            SpecurenError::HeaderPatternMismatch { .. }
        ));
    }

    #[test]
    fn test_extract_projectcode_empty_code() {
        let err = extract_projectcode("SPECIFICATIE UREN van project: ").unwrap_err();
        assert!(matches!(
            err,
            SpecurenError::HeaderPatternMismatch { .. }
        ));
    }

    #[test]
    fn test_validate_header_row() {
        assert!(validate_header_row(Some(
            ";Omschrijving;Minuten;Uren;Toeslag uren (%);Uren;Uurtarief;= Loonkosten"
        ))
        .is_ok());
    }

    #[test]
    fn test_validate_header_row_misspelled() {
        let err = validate_header_row(Some(";Beschrijving;Minuten;Uren")).unwrap_err();
        match err {
            SpecurenError::HeaderLabelMismatch { found, .. } => {
                assert_eq!(found, "Beschrijving");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_header_row_missing() {
        assert!(validate_header_row(None).is_err());
        assert!(validate_header_row(Some("enkelkolom")).is_err());
    }
}
