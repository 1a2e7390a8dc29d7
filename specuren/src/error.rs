//! Fouttypes voor de specuren crate

use thiserror::Error;

/// Fouten die kunnen optreden bij het parsen van een specificatie-uren export
#[derive(Debug, Error)]
pub enum SpecurenError {
    /// I/O-fout bij het lezen van het bestand
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Geen enkele kandidaat-encodering kon de bytes foutloos decoderen
    #[error("Unable to decode file with supported encodings")]
    EncodingFailure,

    /// De eerste regel bevat niet het verwachte projectkop-patroon
    #[error("Header pattern mismatch: expected \"{expected}<projectcode>\", found \"{found}\"")]
    HeaderPatternMismatch { expected: &'static str, found: String },

    /// De kolomkop op de vaste regel heeft niet het verwachte label
    #[error("Header label mismatch: expected \"{expected}\" as second column, found \"{found}\"")]
    HeaderLabelMismatch { expected: &'static str, found: String },
}

impl SpecurenError {
    /// Maakt een patroon-fout met het gevonden fragment als context
    pub fn pattern_mismatch(found: impl Into<String>) -> Self {
        Self::HeaderPatternMismatch {
            expected: crate::PROJECT_PREFIX,
            found: found.into(),
        }
    }

    /// Maakt een label-fout met het gevonden label als context
    pub fn label_mismatch(found: impl Into<String>) -> Self {
        Self::HeaderLabelMismatch {
            expected: crate::HEADER_LABEL,
            found: found.into(),
        }
    }
}
