//! Decodering van de ruwe bytes met encodering-fallback
//!
//! De exports komen zowel in UTF-8 als in West-Europese single-byte
//! encoderingen voor. We proberen de kandidaten in vaste volgorde en
//! stoppen bij de eerste die foutloos decodeert.

use encoding_rs::Encoding;

use crate::SpecurenError;

/// Single-byte kandidaten, geprobeerd na de strikte UTF-8 check
static FALLBACK_ENCODINGS: [&Encoding; 2] = [encoding_rs::WINDOWS_1252, encoding_rs::ISO_8859_15];

/// Decodeert de bytes en geeft de tekst plus de naam van de gebruikte encodering
pub fn decode(bytes: &[u8]) -> Result<(String, &'static str), SpecurenError> {
    // Strikte UTF-8 eerst (SIMD-gevalideerd)
    if let Ok(text) = simdutf8::basic::from_utf8(bytes) {
        return Ok((text.to_string(), encoding_rs::UTF_8.name()));
    }

    for encoding in FALLBACK_ENCODINGS {
        let (text, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Ok((text.into_owned(), encoding.name()));
        }
    }

    Err(SpecurenError::EncodingFailure)
}
