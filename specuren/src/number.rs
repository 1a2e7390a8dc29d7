//! Parsen van getallen in Europees formaat
//!
//! De export gebruikt komma als decimaalteken en punt als
//! duizendtalscheider, bv. `1.902,85`. Toeslagvelden zijn vaak leeg.

/// Parst een token in Europees formaat naar een f64
///
/// Lege of alleen-witruimte input geeft `None`.
pub fn parse_decimal(token: &str) -> Option<f64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    // Duizendtalscheiders weg, decimaalteken naar canoniek
    let normalized: String = token
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    fast_float::parse(&normalized).ok()
}

/// Als [`parse_decimal`], maar lege of onleesbare cellen tellen als nul
///
/// Uren- en kostenvelden sommeren met 0 voor ontbrekende waarden.
pub fn parse_decimal_or_zero(token: &str) -> f64 {
    parse_decimal(token).unwrap_or(0.0)
}
