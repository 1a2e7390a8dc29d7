//! Datatypes voor de specuren crate

/// Resultaat van het parsen van één specificatie-uren export
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Projectcode uit de eerste regel (zonder prefix, getrimd)
    pub projectcode: String,

    /// Naam van de encodering waarmee het bestand gedecodeerd is
    pub encoding: &'static str,

    /// Geparste dataregels, in bestandsvolgorde
    pub rows: Vec<SpecRow>,

    /// Overgeslagen regels (verkeerd aantal velden), niet fataal
    pub skipped_rows: Vec<SkippedRow>,
}

/// Eén dataregel uit de export
///
/// De veldposities volgen de vaste kolomkop:
/// `;Omschrijving;Minuten;Uren;Toeslag uren (%);Uren;Uurtarief;= Loonkosten`
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRow {
    /// Specificatiecode (activiteit, bv. "020CAL")
    pub specificatiecode: String,

    /// Omschrijving van de activiteit (informatief)
    pub omschrijving: String,

    /// Minuten
    pub minuten: f64,

    /// Bruto uren
    pub uren: f64,

    /// Toeslagpercentage; vaak leeg in de export
    pub toeslag_pct: Option<f64>,

    /// Netto uren (tweede Uren-kolom)
    pub netto_uren: f64,

    /// Uurtarief
    pub uurtarief: f64,

    /// Loonkosten
    pub loonkosten: f64,
}

/// Een overgeslagen dataregel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Regelnummer in het bestand (1-based)
    pub line: usize,

    /// Aantal gevonden velden
    pub fields: usize,
}
