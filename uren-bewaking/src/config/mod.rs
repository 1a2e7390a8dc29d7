//! Configuratie: de vertaaltabel van specificatie- naar bewakingscode
//!
//! De tabel is procesbrede configuratie, geen afgeleide van de input.
//! De ingebouwde preset volgt de actuele bedrijfstabel; met `--mapping`
//! kan een alternatieve tabel uit een JSON-bestand geladen worden.

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};

/// De vertaaltabel, in tabelvolgorde
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VertaalTabel {
    regels: Vec<VertaalRegel>,
}

/// Eén regel uit de vertaaltabel
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VertaalRegel {
    /// Specificatiecode uit de export
    pub specificatiecode: String,

    /// Omschrijving van de activiteit
    pub omschrijving: String,

    /// Bewakingscode; `null` betekent bewust uitgesloten van de output
    pub bewakingscode: Option<String>,

    /// Omschrijving van de bewakingscode
    #[serde(default)]
    pub bewakingomschrijving: Option<String>,
}

impl VertaalTabel {
    /// Laadt een vertaaltabel uit een JSON-bestand
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read mapping file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse mapping JSON")
    }

    /// Laadt een ingebouwde preset
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "standaard" => Self::load_embedded(include_str!("presets/standaard.json")),
            _ => anyhow::bail!("Unknown mapping preset: {}. Use: standaard", preset),
        }
    }

    /// Presetnaam of pad naar een JSON-bestand
    pub fn from_spec(spec: &str) -> Result<Self> {
        match spec {
            "standaard" => Self::from_preset(spec),
            _ => Self::load(Path::new(spec)),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded mapping")
    }

    /// Zoekt de bewakingscode voor een specificatiecode
    ///
    /// Exacte match, hoofdlettergevoelig. Geeft `None` voor codes die
    /// niet in de tabel staan én voor codes met `bewakingscode: null`.
    pub fn lookup(&self, specificatiecode: &str) -> Option<&str> {
        self.regels
            .iter()
            .find(|r| r.specificatiecode == specificatiecode)
            .and_then(|r| r.bewakingscode.as_deref())
    }

    /// Staat de code in de tabel (ook als hij op `null` gemapt is)?
    pub fn contains(&self, specificatiecode: &str) -> bool {
        self.regels
            .iter()
            .any(|r| r.specificatiecode == specificatiecode)
    }

    /// Alle regels, in tabelvolgorde
    pub fn regels(&self) -> &[VertaalRegel] {
        &self.regels
    }
}
