//! # uren-bewaking
//!
//! Batchconversie van Groeneveld specificatie-uren exports naar één
//! overzicht met uren per bewakingscode per project, plus een platte
//! kostprijs-feitentabel voor downstream analyse.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Converteer een map met exports
//! uren-bewaking --input ./specificatieuren --output ./resultaat
//!
//! # Met feitentabel en JSON-rapport
//! uren-bewaking --input ./specificatieuren --facts --report rapport.json
//!
//! # Toon de actieve vertaaltabel
//! uren-bewaking mapping
//! ```

pub mod aggregate;
pub mod batch;
pub mod cli;
pub mod config;
pub mod export;
pub mod report;

pub use batch::{run_batch, Batch, BatchResult, RawFile};
pub use config::VertaalTabel;
pub use report::{BatchReport, BatchStatus};
