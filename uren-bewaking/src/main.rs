//! CLI-ingang voor uren-bewaking

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use uren_bewaking::cli::{self, Commands, ConvertArgs};

/// Converteer specificatie-uren exports naar uren per bewakingscode
#[derive(Parser)]
#[command(name = "uren-bewaking")]
#[command(author, version)]
#[command(about = "Converteer specificatie-uren CSV-exports naar uren per bewakingscode per project")]
#[command(
    long_about = "Leest een map met Groeneveld specificatie-uren exports, valideert en parst elk \
bestand, en aggregeert de uren per bewakingscode per project.\n\nStandaard draait de conversie; \
gebruik 'mapping' om de actieve vertaaltabel te bekijken."
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Verhoog de verbositeit (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Stille modus
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Subcommando (standaard: conversie)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Argumenten voor de conversie (standaardcommando)
    #[command(flatten)]
    convert: Option<ConvertArgs>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Some(Commands::Mapping { mapping }) => cli::cmd_mapping(&mapping)?,
        None => {
            let args = cli
                .convert
                .context("Conversie-argumenten vereist (--input, zie --help)")?;
            cli::cmd_convert(&args)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
