use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod output;

use bibprep_core::{Policy, VenueTable, config_file};
use output::ColorMode;

/// BibTeX cleaner - normalize raw reference-manager exports into lean,
/// consistent bibliography files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the raw .bib file to clean
    #[arg(default_value = "./raw.bib")]
    input: PathBuf,

    /// Path the cleaned .bib file is written to
    #[arg(default_value = "./ref.bib")]
    output: PathBuf,

    /// Print an inventory of the input instead of cleaning it
    #[arg(long)]
    inspect: bool,

    /// Legacy behavior: entry URLs win over DOIs and author lists are never
    /// shortened; booktitles gain a "Proceedings of" prefix
    #[arg(long)]
    legacy: bool,

    /// Path to a TOML config file (default: ./.bibprep.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bibprep_core=info,bibprep_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let color = ColorMode(!cli.no_color);
    let mut writer: Box<dyn Write> = Box::new(std::io::stdout());

    let (policy, venues) = build_config(&cli)?;

    if cli.inspect {
        let records = bibprep_core::bib::read_bibliography(&cli.input)
            .with_context(|| format!("failed to read {}", cli.input.display()))?;
        output::print_inventory(&mut writer, &records, color)?;
        return Ok(());
    }

    let outcome = bibprep_core::clean_file(&cli.input, &cli.output, &venues, &policy)
        .with_context(|| format!("failed to clean {}", cli.input.display()))?;

    if !outcome.errored.is_empty() {
        output::print_errored_keys(&mut writer, &outcome.errored, color)?;
    }

    tracing::info!(
        total = outcome.total,
        written = outcome.written,
        filtered = outcome.filtered,
        errored = outcome.errored.len(),
        "bibliography cleaned"
    );

    Ok(())
}

/// Resolve the effective policy and venue table: preset first, then config
/// file overrides on top.
fn build_config(cli: &Cli) -> anyhow::Result<(Policy, VenueTable)> {
    let mut policy = if cli.legacy {
        Policy::legacy()
    } else {
        Policy::default()
    };
    let mut venues = VenueTable::builtin();

    let config = if let Some(path) = &cli.config {
        Some(
            config_file::load_from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
        )
    } else {
        let default = PathBuf::from(config_file::DEFAULT_CONFIG_NAME);
        if default.exists() {
            Some(
                config_file::load_from_path(&default)
                    .with_context(|| format!("failed to load config {}", default.display()))?,
            )
        } else {
            None
        }
    };

    if let Some(config) = &config {
        config_file::apply(config, &mut policy, &mut venues);
    }

    Ok((policy, venues))
}
