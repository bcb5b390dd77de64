mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use pairpass::{Sha256Hex, derive};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pairpass",
    version,
    about = "Reproducible password derived from two secrets"
)]
struct Cli {
    /// Password length
    #[arg(short, long, default_value_t = ui::DEFAULT_LENGTH, value_parser = parse_length)]
    length: usize,

    /// Trim and NFC-normalise secrets before deriving
    #[arg(long)]
    nfc: bool,

    /// Print only the password
    #[arg(short, long)]
    quiet: bool,
}

fn parse_length(s: &str) -> Result<usize, String> {
    let length: usize = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if !(ui::MIN_LENGTH..=ui::MAX_LENGTH).contains(&length) {
        return Err(format!(
            "length must be between {} and {}",
            ui::MIN_LENGTH,
            ui::MAX_LENGTH
        ));
    }
    Ok(length)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let options = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        quiet: cli.quiet,
    };

    let (first, first_info) = ui::prompt_secret(1, cli.nfc)?;
    let (second, second_info) = ui::prompt_secret(2, cli.nfc)?;

    if let Err(err) = ui::validate_secret(&first, 1).and(ui::validate_secret(&second, 2)) {
        debug!(%err, "secret rejected");
        anyhow::bail!(ui::VALIDATION_MESSAGE);
    }

    let run = || {
        derive(&Sha256Hex, &first, &second, cli.length)
            .context("An error occurred while generating the password")
    };

    let (derivation, elapsed) = if options.quiet {
        let start = std::time::Instant::now();
        let derivation = run()?;
        (derivation, start.elapsed())
    } else {
        ui::show_progress(options.unicode_support, run)?
    };

    ui::display_output(&derivation, &[first_info, second_info], elapsed, &options);

    Ok(())
}
