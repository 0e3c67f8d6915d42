//! formfields - validate, save and render JSON-described forms

use anyhow::Result;
use clap::Parser;
use formfields::cli::{self, Cli};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formfields=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Cli::parse();
    let mut stdout = io::stdout().lock();
    let code = match cli::run(args, &mut stdout) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            1
        }
    };
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
