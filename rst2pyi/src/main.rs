//! rst2pyi — generate `.pyi` stubs from MicroPython's library documentation.
//!
//! `rst2pyi <DEST>` runs every generator against the upstream pages and writes the stubs into
//! `DEST`. `--base-url` points at a local docs checkout instead, and `--module` restricts the
//! run to selected generators.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rst2pyi::{modules, Config, Rst2Pyi};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rst2pyi",
    version,
    about = "Generate typed .pyi stubs from MicroPython's reStructuredText library docs"
)]
struct Cli {
    /// Destination directory for the generated stubs
    dest: PathBuf,

    /// Directory or URL holding the `.rst` pages
    #[arg(long, default_value = rst2pyi::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Run only this generator. Can be given multiple times.
    #[arg(short = 'm', long = "module")]
    modules: Vec<String>,

    /// Output format: pyi (default), json
    #[arg(short = 'f', long, default_value = "pyi")]
    format: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::new(&cli.dest)
        .with_base_url(&cli.base_url)
        .with_modules(cli.modules)
        .with_format(&cli.format);

    if let Some(unknown) = config
        .modules
        .iter()
        .find(|name| modules::find(name).is_none())
    {
        bail!(
            "unknown module: {}. Known modules: {}",
            unknown,
            modules::names().collect::<Vec<_>>().join(", ")
        );
    }

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let mut shed = Rst2Pyi::from_config(&config)?;
    for (name, generate) in modules::GENERATORS {
        if !config.wants(name) {
            continue;
        }
        tracing::info!(module = name, "generating");
        generate(&mut shed).with_context(|| format!("failed to generate `{}`", name))?;
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise the level follows the `-v` count. Logs go to stderr.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
