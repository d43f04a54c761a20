//! `vitrine` - inspect the site's translations from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vitrine_i18n::{I18nConfig, LocaleDetector};
use vitrine_site::{bootstrap, bundled_builder, LanguageSwitcher};

#[derive(Parser)]
#[command(name = "vitrine", version, about = "Resolve and check Vitrine site translations")]
struct Cli {
    /// Locale config file (TOML); built-in defaults otherwise
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Activate this locale instead of the detected one
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the translation of each key path
    Resolve {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// List every key path of the active locale
    Keys,
    /// List the supported languages
    Languages,
    /// Report keys missing from, or absent in, the default locale per locale
    Check,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<I18nConfig> {
    let Some(path) = path else {
        return Ok(I18nConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    I18nConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let builder = bundled_builder().context("Bundled catalogs are malformed")?;
    let state = bootstrap(&config, builder, &LocaleDetector::from_env())
        .context("Failed to initialize translations")?;

    if let Some(locale) = &cli.locale {
        state.use_locale(locale);
    }

    match cli.command {
        Command::Resolve { keys } => {
            for key in keys {
                println!("{}", state.t(&key));
            }
        }
        Command::Keys => {
            let locale = state.current_locale();
            let dictionary = state
                .dictionary(&locale)
                .with_context(|| format!("No dictionary loaded for `{locale}`"))?;
            for path in dictionary.leaf_paths() {
                println!("{path}");
            }
        }
        Command::Languages => {
            let switcher = LanguageSwitcher::new(&state, &config.supported_locales);
            let current = switcher.current();
            for option in switcher.options() {
                let marker = if option.locale == current { "*" } else { " " };
                println!("{marker} {}\t{}", option.locale, option.name);
            }
        }
        Command::Check => {
            let report = state.consistency_report(&config.default_locale);
            for (locale, keys) in &report.missing {
                for key in keys {
                    println!("{locale}\t-{key}");
                }
            }
            for (locale, keys) in &report.extra {
                for key in keys {
                    println!("{locale}\t+{key}");
                }
            }
            if !report.is_consistent() {
                anyhow::bail!(
                    "{} key(s) missing and {} extra relative to `{}`",
                    report.missing_count(),
                    report.extra_count(),
                    report.reference
                );
            }
            println!(
                "all {} locale(s) match `{}`",
                state.loaded_locales().len(),
                report.reference
            );
        }
    }

    Ok(())
}
