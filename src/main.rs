//! Binary entrypoint for the Expanded Task Text CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml`
//! - `augment [--output <dir>]` - run one augmentation pass and write every language
//! - `show <quest-id>` - print the augmented reference-language description for one quest
//!
//! See the library crate docs for module‑level details: `expanded_task_text::`.
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use expanded_task_text::augment::{
    description_key, load_catalog_from_json, on_load, DependencyIndex, DescriptionComposer,
    MongoId, Omission, OmissionSink,
};
use expanded_task_text::config::Config;
use expanded_task_text::host::{load_quest_database, open_locale_database, write_locale_tables};

#[derive(Parser)]
#[command(name = "ett")]
#[command(about = "Adds key, follow-up and Collector/Lightkeeper info to quest descriptions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Augment every locale table and write the results
    Augment {
        /// Output directory (overrides paths.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the augmented description of one quest in the reference language
    Show {
        /// Quest id (24 hex characters)
        quest_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Augment { output } => {
            let config = Config::load(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            info!("Starting ett v{}", env!("CARGO_PKG_VERSION"));

            let quests = load_quest_database(&config.paths.quests).await?;
            let mut locales =
                open_locale_database(&config.paths.locales_dir, &config.augment).await?;
            let report = on_load(&config.paths.catalog, &quests, &mut locales).await?;

            let tables = locales.into_realized()?;
            let output_dir = output.unwrap_or_else(|| config.paths.output_dir.clone());
            let written = write_locale_tables(&output_dir, &tables).await?;
            info!(
                "Wrote {} locale tables to {} ({} quests augmented, {} omissions)",
                written,
                output_dir.display(),
                report.quests_augmented,
                report.omissions.len()
            );
        }
        Commands::Show { quest_id } => {
            let config = Config::load(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);

            let id = MongoId::parse(&quest_id)?;
            let catalog = load_catalog_from_json(&config.paths.catalog).await?;
            let info = catalog
                .get(&id)
                .ok_or_else(|| anyhow!("Quest {} is not in the catalog", id))?;
            let quests = load_quest_database(&config.paths.quests).await?;
            let locales = open_locale_database(&config.paths.locales_dir, &config.augment).await?;

            let mut omissions: Vec<Omission> = Vec::new();
            let original = match locales.reference().get(&description_key(&id)) {
                Some(text) => text.clone(),
                None => {
                    omissions.omit(Omission::MissingQuestDescription { quest: id.clone() });
                    String::new()
                }
            };
            let index = DependencyIndex::build(&quests);
            let composer = DescriptionComposer::new(&index, locales.reference());
            println!(
                "{}",
                composer.compose_description(info, &original, &mut omissions)
            );
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .as_ref()
        .and_then(|cfg| cfg.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stdout);

        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());

            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }

            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
