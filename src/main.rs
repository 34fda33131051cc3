//! vocab - offline-first vocabulary flashcards in the terminal
//!
//! Word list, quiz, word of the day and study materials, backed by a
//! spreadsheet endpoint with a local cache and an offline write queue.

mod cli;

use anyhow::Result;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;
use vocab_deck::VocabError;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli).await {
        // Validation failures were already shown as a notice
        let shown = err
            .downcast_ref::<VocabError>()
            .is_some_and(VocabError::is_validation);
        if !shown {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    // Commands that never touch the word store
    match cli.command {
        Commands::Config { key, value } => return cli::manage_config(config_path, key, value).await,
        Commands::Materials { category, open, dir } => return cli::materials(category, open, &dir).await,
        _ => {}
    }

    let app = cli::open_app(config_path, cli.offline)?;

    match cli.command {
        Commands::List { filter } => {
            cli::list_words(&app, &filter).await?;
            cli::catch_up(&app).await;
        }
        Commands::Search { query } => {
            cli::search_words(&app, &query).await?;
            cli::catch_up(&app).await;
        }
        Commands::Show { word } => {
            cli::show_word(&app, &word).await?;
            cli::catch_up(&app).await;
        }
        Commands::Add { word, fields } => {
            cli::add_word(&app, word, fields).await?;
            cli::catch_up(&app).await;
        }
        Commands::Edit { old_word, new_word, fields } => {
            cli::edit_word(&app, &old_word, new_word, fields).await?;
            cli::catch_up(&app).await;
        }
        Commands::Delete { word, yes } => {
            cli::delete_word(&app, &word, yes).await?;
            cli::catch_up(&app).await;
        }
        Commands::Refresh => {
            cli::refresh(&app).await?;
        }
        Commands::Sync { watch } => {
            cli::sync(&app, watch).await?;
        }
        Commands::Status { word } => {
            cli::show_status(&app, word.as_deref()).await?;
        }
        Commands::Queue { clear } => {
            cli::show_queue(&app, clear).await?;
        }
        Commands::Quiz { count } => {
            cli::run_quiz(&app, count).await?;
            cli::catch_up(&app).await;
        }
        Commands::Stats => {
            cli::show_stats(&app).await?;
        }
        Commands::Wotd { listen, follow } => {
            cli::word_of_the_day(&app, listen, follow).await?;
            cli::catch_up(&app).await;
        }
        Commands::Fav { action } => {
            cli::favorites(&app, action).await?;
        }
        Commands::Settings { key, value } => {
            cli::manage_settings(&app, key, value).await?;
        }
        Commands::Theme { theme, show } => {
            cli::manage_theme(&app, theme, show).await?;
        }
        Commands::Admin { action } => {
            cli::manage_admin(&app, action).await?;
        }
        Commands::Config { .. } | Commands::Materials { .. } => {}
    }

    Ok(())
}
