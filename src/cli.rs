//! CLI command definitions and handlers

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{style, Emoji};
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use vocab_deck::app::SEARCH_LIMIT;
use vocab_deck::capabilities::CommandPronouncer;
use vocab_deck::catalog::StudyCategory;
use vocab_deck::models::parse_synonyms;
use vocab_deck::quiz::QuizStats;
use vocab_deck::settings::Theme;
use vocab_deck::{
    wotd, Capabilities, Config, HttpRemote, NoticeLevel, Notifier, SyncStatus, VocabApp, WordEntry,
    WordFilter, WriteOutcome,
};

static CHECK: Emoji = Emoji("✓ ", "* ");
static CROSS: Emoji = Emoji("✗ ", "x ");
static ARROW: Emoji = Emoji("→ ", "-> ");
static INFO: Emoji = Emoji("ℹ ", "i ");
static WARN: Emoji = Emoji("⚠ ", "! ");
static STAR: Emoji = Emoji("⭐ ", "* ");
static CLOCK: Emoji = Emoji("⏳ ", "~ ");

pub type App = VocabApp<HttpRemote>;

#[derive(Parser)]
#[command(name = "vocab")]
#[command(author, version, about = "Offline-first vocabulary flashcards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ~/.config/vocab-deck/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Never contact the endpoint; writes go straight to the queue
    #[arg(long, global = true)]
    pub offline: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List words
    List {
        /// all, recent, or a part of speech (noun, verb, ...)
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Search words, meanings and synonyms
    Search {
        query: String,
    },

    /// Show one word in full
    Show {
        word: String,
    },

    /// Add a word (requires admin mode)
    Add {
        /// Word to add (prompted when omitted)
        word: Option<String>,

        #[command(flatten)]
        fields: WordFields,
    },

    /// Edit a word (requires admin mode)
    Edit {
        /// Word to edit
        old_word: String,

        /// Rename the word
        #[arg(long = "word")]
        new_word: Option<String>,

        #[command(flatten)]
        fields: WordFields,
    },

    /// Delete a word (requires admin mode)
    Delete {
        word: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Fetch the sheet and merge it into the local cache
    Refresh,

    /// Replay pending changes
    Sync {
        /// Keep running and replay on every poll interval
        #[arg(short, long)]
        watch: bool,
    },

    /// Show sync status for a word, or overall
    Status {
        word: Option<String>,
    },

    /// Show pending changes
    Queue {
        /// Drop every pending change
        #[arg(long)]
        clear: bool,
    },

    /// Take a multiple-choice quiz
    Quiz {
        /// Number of questions
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Show quiz statistics
    Stats,

    /// Show the word of the day
    Wotd {
        /// Speak the word aloud
        #[arg(short, long)]
        listen: bool,

        /// Keep running and show a new word after midnight
        #[arg(short, long)]
        follow: bool,
    },

    /// Manage favorite words
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },

    /// Show or change settings
    Settings {
        /// Setting name (audioEnabled, darkMode, ...)
        key: Option<String>,

        /// on/off
        value: Option<String>,
    },

    /// Show, set or toggle the theme
    Theme {
        /// light or dark (omit to toggle)
        theme: Option<Theme>,

        /// Only print the current theme
        #[arg(long)]
        show: bool,
    },

    /// Admin mode controls word editing
    Admin {
        #[arg(value_enum, default_value = "status")]
        action: AdminAction,
    },

    /// Browse study materials
    Materials {
        /// math, gk, english, reasoning or vocabulary
        category: Option<String>,

        /// Open material N of the category
        #[arg(short, long)]
        open: Option<usize>,

        /// Directory holding downloaded PDFs
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Manage configuration
    Config {
        /// Configuration key
        key: Option<String>,

        /// Configuration value (omit to show current)
        value: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum FavAction {
    /// Add a word to favorites
    Add { word: String },
    /// Remove a word from favorites
    Remove { word: String },
    /// List favorites
    List,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AdminAction {
    On,
    Off,
    Status,
}

/// Optional word fields shared by `add` and `edit`
#[derive(Args, Debug, Default)]
pub struct WordFields {
    /// English meaning
    #[arg(short, long)]
    pub meaning: Option<String>,

    /// Hindi meaning
    #[arg(long)]
    pub hindi: Option<String>,

    #[arg(short, long)]
    pub pronunciation: Option<String>,

    /// Example sentence
    #[arg(short, long)]
    pub example: Option<String>,

    #[arg(long)]
    pub mnemonic: Option<String>,

    /// Part of speech
    #[arg(long)]
    pub pos: Option<String>,

    /// Comma separated synonyms
    #[arg(short, long)]
    pub synonyms: Option<String>,

    #[arg(long)]
    pub one_liner: Option<String>,

    #[arg(long)]
    pub uses: Option<String>,
}

impl WordFields {
    /// Overwrite the fields that were given
    pub fn apply(self, mut entry: WordEntry) -> WordEntry {
        let set = |slot: &mut String, value: Option<String>| {
            if let Some(value) = value {
                *slot = value.trim().to_string();
            }
        };
        set(&mut entry.meaning, self.meaning);
        set(&mut entry.hindi_meaning, self.hindi);
        set(&mut entry.pronunciation, self.pronunciation);
        set(&mut entry.example, self.example);
        set(&mut entry.mnemonic, self.mnemonic);
        set(&mut entry.pos, self.pos);
        set(&mut entry.one_liner, self.one_liner);
        set(&mut entry.uses, self.uses);
        if let Some(synonyms) = self.synonyms {
            entry.synonyms = parse_synonyms(&synonyms);
        }
        entry
    }
}

/// Notices printed to stderr
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => eprintln!("{}{}", INFO, message),
            NoticeLevel::Success => eprintln!("{}{}", CHECK, style(message).green()),
            NoticeLevel::Warning => eprintln!("{}{}", WARN, style(message).yellow()),
            NoticeLevel::Error => eprintln!("{}{}", CROSS, style(message).red()),
        }
    }
}

/// Load config and open the application state
pub fn open_app(config_path: Option<&Path>, offline: bool) -> Result<App> {
    let config = Config::load(config_path).context("Failed to load configuration")?;

    let remote = if offline {
        None
    } else {
        match HttpRemote::new(&config.remote) {
            Ok(remote) => Some(remote),
            Err(e) => {
                debug!("running offline: {}", e);
                None
            }
        }
    };

    let mut caps = Capabilities::default().with_notifier(ConsoleNotifier);
    if let Some(pronouncer) = CommandPronouncer::detect() {
        caps = caps.with_pronouncer(pronouncer);
    }

    VocabApp::open(config, remote, caps).context("Failed to open local store")
}

/// Sync with the sheet after a command has printed from the cache
pub async fn catch_up(app: &App) {
    if !app.is_online() {
        return;
    }
    if let Some(outcome) = app.catch_up().await {
        if outcome.changed() {
            println!(
                "{}{} words after refresh (+{} -{})",
                ARROW, outcome.total, outcome.added, outcome.removed
            );
        }
    }
}

fn status_marker(status: SyncStatus) -> String {
    match status {
        SyncStatus::Pending => style(format!("{}pending", CLOCK)).yellow().to_string(),
        SyncStatus::Synced => String::new(),
    }
}

fn print_summary(app: &App, entry: &WordEntry) {
    let pos = if entry.pos.is_empty() {
        String::new()
    } else {
        format!(" ({})", entry.pos)
    };
    println!(
        "  {}{} {} {} {}",
        style(&entry.word).cyan().bold(),
        style(pos).dim(),
        style("-").dim(),
        entry.answer_text(),
        status_marker(app.sync_status(&entry.word))
    );
}

fn print_card(app: &App, entry: &WordEntry) {
    let star = if app.favorites().is_favorited(&entry.word) {
        format!(" {}", STAR)
    } else {
        String::new()
    };
    println!("{}{}", style(&entry.word).cyan().bold(), star);
    if !entry.pronunciation.is_empty() {
        println!("  {}", style(&entry.pronunciation).dim());
    }
    let rows = [
        ("Part of speech", entry.pos.as_str()),
        ("Meaning", entry.meaning.as_str()),
        ("Hindi", entry.hindi_meaning.as_str()),
        ("Example", entry.example.as_str()),
        ("Mnemonic", entry.mnemonic.as_str()),
        ("In short", entry.one_liner.as_str()),
        ("Uses", entry.uses.as_str()),
    ];
    for (label, value) in rows {
        if !value.is_empty() {
            println!("  {}: {}", style(label).bold(), value);
        }
    }
    if !entry.synonyms.is_empty() {
        println!("  {}: {}", style("Synonyms").bold(), entry.synonyms.join(", "));
    }
    let status = app.sync_status(&entry.word);
    if status == SyncStatus::Pending {
        println!("  {}", status_marker(status));
    }
}

/// List words
pub async fn list_words(app: &App, filter: &str) -> Result<()> {
    let filter: WordFilter = filter.parse()?;
    let words = app.vocabulary(&filter);
    let counts = app.counts();

    println!(
        "{} {}",
        style(format!("Vocabulary ({})", filter)).bold(),
        style(format!(
            "{} words, {} from sheet, {} local",
            counts.total, counts.from_sheet, counts.local
        ))
        .dim()
    );
    println!();

    if words.is_empty() {
        println!("  {} No words found", INFO);
        return Ok(());
    }
    for entry in &words {
        print_summary(app, entry);
    }
    Ok(())
}

pub async fn search_words(app: &App, query: &str) -> Result<()> {
    let results = app.search(query);
    if results.is_empty() {
        println!("{} No words match {}", INFO, style(query).cyan());
        return Ok(());
    }

    println!("{}", style(format!("{} matches", results.len())).bold());
    for entry in results.iter().take(SEARCH_LIMIT) {
        print_summary(app, entry);
    }
    if results.len() > SEARCH_LIMIT {
        println!("  {}", style(format!("... {} more", results.len() - SEARCH_LIMIT)).dim());
    }
    Ok(())
}

pub async fn show_word(app: &App, word: &str) -> Result<()> {
    match app.find(word) {
        Some(entry) => print_card(app, &entry),
        None => bail!("Word not found: {}", word),
    }
    Ok(())
}

fn report_write(outcome: WriteOutcome, word: &str, verb: &str) {
    match outcome {
        WriteOutcome::Synced => println!("{}{} {}", CHECK, verb, style(word).green()),
        WriteOutcome::Queued => println!("{}{} {} {}", ARROW, verb, style(word).yellow(), status_marker(SyncStatus::Pending)),
    }
}

pub async fn add_word(app: &App, word: Option<String>, fields: WordFields) -> Result<()> {
    let interactive = word.is_none();
    let word = match word {
        Some(word) => word,
        None => Input::<String>::new().with_prompt("Word").interact_text()?,
    };

    let mut fields = fields;
    if interactive && fields.meaning.is_none() {
        let meaning: String = Input::new()
            .with_prompt("Meaning")
            .allow_empty(true)
            .interact_text()?;
        fields.meaning = Some(meaning);
    }

    let entry = fields.apply(WordEntry::new(word));
    let name = entry.word.trim().to_string();
    let outcome = app.add_word(entry).await?;
    report_write(outcome, &name, "Added");
    Ok(())
}

pub async fn edit_word(app: &App, old_word: &str, new_word: Option<String>, fields: WordFields) -> Result<()> {
    let Some(mut entry) = app.find(old_word) else {
        bail!("Word not found: {}", old_word);
    };
    let previous = entry.word.clone();
    if let Some(new_word) = new_word {
        entry.word = new_word;
    }
    let entry = fields.apply(entry);
    let name = entry.word.trim().to_string();

    let outcome = app.update_word(&previous, entry).await?;
    report_write(outcome, &name, "Updated");
    Ok(())
}

pub async fn delete_word(app: &App, word: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", word))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{} Cancelled", INFO);
            return Ok(());
        }
    }

    let outcome = app.delete_word(word).await?;
    report_write(outcome, word, "Deleted");
    Ok(())
}

pub async fn refresh(app: &App) -> Result<()> {
    let outcome = app.refresh().await?;
    println!(
        "{}{} words ({} from sheet, {} new, {} gone)",
        CHECK, outcome.total, outcome.remote_count, outcome.added, outcome.removed
    );
    Ok(())
}

async fn sync_once(app: &App) -> Result<()> {
    let report = app.flush_queue().await?;
    if report.attempted == 0 && report.remaining == 0 {
        println!("{} Nothing to sync", INFO);
    } else if !app.is_online() {
        println!("{} Offline: {} changes pending", WARN, report.remaining);
    } else {
        println!(
            "{}{} synced, {} remaining",
            if report.is_clean() { &CHECK } else { &WARN },
            report.synced,
            report.remaining
        );
    }
    Ok(())
}

pub async fn sync(app: &App, watch: bool) -> Result<()> {
    sync_once(app).await?;
    if !watch {
        return Ok(());
    }

    let interval = Duration::from_secs(app.config().sync.poll_interval_secs.max(1));
    println!(
        "{} Watching every {}s, press Ctrl-C to stop",
        INFO,
        interval.as_secs()
    );
    app.refresh_after_idle().await;

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if !app.queue().is_empty() {
                    sync_once(app).await?;
                }
                if let Some(outcome) = app.background_refresh().await {
                    if outcome.changed() {
                        println!("{}{} words (+{} -{})", ARROW, outcome.total, outcome.added, outcome.removed);
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("{} Stopped", INFO);
                break;
            }
        }
    }
    Ok(())
}

pub async fn show_status(app: &App, word: Option<&str>) -> Result<()> {
    match word {
        Some(word) => {
            let status = app.sync_status(word);
            let styled = match status {
                SyncStatus::Pending => style(status.to_string()).yellow(),
                SyncStatus::Synced => style(status.to_string()).green(),
            };
            println!("{}: {}", style(word).cyan(), styled);
        }
        None => {
            let counts = app.counts();
            let mode = if app.is_online() { style("online").green() } else { style("offline").yellow() };
            println!("{}", style("Status:").bold());
            println!("  mode: {}", mode);
            println!("  words: {}", style(counts.total).cyan());
            println!("  pending changes: {}", style(app.queue().len()).cyan());
            println!("  admin mode: {}", style(app.preferences().is_admin()).cyan());
        }
    }
    Ok(())
}

pub async fn show_queue(app: &App, clear: bool) -> Result<()> {
    let unreadable = app.store().unreadable_queue_entries();
    if clear {
        let count = app.queue().len() + unreadable;
        app.queue().clear()?;
        println!("{}Dropped {} pending changes", CHECK, count);
        return Ok(());
    }

    if unreadable > 0 {
        println!(
            "{}{} queued entries could not be read; they are kept until `vocab queue --clear`",
            WARN, unreadable
        );
    }
    let pending = app.queue().pending();
    if pending.is_empty() {
        println!("{} No pending changes", INFO);
        return Ok(());
    }
    println!("{}", style(format!("{} pending changes:", pending.len())).bold());
    for (i, op) in pending.iter().enumerate() {
        println!("  {}. {} {}", i + 1, style(op.action()).yellow(), style(op.word()).cyan());
    }
    Ok(())
}

pub async fn run_quiz(app: &App, count: Option<usize>) -> Result<()> {
    let mut session = app.start_quiz(count, &mut rand::thread_rng())?;
    let total = session.total();

    while let Some(question) = session.current().cloned() {
        println!();
        println!(
            "{} {}",
            style(format!("Question {}/{}", session.position() + 1, total)).dim(),
            style(format!("Score {}", session.score())).dim()
        );
        println!("{}", question.prompt);
        println!("  {}", style(&question.word).cyan().bold());

        let Some(choice) = Select::new()
            .items(&question.options)
            .default(0)
            .interact_opt()?
        else {
            println!("{} Quiz abandoned", INFO);
            return Ok(());
        };

        let record = session.answer(choice)?;
        if record.is_correct {
            app.notify(NoticeLevel::Success, "Correct! 🎉");
        } else {
            app.notify(NoticeLevel::Error, "Wrong answer 😔");
            println!("  {} {}", ARROW, style(&record.correct_answer).green());
        }
    }

    let result = app.finish_quiz(&session, Local::now().date_naive())?;
    println!();
    println!("{} {}", result.grade.icon(), style(result.grade.title()).bold());
    println!(
        "  {}/{} correct ({}%)",
        style(result.correct).green(),
        result.total,
        style(result.percentage).cyan()
    );
    Ok(())
}

fn print_stats(stats: &QuizStats) {
    println!("{}", style("Quiz statistics:").bold());
    println!("  quizzes taken: {}", style(stats.total_quizzes).cyan());
    println!("  best score: {}%", style(stats.best_score).cyan());
    println!("  average score: {}%", style(stats.average_score).cyan());
    println!(
        "  answers: {}/{}",
        style(stats.total_correct).cyan(),
        stats.total_questions
    );
    println!("  streak: {} days", style(stats.streak).cyan());
    if let Some(last) = stats.last_quiz_date {
        println!("  last quiz: {}", style(last).dim());
    }
}

pub async fn show_stats(app: &App) -> Result<()> {
    print_stats(&app.quiz_stats());
    Ok(())
}

fn print_wotd(app: &App, listen: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let entry = app.word_of_the_day(today, &mut rand::thread_rng())?;
    println!("{} {}", style("Word of the day").bold(), style(today).dim());
    println!();
    print_card(app, &entry);
    if listen {
        app.pronounce(&entry.word);
    }
    Ok(())
}

pub async fn word_of_the_day(app: &App, listen: bool, follow: bool) -> Result<()> {
    print_wotd(app, listen)?;
    if !follow {
        return Ok(());
    }

    loop {
        let wait = wotd::duration_until_next_midnight(Local::now());
        debug!("next word of the day in {:?}", wait);
        tokio::select! {
            _ = tokio::time::sleep(wait) => {
                wotd::reset(app.store())?;
                app.background_refresh().await;
                println!();
                print_wotd(app, listen)?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }
    Ok(())
}

pub async fn favorites(app: &App, action: FavAction) -> Result<()> {
    match action {
        FavAction::Add { word } => {
            if !app.add_favorite(&word)? {
                println!("{} {} is already a favorite", INFO, style(&word).cyan());
            }
        }
        FavAction::Remove { word } => {
            if !app.remove_favorite(&word)? {
                println!("{} {} is not a favorite", INFO, style(&word).cyan());
            }
        }
        FavAction::List => {
            let favorites = app.favorites().list();
            if favorites.is_empty() {
                println!("{} No favorites yet", INFO);
            }
            for entry in &favorites {
                print_summary(app, entry);
            }
        }
    }
    Ok(())
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => bail!("Expected on/off, got '{}'", other),
    }
}

pub async fn manage_settings(app: &App, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            println!("{}", style("Settings:").bold());
            println!();
            for (key, value) in app.settings().entries() {
                println!("  {}: {}", key, style(if value { "on" } else { "off" }).cyan());
            }
        }
        (Some(key), None) => {
            let value = app.preferences().value(&key)?;
            println!("{}: {}", key, style(if value { "on" } else { "off" }).cyan());
        }
        (Some(key), Some(value)) => {
            let value = parse_switch(&value)?;
            app.update_setting(&key, value)?;
        }
    }
    Ok(())
}

pub async fn manage_theme(app: &App, theme: Option<Theme>, show: bool) -> Result<()> {
    let current = app.preferences().theme();
    if show {
        println!("{}", style(current).cyan());
        return Ok(());
    }
    let next = theme.unwrap_or_else(|| current.toggled());
    app.set_theme(next)?;
    println!("{}Theme: {}", CHECK, style(next).cyan());
    Ok(())
}

pub async fn manage_admin(app: &App, action: AdminAction) -> Result<()> {
    match action {
        AdminAction::On => app.set_admin(true)?,
        AdminAction::Off => app.set_admin(false)?,
        AdminAction::Status => {
            let state = if app.preferences().is_admin() {
                style("on").green()
            } else {
                style("off").dim()
            };
            println!("admin mode: {}", state);
        }
    }
    Ok(())
}

pub async fn materials(category: Option<String>, open: Option<usize>, dir: &Path) -> Result<()> {
    let Some(category) = category else {
        if open.is_some() {
            bail!("--open needs a category");
        }
        println!("{}", style("Study materials:").bold());
        println!();
        for category in StudyCategory::ALL {
            println!(
                "  {} {}",
                style(category.as_str()).cyan(),
                style(format!("{} ({} PDFs)", category.title(), category.materials().len())).dim()
            );
        }
        return Ok(());
    };

    let category: StudyCategory = category.parse().map_err(anyhow::Error::msg)?;
    let items = category.materials();

    if let Some(n) = open {
        let Some(material) = n.checked_sub(1).and_then(|i| items.get(i)) else {
            bail!("No material {} in {} (1-{})", n, category, items.len());
        };
        match material.open(dir) {
            Ok(location) => println!("{}Opening {} {}", CHECK, material.name, style(location).dim()),
            Err(e) => bail!("PDF file not available: {} ({})", material.name, e),
        }
        return Ok(());
    }

    println!("{}", style(format!("{} PDFs", category.title())).bold());
    println!();
    for (i, material) in items.iter().enumerate() {
        println!(
            "  {:>2}. {}{} {}",
            i + 1,
            material.icon,
            style(material.name).cyan(),
            style(material.size).dim()
        );
    }
    Ok(())
}

pub async fn manage_config(path: Option<&Path>, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = Config::load(path)?;

    match (key, value) {
        (None, _) => {
            println!("{}", style("Configuration:").bold());
            println!();
            for key in Config::keys() {
                println!("  {}: {}", key, style(config.get(key)?).cyan());
            }
        }
        (Some(key), None) => {
            let value = config.get(&key)?;
            println!("{}: {}", key, style(value).cyan());
        }
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(path)?;
            println!("{}Set {} = {}", CHECK, key, style(value).green());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_fields_apply_only_given() {
        let base = WordEntry::new("Brisk").with_meaning("quick");
        let fields = WordFields {
            synonyms: Some("fast, lively ,".into()),
            pos: Some(" Adjective ".into()),
            ..Default::default()
        };
        let entry = fields.apply(base);
        assert_eq!(entry.meaning, "quick");
        assert_eq!(entry.pos, "Adjective");
        assert_eq!(entry.synonyms, vec!["fast", "lively"]);
    }

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("ON").unwrap());
        assert!(!parse_switch("false").unwrap());
        assert!(parse_switch("maybe").is_err());
    }

    #[test]
    fn test_cli_parses_global_flags() {
        let cli = Cli::try_parse_from(["vocab", "--offline", "quiz", "-n", "5"]).unwrap();
        assert!(cli.offline);
        assert!(matches!(cli.command, Commands::Quiz { count: Some(5) }));
    }
}
