//! Top-level CLI definition and dispatch.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell as CompletionShell, generate};
use colored::{Colorize, control};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use account_listing_helper::assemble::{self, FsFileSource};
use account_listing_helper::core::config::Config;
use account_listing_helper::core::errors::AlhError;
use account_listing_helper::core::paths::resolve_absolute_path;
use account_listing_helper::extract::AccountRecord;
use account_listing_helper::listing::{AutofillOptions, autofill_listing};
use account_listing_helper::logger::{ActivityLog, EventType, LogEntry, Severity};
use account_listing_helper::registry::{
    AccountRegistry, AccountStatus, FsDirectorySource, PathMemory,
};
use account_listing_helper::usage::{JsonFileStore, UsageTracker};

/// Account Listing Helper — turns raw account dump folders into listings.
#[derive(Debug, Parser)]
#[command(
    name = "alh",
    author,
    version,
    about = "Account Listing Helper - dump folders in, marketplace listings out",
    long_about = None,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Override config file path.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Force JSON output mode.
    #[arg(long, global = true)]
    json: bool,
    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
    /// Increase verbosity.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Quiet mode (errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List the account subfolders of a base folder.
    Scan(ScanArgs),
    /// Parse one account folder and print the extracted record.
    Parse(ParseArgs),
    /// Generate the listing title and description for one account.
    Autofill(AutofillArgs),
    /// Autofill every account under a base folder.
    Batch(BatchArgs),
    /// Show or reset the champion usage counters.
    Stats(StatsArgs),
    /// View effective configuration.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Debug, Clone, Args, Default)]
struct ScanArgs {
    /// Base folder with one subfolder per account (falls back to the remembered folder).
    #[arg(value_name = "FOLDER")]
    folder: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct ParseArgs {
    /// Account folder holding the `.txt` dumps.
    #[arg(value_name = "ACCOUNT_DIR")]
    account_dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct AutofillArgs {
    /// Account folder holding the `.txt` dumps.
    #[arg(value_name = "ACCOUNT_DIR")]
    account_dir: PathBuf,
    /// Keep extraction order instead of scarcest-first title candidates.
    #[arg(long)]
    no_ranking: bool,
    /// Bump usage counters for the champions the title features.
    #[arg(long)]
    record: bool,
}

#[derive(Debug, Clone, Args, Default)]
struct BatchArgs {
    /// Base folder with one subfolder per account (falls back to the remembered folder).
    #[arg(value_name = "FOLDER")]
    folder: Option<PathBuf>,
    /// Keep extraction order instead of scarcest-first title candidates.
    #[arg(long)]
    no_ranking: bool,
    /// Bump usage counters for the champions each title features.
    #[arg(long)]
    record: bool,
}

#[derive(Debug, Clone, Args, Default)]
struct StatsArgs {
    /// Clear all usage counters.
    #[arg(long)]
    reset: bool,
}

#[derive(Debug, Clone, Args, Default)]
struct ConfigArgs {
    /// Print the config file location instead of its contents.
    #[arg(long)]
    path: bool,
}

#[derive(Debug, Clone, Args)]
struct CompletionsArgs {
    /// Shell to generate completion script for.
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

/// CLI error type with explicit exit-code mapping.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input at runtime.
    #[error("{0}")]
    User(String),
    /// Environment/runtime failure.
    #[error("{0}")]
    Runtime(String),
    /// Operation partially succeeded.
    #[error("{0}")]
    Partial(String),
    /// JSON serialization failed.
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// Output write failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code contract for the CLI.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::User(_) => 1,
            Self::Runtime(_) | Self::Io(_) => 2,
            Self::Json(_) => 3,
            Self::Partial(_) => 4,
        }
    }
}

/// Dispatch CLI commands.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.no_color {
        control::set_override(false);
    }
    init_tracing(cli);

    match &cli.command {
        Command::Scan(args) => run_scan(cli, args),
        Command::Parse(args) => run_parse(cli, args),
        Command::Autofill(args) => run_autofill(cli, args),
        Command::Batch(args) => run_batch(cli, args),
        Command::Stats(args) => run_stats(cli, args),
        Command::Config(args) => run_config(cli, args),
        Command::Completions(args) => {
            let mut command = Cli::command();
            let binary_name = command.get_name().to_string();
            generate(args.shell, &mut command, binary_name, &mut io::stdout());
            Ok(())
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_directive = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal() && !cli.no_color)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<Config, CliError> {
    Config::load(cli.config.as_deref()).map_err(|e| CliError::Runtime(e.to_string()))
}

fn run_scan(cli: &Cli, args: &ScanArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let memory = PathMemory::new(config.paths.last_folder_file.clone());
    let base = resolve_base_folder(args.folder.clone(), &memory)?;

    let mut registry = AccountRegistry::new();
    registry
        .load_from(&FsDirectorySource, &base)
        .map_err(|e| CliError::Runtime(e.to_string()))?;
    remember_base(&memory, &base);

    match output_mode(cli) {
        OutputMode::Human => {
            println!(
                "{} ({})",
                registry.base_folder_name().bold(),
                base.display()
            );
            for account in registry.accounts() {
                println!(
                    "  {:>3}  {:<10}  {}",
                    account.id, account.status, account.name
                );
            }
            println!("{} account folders.", registry.count());
        }
        OutputMode::Json => {
            let payload = json!({
                "command": "scan",
                "base": base.to_string_lossy(),
                "base_name": registry.base_folder_name(),
                "count": registry.count(),
                "accounts": serde_json::to_value(registry.accounts())?,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_parse(cli: &Cli, args: &ParseArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let mut log = ActivityLog::from_config(&config);
    let label = account_label(&args.account_dir);

    let record = match assemble::parse_account_dir(&FsFileSource, &args.account_dir) {
        Ok(record) => record,
        Err(error) => {
            record_error_event(&mut log, Some(&label), &error);
            return Err(CliError::Runtime(error.to_string()));
        }
    };

    let mut entry = LogEntry::new(EventType::AccountParsed, Severity::Info);
    entry.account = Some(label.clone());
    entry.server = Some(record.server.clone());
    log.record(&entry);

    match output_mode(cli) {
        OutputMode::Human => print_record(&label, &record),
        OutputMode::Json => {
            let payload = json!({
                "command": "parse",
                "account": label,
                "record": serde_json::to_value(&record)?,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_autofill(cli: &Cli, args: &AutofillArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let mut log = ActivityLog::from_config(&config);
    let label = account_label(&args.account_dir);

    let store = JsonFileStore::new(config.paths.usage_stats_file.clone());
    let mut tracker = UsageTracker::load(store);
    let options = AutofillOptions {
        rank_by_scarcity: config.listing.rank_by_scarcity && !args.no_ranking,
        record_usage: args.record,
    };

    let outcome = match autofill_listing(&FsFileSource, &args.account_dir, &mut tracker, options) {
        Ok(outcome) => outcome,
        Err(error) => {
            record_error_event(&mut log, Some(&label), &error);
            return Err(CliError::Runtime(error.to_string()));
        }
    };
    let title_chars = outcome.form.title.chars().count();

    let mut entry = LogEntry::new(EventType::ListingGenerated, Severity::Info);
    entry.account = Some(label.clone());
    entry.title_chars = Some(title_chars);
    entry.champions_featured = Some(outcome.champions_featured.len());
    log.record(&entry);

    if args.record && !outcome.champions_featured.is_empty() {
        let mut entry = LogEntry::new(EventType::UsageRecorded, Severity::Info);
        entry.account = Some(label.clone());
        entry.names_recorded = Some(outcome.champions_featured.len());
        log.record(&entry);
    }

    match output_mode(cli) {
        OutputMode::Human => {
            println!("{}", outcome.form.title);
            println!();
            println!("{}", outcome.form.description);
        }
        OutputMode::Json => {
            let payload = json!({
                "command": "autofill",
                "account": label,
                "title": outcome.form.title,
                "title_chars": title_chars,
                "description": outcome.form.description,
                "skins_featured": outcome.skins_featured,
                "champions_featured": outcome.champions_featured,
                "usage_recorded": args.record,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct BatchItem {
    account: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<String>,
}

fn run_batch(cli: &Cli, args: &BatchArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let mut log = ActivityLog::from_config(&config);
    let memory = PathMemory::new(config.paths.last_folder_file.clone());
    let base = resolve_base_folder(args.folder.clone(), &memory)?;

    let mut registry = AccountRegistry::new();
    registry
        .load_from(&FsDirectorySource, &base)
        .map_err(|e| CliError::Runtime(e.to_string()))?;
    remember_base(&memory, &base);

    let store = JsonFileStore::new(config.paths.usage_stats_file.clone());
    let mut tracker = UsageTracker::load(store);
    let options = AutofillOptions {
        rank_by_scarcity: config.listing.rank_by_scarcity && !args.no_ranking,
        record_usage: args.record,
    };

    let pending: Vec<(u32, String, PathBuf)> = registry
        .accounts()
        .iter()
        .map(|account| (account.id, account.name.clone(), account.path.clone()))
        .collect();

    let mut items = Vec::with_capacity(pending.len());
    let mut failed = 0usize;
    for (id, name, path) in pending {
        registry.set_status(id, AccountStatus::Processing);
        match autofill_listing(&FsFileSource, &path, &mut tracker, options) {
            Ok(outcome) => {
                registry.set_status(id, AccountStatus::Listed);
                let title_chars = outcome.form.title.chars().count();

                let mut entry = LogEntry::new(EventType::ListingGenerated, Severity::Info);
                entry.account = Some(name.clone());
                entry.title_chars = Some(title_chars);
                entry.champions_featured = Some(outcome.champions_featured.len());
                log.record(&entry);

                items.push(BatchItem {
                    account: name,
                    ok: true,
                    title: Some(outcome.form.title),
                    title_chars: Some(title_chars),
                    description: Some(outcome.form.description),
                    error: None,
                    error_code: None,
                });
            }
            Err(error) => {
                failed += 1;
                registry.set_status(id, AccountStatus::Error);
                record_error_event(&mut log, Some(&name), &error);
                items.push(BatchItem {
                    account: name,
                    ok: false,
                    title: None,
                    title_chars: None,
                    description: None,
                    error: Some(error.to_string()),
                    error_code: Some(error.code().to_string()),
                });
            }
        }
    }

    let severity = if failed == 0 {
        Severity::Info
    } else {
        Severity::Warning
    };
    let mut entry = LogEntry::new(EventType::BatchCompleted, severity);
    entry.accounts_processed = Some(items.len());
    entry.accounts_failed = Some(failed);
    log.record(&entry);

    match output_mode(cli) {
        OutputMode::Human => {
            println!(
                "{} ({})",
                registry.base_folder_name().bold(),
                base.display()
            );
            for item in &items {
                if item.ok {
                    println!(
                        "  {}  {}  {} chars",
                        item.account,
                        "OK".green(),
                        item.title_chars.unwrap_or(0)
                    );
                } else {
                    println!(
                        "  {}  {}  {}",
                        item.account,
                        "FAILED".red(),
                        item.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
            println!("Processed {} accounts, {failed} failed.", items.len());
        }
        OutputMode::Json => {
            let payload = json!({
                "command": "batch",
                "base": base.to_string_lossy(),
                "processed": items.len(),
                "failed": failed,
                "accounts": serde_json::to_value(&items)?,
            });
            write_json_line(&payload)?;
        }
    }

    let total = items.len();
    if failed == 0 {
        Ok(())
    } else if failed == total {
        Err(CliError::Runtime(format!("all {total} accounts failed")))
    } else {
        Err(CliError::Partial(format!(
            "{failed} of {total} accounts failed"
        )))
    }
}

fn run_stats(cli: &Cli, args: &StatsArgs) -> Result<(), CliError> {
    let config = load_config(cli)?;
    let store = JsonFileStore::new(config.paths.usage_stats_file.clone());
    let mut tracker = UsageTracker::load(store);

    if args.reset {
        tracker
            .reset()
            .map_err(|e| CliError::Runtime(e.to_string()))?;
        let mut log = ActivityLog::from_config(&config);
        log.record(&LogEntry::new(EventType::UsageReset, Severity::Info));

        match output_mode(cli) {
            OutputMode::Human => println!("Usage counters cleared."),
            OutputMode::Json => {
                write_json_line(&json!({"command": "stats reset", "cleared": true}))?;
            }
        }
        return Ok(());
    }

    let mut rows: Vec<(&String, &u64)> = tracker.counters().iter().collect();
    rows.sort_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)));

    match output_mode(cli) {
        OutputMode::Human => {
            if rows.is_empty() {
                println!("No usage recorded yet.");
            } else {
                println!("{}", "Usage counters (scarcest first):".bold());
                for (name, count) in &rows {
                    println!("  {count:>6}  {name}");
                }
                println!("{} names tracked.", rows.len());
            }
        }
        OutputMode::Json => {
            let counters: Vec<Value> = rows
                .iter()
                .map(|(name, count)| json!({"name": name, "times_used": count}))
                .collect();
            let payload = json!({
                "command": "stats",
                "names_tracked": counters.len(),
                "counters": counters,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn run_config(cli: &Cli, args: &ConfigArgs) -> Result<(), CliError> {
    if args.path {
        let path = cli.config.clone().unwrap_or_else(Config::default_path);
        let exists = path.exists();

        match output_mode(cli) {
            OutputMode::Human => {
                println!("{}", path.display());
                if !exists {
                    println!("  (file does not exist; defaults will be used)");
                }
            }
            OutputMode::Json => {
                let payload = json!({
                    "command": "config path",
                    "path": path.to_string_lossy(),
                    "exists": exists,
                });
                write_json_line(&payload)?;
            }
        }
        return Ok(());
    }

    let config = load_config(cli)?;
    match output_mode(cli) {
        OutputMode::Human => {
            let toml_str = toml::to_string_pretty(&config)
                .map_err(|e| CliError::Runtime(format!("serialize config: {e}")))?;
            println!("{toml_str}");
        }
        OutputMode::Json => {
            let value = serde_json::to_value(&config)?;
            let payload = json!({
                "command": "config show",
                "config": value,
            });
            write_json_line(&payload)?;
        }
    }
    Ok(())
}

fn resolve_base_folder(
    explicit: Option<PathBuf>,
    memory: &PathMemory,
) -> Result<PathBuf, CliError> {
    explicit
        .map(|path| resolve_absolute_path(&path))
        .or_else(|| memory.load())
        .ok_or_else(|| {
            CliError::User(
                "no base folder given and none remembered; pass a folder path".to_string(),
            )
        })
}

fn remember_base(memory: &PathMemory, base: &Path) {
    if let Err(error) = memory.save(base) {
        warn!(%error, "could not remember base folder");
    }
}

fn account_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn record_error_event(log: &mut ActivityLog, account: Option<&str>, error: &AlhError) {
    let mut entry = LogEntry::new(EventType::Error, Severity::Error);
    entry.account = account.map(str::to_string);
    entry.error_code = Some(error.code().to_string());
    entry.error_message = Some(error.to_string());
    log.record(&entry);
}

fn print_record(label: &str, record: &AccountRecord) {
    println!("{}", label.bold());
    println!("  Server          {}", record.server);
    println!("  Level           {}", record.level);
    println!("  Honor level     {}", record.honor_level);
    println!("  Champions       {}", record.champion_count);
    println!("  Skins           {}", record.skin_count);
    println!("  Riot Points     {}", record.riot_points);
    println!("  Blue Essence    {}", record.blue_essence);
    println!("  Orange Essence  {}", record.orange_essence);
    println!("  Last play       {}", record.last_play_date);
    if let Some(link) = &record.opgg_link {
        println!("  op.gg           {link}");
    }
    if !record.champion_list.is_empty() {
        println!("  Champion list   {}", record.champion_list.join(", "));
    }
    if !record.skin_list.is_empty() {
        println!("  Skin list       {}", record.skin_list.join(", "));
    }
}

fn write_json_line(payload: &Value) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, payload)?;
    writeln!(stdout)?;
    Ok(())
}

fn output_mode(cli: &Cli) -> OutputMode {
    let env_mode = std::env::var("ALH_OUTPUT_FORMAT").ok();
    resolve_output_mode(cli.json, env_mode.as_deref(), io::stdout().is_terminal())
}

fn resolve_output_mode(json_flag: bool, env_mode: Option<&str>, stdout_is_tty: bool) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }

    let fallback = if stdout_is_tty {
        OutputMode::Human
    } else {
        OutputMode::Json
    };

    match env_mode
        .map(str::trim)
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputMode::Json,
        Some("human") => OutputMode::Human,
        Some("auto") | None => fallback,
        Some(_) => fallback,
    }
}
