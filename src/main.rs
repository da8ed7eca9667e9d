// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pepperscript::actuators::Actuator;
use pepperscript::actuators::mock::MockActuator;
use pepperscript::actuators::rosbridge::RosBridgeActuator;
use pepperscript::app_config::{Config, LogLevel};
use pepperscript::app_controller::Controller;
use pepperscript::manual_cursor::{ManualCursor, ManualFire};
use pepperscript::script::model::ScriptDocument;
use pepperscript::script::quick::{QUICK_SCRIPT_NAMES, quick_script};
use pepperscript::script::timeline::Timeline;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

fn level_filter(level: &LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::Error,
        LogLevel::Warn => LevelFilter::Warn,
        LogLevel::Info => LevelFilter::Info,
        LogLevel::Debug => LevelFilter::Debug,
        LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a script against the robot (or a mock for dry runs)
    Run(RunArgs),

    /// Parse a script and print its configuration and timeline
    Inspect {
        /// Script file (.txt DSL or .json structured)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },

    /// Print the animation catalog built from a flat listing file
    Catalog {
        /// Animation listing file (lines like `Gestures/Hey_1`)
        #[arg(value_name = "LISTING")]
        listing: PathBuf,
    },

    /// Convert a script to the structured JSON format
    Export {
        /// Script file (.txt DSL or .json structured)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output path for the structured JSON
        #[arg(short, long, default_value = "script.json")]
        output: PathBuf,
    },

    /// Generate shell completions for pepperscript
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Script file to play (.txt DSL or .json structured)
    #[arg(value_name = "SCRIPT", required_unless_present = "quick")]
    script: Option<PathBuf>,

    /// Play a built-in quick script instead of a file
    #[arg(short, long, value_name = "NAME")]
    quick: Option<String>,

    /// Animation listing file used to validate animation references
    #[arg(short = 'a', long)]
    catalog: Option<PathBuf>,

    /// Use the recording mock actuator instead of the robot
    #[arg(long)]
    dry_run: bool,

    /// Step through the script manually instead of automatic playback
    #[arg(long)]
    manual: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// pepperscript - Script Execution Engine for Pepper-class robots
///
/// Parses operator-authored scripts (text DSL or structured JSON) and plays
/// them against a robot through a rosbridge server.
#[derive(Parser, Debug)]
#[command(name = "pepperscript")]
#[command(version = "1.0.0")]
#[command(about = "Robot script authoring and playback tool")]
#[command(long_about = "pepperscript parses operator-authored robot scripts and replays them as
timed sequences of speech, gestures, pauses and tablet content.

EXAMPLES:
    pepperscript run show.txt                      # Play a DSL script
    pepperscript run show.json -a animations.txt   # Validate animations first
    pepperscript run --quick saludo --dry-run      # Built-in demo, mock robot
    pepperscript run show.txt --manual             # Step through by hand
    pepperscript inspect show.txt                  # Print parsed timeline
    pepperscript export show.txt -o show.json      # Convert to JSON format
    pepperscript completions bash                  # Shell completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file does
    not exist, a default one is created automatically. Timing constants and
    the rosbridge endpoint live there.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pepperscript", &mut std::io::stdout());
            Ok(())
        }
        Commands::Run(args) => run_script(args).await,
        Commands::Inspect { script } => inspect_script(&script),
        Commands::Catalog { listing } => print_catalog(&listing),
        Commands::Export { script, output } => export_script(&script, &output),
    }
}

/// Load the configuration file, creating a default one when missing
fn load_or_create_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config file: {}", config_path))?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config.save_to_file(config_path)?;
        config
    };

    if let Some(level) = log_level {
        config.log_level = level.into();
    }
    log::set_max_level(level_filter(&config.log_level));

    Ok(config)
}

/// Resolve the document for a run: a file, or a built-in quick script
fn resolve_document(controller: &Controller, args: &RunArgs) -> Result<ScriptDocument> {
    if let Some(name) = &args.quick {
        return quick_script(name).ok_or_else(|| {
            anyhow!(
                "Unknown quick script '{}'. Available: {}",
                name,
                QUICK_SCRIPT_NAMES.join(", ")
            )
        });
    }

    let script = args
        .script
        .as_ref()
        .ok_or_else(|| anyhow!("SCRIPT is required unless --quick is given"))?;
    controller.load_script(script)
}

async fn run_script(args: RunArgs) -> Result<()> {
    let config = load_or_create_config(&args.config_path, args.log_level.clone())?;
    let controller = Controller::with_config(config.clone())?;

    let document = resolve_document(&controller, &args)?;
    let catalog = match &args.catalog {
        Some(path) => Some(controller.load_catalog(path)?),
        None => None,
    };

    let actuator: Arc<dyn Actuator> = if args.dry_run {
        info!("Dry run: commands go to the mock actuator");
        Arc::new(MockActuator::working())
    } else {
        Arc::new(RosBridgeActuator::connect(&config.ros).await?)
    };

    if args.manual {
        return manual_session(&document, actuator.as_ref()).await;
    }

    let summary = controller
        .run_document(&document, actuator, catalog.as_ref())
        .await?;

    println!();
    for entry in &summary.log {
        match &entry.error {
            None => println!(
                "  [{}] {} {}",
                entry.index,
                entry.at.format("%H:%M:%S"),
                entry.summary
            ),
            Some(error) => println!(
                "  [{}] {} {} FAILED: {}",
                entry.index,
                entry.at.format("%H:%M:%S"),
                entry.summary,
                error
            ),
        }
    }
    info!(
        "Run {:?} ({} item(s) dispatched)",
        summary.outcome,
        summary.log.len()
    );
    Ok(())
}

/// Interactive manual stepping: one action at a time, operator-driven
async fn manual_session(document: &ScriptDocument, actuator: &dyn Actuator) -> Result<()> {
    let timeline = Timeline::assemble(document);
    if timeline.is_empty() {
        warn!("Script contains no actions");
        return Ok(());
    }

    let mut cursor = ManualCursor::new(&timeline);
    println!("Manual mode: n=next, p=previous, g <i>=jump, x=execute, l=list, q=quit");

    let stdin = std::io::stdin();
    loop {
        if let Some(entry) = timeline.get(cursor.selected()) {
            println!(
                "[{}/{}] {}",
                cursor.selected() + 1,
                timeline.len(),
                entry.item.summary()
            );
        }

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();

        match words.next() {
            Some("n") => {
                cursor.select_next();
            }
            Some("p") => {
                cursor.select_previous();
            }
            Some("g") => {
                let target: usize = words
                    .next()
                    .and_then(|w| w.parse().ok())
                    .ok_or_else(|| anyhow!("usage: g <index>"))?;
                if let Err(e) = cursor.jump_to(target) {
                    println!("{}", e);
                }
            }
            Some("x") => {
                match cursor
                    .execute_selected(&timeline, actuator, &document.config)
                    .await
                {
                    Ok(ManualFire::Fired) => println!("fired"),
                    Ok(ManualFire::EmptyTimeline) => println!("nothing to fire"),
                    Err(e) => println!("dispatch failed: {}", e),
                }
            }
            Some("l") => {
                for (i, entry) in timeline.iter().enumerate() {
                    let marker = if i == cursor.selected() { ">" } else { " " };
                    println!("{} [{}] {}", marker, i, entry.item.summary());
                }
            }
            Some("q") => break,
            _ => println!("unknown command"),
        }
    }

    Ok(())
}

fn inspect_script(path: &Path) -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let document = controller.load_script(path)?;
    let timeline = Timeline::assemble(&document);

    println!("language:  {}", document.config.language);
    println!("subtitles: {}", document.config.subtitles_enabled());
    println!("image:     {}", document.config.display_image_enabled());
    println!("timeline ({} item(s)):", timeline.len());
    for (i, entry) in timeline.iter().enumerate() {
        let id = entry.item.id.as_deref().unwrap_or("-");
        println!("  [{}] {:9} id={} {}", i, entry.track, id, entry.item.summary());
    }
    Ok(())
}

fn print_catalog(path: &Path) -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let catalog = controller.load_catalog(path)?;

    for category in catalog.categories() {
        println!("{}", category);
        if let Some(subcategories) = catalog.subcategories(category) {
            for subcategory in subcategories {
                if subcategory == pepperscript::animation_catalog::NO_SUBCATEGORY {
                    for name in catalog.animations(category, None).into_iter().flatten() {
                        println!("  {}", name);
                    }
                } else {
                    println!("  {}/", subcategory);
                    for name in catalog
                        .animations(category, Some(subcategory))
                        .into_iter()
                        .flatten()
                    {
                        println!("    {}", name);
                    }
                }
            }
        }
    }
    Ok(())
}

fn export_script(script: &Path, output: &Path) -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let document = controller.load_script(script)?;
    controller.export_document(&document, output)?;
    println!("Wrote {}", output.display());
    Ok(())
}
