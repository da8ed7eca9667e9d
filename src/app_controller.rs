use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::actuators::Actuator;
use crate::animation_catalog::AnimationCatalog;
use crate::app_config::Config;
use crate::errors::EngineError;
use crate::file_utils::{FileManager, ScriptFormat};
use crate::script::model::{ScriptConfig, ScriptDocument};
use crate::script::timeline::Timeline;
use crate::script::{dsl, structured};
use crate::sequencer::{RunSummary, Sequencer};

// @module: Application controller for script loading and playback

/// Main application controller wiring parsers, catalog and sequencer
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a controller with default configuration (tests)
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the animation catalog from its flat listing file
    pub fn load_catalog<P: AsRef<Path>>(&self, path: P) -> Result<AnimationCatalog> {
        let listing = FileManager::read_to_string(&path)?;
        let catalog = AnimationCatalog::from_listing(&listing);
        info!(
            "Loaded animation catalog: {} categories, {} animations",
            catalog.category_count(),
            catalog.animation_count()
        );
        Ok(catalog)
    }

    /// Load a script file, choosing the parser from the file extension.
    ///
    /// DSL parsing is tolerant and always yields a document; structured
    /// parsing rejects malformed documents, in which case the caller keeps
    /// whatever document it already had.
    pub fn load_script<P: AsRef<Path>>(&self, path: P) -> Result<ScriptDocument> {
        let content = FileManager::read_to_string(&path)?;

        let mut document = match FileManager::detect_script_format(&path) {
            ScriptFormat::Dsl => {
                let parsed = dsl::parse(&content);
                if !parsed.diagnostics.is_empty() {
                    warn!(
                        "Script {} parsed with {} skipped/degraded line(s)",
                        path.as_ref().display(),
                        parsed.diagnostics.len()
                    );
                }
                parsed.document
            }
            ScriptFormat::Structured => {
                let parsed = structured::parse(&content).with_context(|| {
                    format!("Failed to load script: {}", path.as_ref().display())
                })?;
                parsed.document
            }
        };

        if document.config.language.trim().is_empty() {
            document.config.language = self.config.default_language.clone();
        }

        info!(
            "Loaded script {} ({} action(s))",
            path.as_ref().display(),
            document.source.len()
        );
        Ok(document)
    }

    /// Check the timeline's animation references against a catalog.
    ///
    /// With `validate_animations` enabled, unresolved paths fail the run up
    /// front; otherwise they are only warned about and the run proceeds
    /// (the robot ignores unknown animation names).
    pub fn check_animations(
        &self,
        timeline: &Timeline,
        catalog: &AnimationCatalog,
    ) -> Result<(), EngineError> {
        let unknown: Vec<String> = timeline
            .animation_paths()
            .filter(|path| !catalog.is_valid_path(path))
            .map(String::from)
            .collect();

        if unknown.is_empty() {
            return Ok(());
        }

        if self.config.validate_animations {
            Err(EngineError::UnknownAnimations { paths: unknown })
        } else {
            for path in unknown {
                warn!("Animation '{}' not found in catalog", path);
            }
            Ok(())
        }
    }

    /// Run a document end to end with a progress bar.
    ///
    /// Assembles the timeline, optionally validates animation references,
    /// and plays it through a fresh sequencer. Ctrl-C aborts the run at the
    /// next suspension point via the cancellation handle.
    pub async fn run_document(
        &self,
        document: &ScriptDocument,
        actuator: Arc<dyn Actuator>,
        catalog: Option<&AnimationCatalog>,
    ) -> Result<RunSummary> {
        let timeline = Timeline::assemble(document);
        if timeline.is_empty() {
            return Err(anyhow!("Script contains no actions"));
        }

        if let Some(catalog) = catalog {
            self.check_animations(&timeline, catalog)?;
        }

        let sequencer = Sequencer::new(actuator, self.config.timing.clone());

        let cancel = sequencer.cancel_handle();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, aborting run");
                cancel.cancel();
            }
        });

        let summary = self
            .run_with_progress(&sequencer, &timeline, &document.config)
            .await;
        ctrl_c.abort();

        let summary = summary?;
        let failed = summary.log.iter().filter(|entry| !entry.is_ok()).count();
        if failed > 0 {
            warn!("{} of {} item(s) failed to dispatch", failed, timeline.len());
        }
        Ok(summary)
    }

    /// Drive a sequencer run while feeding its progress into a bar
    async fn run_with_progress(
        &self,
        sequencer: &Sequencer,
        timeline: &Timeline,
        script_config: &ScriptConfig,
    ) -> Result<RunSummary> {
        let progress_bar = ProgressBar::new(timeline.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let run = sequencer.run(timeline, script_config);
        tokio::pin!(run);
        let mut ticker = tokio::time::interval(Duration::from_millis(200));

        let summary = loop {
            tokio::select! {
                result = &mut run => break result?,
                _ = ticker.tick() => {
                    let progress = sequencer.progress();
                    progress_bar.set_position(progress.current_index as u64);
                    if let Some(entry) = timeline.get(progress.current_index) {
                        progress_bar.set_message(entry.item.summary());
                    }
                }
            }
        };

        progress_bar.finish_with_message(match summary.outcome {
            crate::sequencer::RunOutcome::Completed => "completed",
            crate::sequencer::RunOutcome::Aborted => "aborted",
        });
        Ok(summary)
    }

    /// Export a document to the structured JSON format
    pub fn export_document<P: AsRef<Path>>(
        &self,
        document: &ScriptDocument,
        output: P,
    ) -> Result<()> {
        let json = structured::to_json_pretty(document)
            .map_err(|e| anyhow!("Failed to serialize script: {}", e))?;
        FileManager::write_string(&output, &json)?;
        info!("Exported script to {}", output.as_ref().display());
        Ok(())
    }
}
