/*!
 * Application controller wiring the validation engine, the auto-fixer
 * and the translation collaborator to the filesystem.
 *
 * Three entry points: validate candidate files against their sources,
 * auto-fix candidates then re-validate, and translate source files
 * into new candidates. Directory runs pair files by name.
 */

use anyhow::{Result, anyhow};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::autofix::AutoFixer;
use crate::document::TweeDocument;
use crate::file_utils::FileManager;
use crate::issue::Severity;
use crate::providers::Provider;
use crate::providers::openai::OpenAi;
use crate::report::{render_fix_report, render_validation_report};
use crate::translation::{TranslationService, file_context_note};
use crate::validation::{Glossary, ValidationReport, Validator};

/// Per-run counters
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    /// Files processed
    pub processed: usize,
    /// Files that passed (no Critical issues) or translated successfully
    pub succeeded: usize,
    /// Files with Critical issues or failed translations
    pub failed: usize,
    /// Files skipped (already present, no counterpart)
    pub skipped: usize,
}

/// Main application controller
pub struct Controller {
    config: Config,
}

impl Controller {
    /// Create a controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a controller with default configuration, for tests
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Validate candidate files against their sources. Paths may be a
    /// file pair or a directory pair; reports land in `report_dir`.
    pub fn run_validate(
        &self,
        source_path: &Path,
        candidate_path: &Path,
        glossary_path: Option<&Path>,
        report_dir: &Path,
    ) -> Result<RunSummary> {
        let glossary = match glossary_path {
            Some(path) => Some(Glossary::load(path)?),
            None => None,
        };
        let pairs = collect_pairs(source_path, candidate_path)?;
        let progress = file_progress_bar(pairs.len() as u64);
        let mut summary = RunSummary::default();

        for (source_file, candidate_file) in pairs {
            progress.set_message(display_name(&candidate_file));
            let report = self.validate_pair(&source_file, &candidate_file, glossary.as_ref())?;

            let report_path =
                FileManager::report_output_path(&candidate_file, report_dir, "validation");
            FileManager::write_to_file(
                &report_path,
                &render_validation_report(
                    &report,
                    &display_name(&source_file),
                    &display_name(&candidate_file),
                ),
            )?;

            summary.processed += 1;
            if report.passed() {
                summary.succeeded += 1;
                info!("{}: {}", display_name(&candidate_file), report.summary());
            } else {
                summary.failed += 1;
                error!("{}: {}", display_name(&candidate_file), report.summary());
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        log_summary("Validation", &summary);
        Ok(summary)
    }

    /// Auto-fix candidate files, write the fixed documents and fix
    /// reports to `output_dir`, then re-validate each fixed document
    /// against its source.
    pub fn run_fix(
        &self,
        source_path: &Path,
        candidate_path: &Path,
        glossary_path: Option<&Path>,
        output_dir: &Path,
    ) -> Result<RunSummary> {
        let glossary = match glossary_path {
            Some(path) => Some(Glossary::load(path)?),
            None => None,
        };
        let pairs = collect_pairs(source_path, candidate_path)?;
        let progress = file_progress_bar(pairs.len() as u64);
        let mut summary = RunSummary::default();

        for (source_file, candidate_file) in pairs {
            progress.set_message(display_name(&candidate_file));
            let candidate =
                TweeDocument::from_text(&FileManager::read_to_string(&candidate_file)?);

            let (fixed, fix_report) = AutoFixer::fix(&candidate);
            let fixed_path = FileManager::candidate_output_path(&candidate_file, output_dir);
            FileManager::write_to_file(&fixed_path, &fixed.text())?;
            FileManager::write_to_file(
                &FileManager::report_output_path(&candidate_file, output_dir, "fixes"),
                &render_fix_report(&fix_report, &display_name(&candidate_file)),
            )?;
            if !fix_report.is_clean() {
                info!(
                    "{}: fixed {} line(s)",
                    display_name(&candidate_file),
                    fix_report.changed_lines()
                );
            }

            // Fixed output is never trusted outright
            let source = TweeDocument::from_text(&FileManager::read_to_string(&source_file)?);
            let report = self.build_validator(glossary.as_ref()).validate(&source, &fixed);
            FileManager::write_to_file(
                &FileManager::report_output_path(&candidate_file, output_dir, "validation"),
                &render_validation_report(
                    &report,
                    &display_name(&source_file),
                    &display_name(&fixed_path),
                ),
            )?;

            summary.processed += 1;
            if report.passed() {
                summary.succeeded += 1;
            } else {
                summary.failed += 1;
                warn!(
                    "{}: still failing after fixes ({})",
                    display_name(&candidate_file),
                    report.summary()
                );
            }
            progress.inc(1);
        }

        progress.finish_and_clear();
        log_summary("Fix", &summary);
        Ok(summary)
    }

    /// Translate source files into candidates under `output_dir`,
    /// validating every changed result against its source
    pub async fn run_translate(
        &self,
        source_path: &Path,
        glossary_path: Option<&Path>,
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<RunSummary> {
        let translator = &self.config.translator;
        let provider = OpenAi::new(
            &translator.endpoint,
            &translator.api_key,
            &translator.model,
            translator.timeout_secs,
        )?;
        self.run_translate_with_provider(
            Arc::new(provider),
            source_path,
            glossary_path,
            output_dir,
            force_overwrite,
        )
        .await
    }

    /// Translation entry point over an explicit provider
    pub async fn run_translate_with_provider(
        &self,
        provider: Arc<dyn Provider>,
        source_path: &Path,
        glossary_path: Option<&Path>,
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<RunSummary> {
        let glossary = match glossary_path {
            Some(path) => Some(Glossary::load(path)?),
            None => None,
        };
        let source_files = collect_sources(source_path)?;
        let service = TranslationService::new(provider, &self.config.translator);
        let progress = file_progress_bar(source_files.len() as u64);
        let summary = Mutex::new(RunSummary::default());

        futures::stream::iter(source_files)
            .map(|source_file| {
                let service = &service;
                let summary = &summary;
                let progress = &progress;
                let glossary = glossary.as_ref();
                async move {
                    let name = display_name(&source_file);
                    progress.set_message(name.clone());

                    let output_path = FileManager::candidate_output_path(&source_file, output_dir);
                    if output_path.exists() && !force_overwrite {
                        warn!("{}: output exists, skipping (use force to overwrite)", name);
                        summary.lock().skipped += 1;
                        progress.inc(1);
                        return;
                    }

                    match self
                        .translate_one(service, &source_file, &output_path, glossary)
                        .await
                    {
                        Ok(true) => {
                            let mut s = summary.lock();
                            s.processed += 1;
                            s.succeeded += 1;
                        }
                        Ok(false) => {
                            error!("{}: translation failed (content unchanged)", name);
                            let mut s = summary.lock();
                            s.processed += 1;
                            s.failed += 1;
                        }
                        Err(e) => {
                            error!("{}: {}", name, e);
                            let mut s = summary.lock();
                            s.processed += 1;
                            s.failed += 1;
                        }
                    }
                    progress.inc(1);
                }
            })
            .buffer_unordered(self.config.translator.concurrent_requests.max(1))
            .collect::<Vec<()>>()
            .await;

        progress.finish_and_clear();
        let summary = summary.into_inner();
        log_summary("Translation", &summary);
        Ok(summary)
    }

    async fn translate_one(
        &self,
        service: &TranslationService,
        source_file: &Path,
        output_path: &Path,
        glossary: Option<&Glossary>,
    ) -> Result<bool> {
        let original = FileManager::read_to_string(source_file)?;
        let note = file_context_note(&display_name(source_file));
        let outcome = service.translate_document(&original, &note).await;

        // An unchanged result means every unit fell back; treat it as
        // a failed attempt, not a candidate
        if !outcome.changed {
            return Ok(false);
        }

        let source = TweeDocument::from_text(&original);
        let candidate = TweeDocument::from_text(&outcome.text);
        let report = self.build_validator(glossary).validate(&source, &candidate);
        if report.count(Severity::Critical) > 0 {
            warn!(
                "{}: translated with {} critical issue(s); review the report",
                display_name(source_file),
                report.count(Severity::Critical)
            );
        }

        FileManager::write_to_file(output_path, &outcome.text)?;
        if let Some(report_dir) = output_path.parent() {
            FileManager::write_to_file(
                &FileManager::report_output_path(source_file, report_dir, "validation"),
                &render_validation_report(
                    &report,
                    &display_name(source_file),
                    &display_name(output_path),
                ),
            )?;
        }
        Ok(true)
    }

    fn validate_pair(
        &self,
        source_file: &Path,
        candidate_file: &Path,
        glossary: Option<&Glossary>,
    ) -> Result<ValidationReport> {
        let source = TweeDocument::from_text(&FileManager::read_to_string(source_file)?);
        let candidate = TweeDocument::from_text(&FileManager::read_to_string(candidate_file)?);
        Ok(self.build_validator(glossary).validate(&source, &candidate))
    }

    fn build_validator(&self, glossary: Option<&Glossary>) -> Validator {
        let validator = Validator::new(self.config.validator.clone());
        match glossary {
            Some(g) => validator.with_glossary(clone_glossary(g)),
            None => validator,
        }
    }
}

/// Glossaries hold a prebuilt automaton, so rebuild from entries
fn clone_glossary(glossary: &Glossary) -> Glossary {
    Glossary::from_entries(glossary.entries().to_vec())
}

/// Pair source and candidate files. For directories the candidate is
/// the file with the same name under the candidate directory.
fn collect_pairs(source_path: &Path, candidate_path: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    if source_path.is_file() {
        if !candidate_path.is_file() {
            return Err(anyhow!("Candidate file does not exist: {:?}", candidate_path));
        }
        return Ok(vec![(source_path.to_path_buf(), candidate_path.to_path_buf())]);
    }
    if !source_path.is_dir() || !candidate_path.is_dir() {
        return Err(anyhow!(
            "Source and candidate must both be files or both be directories"
        ));
    }

    let mut pairs = Vec::new();
    for source_file in FileManager::find_files(source_path, "twee")? {
        let relative = source_file
            .strip_prefix(source_path)
            .unwrap_or(&source_file);
        let candidate_file = candidate_path.join(relative);
        if candidate_file.is_file() {
            pairs.push((source_file, candidate_file));
        } else {
            warn!("No candidate for {:?}, skipping", relative);
        }
    }
    if pairs.is_empty() {
        return Err(anyhow!("No source/candidate pairs found under {:?}", source_path));
    }
    Ok(pairs)
}

fn collect_sources(source_path: &Path) -> Result<Vec<PathBuf>> {
    let files = if source_path.is_file() {
        vec![source_path.to_path_buf()]
    } else if source_path.is_dir() {
        FileManager::find_files(source_path, "twee")?
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", source_path));
    };
    if files.is_empty() {
        return Err(anyhow!("No .twee files found under {:?}", source_path));
    }
    Ok(files)
}

fn file_progress_bar(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);
    progress
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn log_summary(label: &str, summary: &RunSummary) {
    info!(
        "{} finished: {} processed, {} succeeded, {} failed, {} skipped",
        label, summary.processed, summary.succeeded, summary.failed, summary.skipped
    );
}
