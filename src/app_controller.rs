use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::{AppError, FormatError};
use crate::file_utils::FileManager;
use crate::formats::{FormatRegistry, ProbeResult, SubtitleFormat};

// @module: Application controller for subtitle conversion

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStatus {
    /// Written to the given path
    Converted {
        source_format: &'static str,
        output_path: PathBuf,
        error_count: usize,
    },
    /// Output already existed and overwriting was not forced
    Skipped(PathBuf),
}

/// Totals of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Known formats in detection order
    registry: FormatRegistry,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            config,
            registry: FormatRegistry::with_default_formats(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    fn target_format(&self, target: Option<&str>) -> Result<&dyn SubtitleFormat> {
        let name = target.unwrap_or(self.config.default_format.as_str());
        self.registry
            .find_by_name(name)
            .ok_or_else(|| AppError::from(FormatError::UnknownFormat(name.to_string())).into())
    }

    /// Probe every format against a file and report the first match
    pub fn detect_file(&self, input_file: &Path) -> Result<(Option<&'static str>, Vec<ProbeResult>)> {
        let lines = FileManager::read_lines(input_file)?;
        let file_name = input_file.to_string_lossy();
        let options = self.config.format_options();

        let probes = self.registry.probe_all(&lines, &file_name, &options);
        let detected = probes
            .iter()
            .find(|probe| probe.accepted)
            .map(|probe| probe.format_name);

        Ok((detected, probes))
    }

    /// Convert one file into `output_dir`
    pub fn run(
        &self,
        input_file: &Path,
        output_dir: &Path,
        target: Option<&str>,
        force_overwrite: bool,
    ) -> Result<ConversionStatus> {
        if !FileManager::file_exists(input_file) {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_file)).into());
        }

        let target_format = self.target_format(target)?;
        let output_path =
            FileManager::generate_output_path(input_file, output_dir, target_format.extension());

        if output_path == input_file {
            warn!("Skipping {:?}, output would overwrite the input", input_file);
            return Ok(ConversionStatus::Skipped(output_path));
        }
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite): {:?}", output_path);
            return Ok(ConversionStatus::Skipped(output_path));
        }

        let lines = FileManager::read_lines(input_file)?;
        let file_name = input_file.to_string_lossy();
        let options = self.config.format_options();

        let (source_format, outcome) = self
            .registry
            .load(&lines, &file_name, &options)
            .map_err(AppError::from)?;
        debug!(
            "Loaded {} paragraph(s) from {:?} as {}",
            outcome.subtitle.len(),
            input_file,
            source_format.name()
        );

        let text = target_format.to_text(&outcome.subtitle, &options);
        FileManager::write_to_file(&output_path, &text)?;

        info!(
            "Converted {:?} ({}) -> {:?} ({})",
            input_file,
            source_format.name(),
            output_path,
            target_format.name()
        );

        Ok(ConversionStatus::Converted {
            source_format: source_format.name(),
            output_path,
            error_count: outcome.error_count,
        })
    }

    /// Convert every recognized file below `input_dir`.
    ///
    /// Outputs go next to their inputs unless `output_dir` is given.
    /// Unrecognized files are counted as failures and do not stop the run.
    pub fn run_folder(
        &self,
        input_dir: &Path,
        output_dir: Option<&Path>,
        target: Option<&str>,
        force_overwrite: bool,
    ) -> Result<FolderSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)).into());
        }

        // Fail early on a bad target instead of once per file
        self.target_format(target)?;

        info!("Converting subtitles in directory: {:?}", input_dir);
        let mut summary = FolderSummary::default();

        for path in FileManager::list_files(input_dir)? {
            let destination = output_dir
                .map(Path::to_path_buf)
                .or_else(|| path.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));

            match self.run(&path, &destination, target, force_overwrite) {
                Ok(ConversionStatus::Converted { .. }) => summary.converted += 1,
                Ok(ConversionStatus::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {:?}: {}", path, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished: {} converted, {} skipped, {} failed",
            summary.converted, summary.skipped, summary.failed
        );

        Ok(summary)
    }
}
