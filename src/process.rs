//! Batch preparation and upload.
//!
//! The orchestrating stage of the picpress pipeline. Takes input files and
//! directories from the CLI, runs every image through the preparation chain
//! (orientation fix, width cap, watermark, encode), and hands the results to
//! an [`Uploader`] under SEO-safe destination names.
//!
//! ## Per-file flow
//!
//! ```text
//! read bytes
//!   └─> prepare (EXIF orientation → width cap → watermark)
//!        ├─> encode main image    ──> upload as <folder>/<slug>.<ext>
//!        └─> derive thumbnail     ──> upload as <folder>/thumb_<slug>.<ext>
//! ```
//!
//! A failure in any step marks that file as failed and moves on to the next
//! one; a batch never aborts because one input was truncated or rejected by
//! the remote. Run-level problems (unreadable logo, no inputs at all) abort
//! before any upload happens.
//!
//! ## Staged layout
//!
//! With the stock `destination.folder` and thumbnails enabled, a run stages:
//!
//! ```text
//! staging/
//! └── images/
//!     ├── anh-ban-hang.jpg
//!     └── thumb_anh-ban-hang.jpg
//! ```
//!
//! The destination folder template expands exactly once per run, so a batch
//! crossing midnight at a month boundary still lands in a single folder.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use image::DynamicImage;
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, PressConfig};
use crate::imaging::{self, PipelineError, PrepareOptions, codec};
use crate::naming;
use crate::upload::{Published, UploadError, Uploader};

/// File extensions accepted when expanding input directories.
pub const INPUT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Watermark logo is not a readable image: {0}")]
    LogoUnreadable(PathBuf),
    #[error("No image files found in the given inputs")]
    NoInputs,
}

/// Outcome of one batch run.
#[derive(Debug, Default, Serialize)]
pub struct ProcessReport {
    pub succeeded: Vec<FileSuccess>,
    pub failed: Vec<FileFailure>,
}

impl ProcessReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_ok(&self) -> bool {
        self.failed.is_empty()
    }

    /// Pretty JSON rendering, for `process --report`.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One prepared and uploaded input.
#[derive(Debug, Serialize)]
pub struct FileSuccess {
    pub source: PathBuf,
    /// Final pixel dimensions of the prepared main image.
    pub width: u32,
    pub height: u32,
    pub image: Published,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Published>,
}

/// One input that did not make it.
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub source: PathBuf,
    pub reason: String,
}

/// Progress notifications emitted synchronously while a batch runs.
///
/// The callback fires on the calling thread between pipeline steps; the CLI
/// uses it to print per-file lines as they happen instead of waiting for the
/// final report.
#[derive(Debug, Clone, Copy)]
pub enum ProcessEvent<'a> {
    BatchStarted {
        total: usize,
    },
    FileStarted {
        index: usize,
        total: usize,
        source: &'a Path,
    },
    FileDone {
        source: &'a Path,
        image: &'a Published,
        thumbnail: Option<&'a Published>,
    },
    FileFailed {
        source: &'a Path,
        reason: &'a str,
    },
}

/// Failure of a single input file. Batch processing continues past these.
#[derive(Error, Debug)]
enum StepError {
    #[error("read failed: {0}")]
    Read(std::io::Error),
    #[error("{0}")]
    Pipeline(#[from] PipelineError),
    #[error("{0}")]
    Upload(#[from] UploadError),
}

/// Run the full batch: expand inputs, prepare every image, upload it and
/// (when configured) its thumbnail.
pub fn run(
    config: &PressConfig,
    inputs: &[PathBuf],
    uploader: &impl Uploader,
    mut on_event: impl FnMut(ProcessEvent<'_>),
) -> Result<ProcessReport, ProcessError> {
    let options = config.to_options()?;
    let logo = load_logo(config)?;
    let files = collect_inputs(inputs)?;
    if files.is_empty() {
        return Err(ProcessError::NoInputs);
    }

    // One expansion per run, not per file.
    let now = Local::now();
    let folder = naming::expand_folder(
        &config.destination.folder,
        now.year(),
        now.month(),
        &config.destination.custom,
    );

    let total = files.len();
    on_event(ProcessEvent::BatchStarted { total });

    let mut report = ProcessReport::default();
    for (index, source) in files.iter().enumerate() {
        on_event(ProcessEvent::FileStarted {
            index,
            total,
            source,
        });
        match process_one(source, &options, logo.as_ref(), &folder, uploader) {
            Ok(success) => {
                on_event(ProcessEvent::FileDone {
                    source,
                    image: &success.image,
                    thumbnail: success.thumbnail.as_ref(),
                });
                report.succeeded.push(success);
            }
            Err(err) => {
                let reason = err.to_string();
                on_event(ProcessEvent::FileFailed {
                    source,
                    reason: &reason,
                });
                report.failed.push(FileFailure {
                    source: source.clone(),
                    reason,
                });
            }
        }
    }

    Ok(report)
}

/// Prepare and upload a single file.
fn process_one(
    source: &Path,
    options: &PrepareOptions,
    logo: Option<&DynamicImage>,
    folder: &str,
    uploader: &impl Uploader,
) -> Result<FileSuccess, StepError> {
    let raw = fs::read(source).map_err(StepError::Read)?;

    let prepared = imaging::prepare_image(&raw, options, logo)?;
    let main = imaging::encode(&prepared, options.format, options.quality)?;

    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    let name = naming::destination_name(&stem, options.format.extension());
    let image = uploader.upload(&naming::repo_path(folder, &name), &main.bytes)?;

    let thumbnail = match options.thumbnail_width {
        Some(width) => {
            let thumb = imaging::thumbnail(&prepared, width, options.format, options.quality)?;
            let thumb_path = naming::repo_path(folder, &naming::thumbnail_name(&name));
            Some(uploader.upload(&thumb_path, &thumb.bytes)?)
        }
        None => None,
    };

    Ok(FileSuccess {
        source: source.to_path_buf(),
        width: main.width,
        height: main.height,
        image,
        thumbnail,
    })
}

fn load_logo(config: &PressConfig) -> Result<Option<DynamicImage>, ProcessError> {
    let Some(path) = &config.watermark.logo else {
        return Ok(None);
    };
    let raw = fs::read(path)?;
    let img = codec::decode(&raw).map_err(|_| ProcessError::LogoUnreadable(PathBuf::from(path)))?;
    Ok(Some(img))
}

/// Expand the CLI inputs into a concrete file list.
///
/// Directories are walked recursively, keeping only known image extensions,
/// each level in lexical order. Explicitly named files are taken as-is; if
/// one turns out not to be an image the decode step reports it per file.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ProcessError> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            collect_dir(input, &mut files)?;
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn collect_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ProcessError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();
    entries.sort();

    for entry in entries {
        if entry.is_dir() {
            collect_dir(&entry, files)?;
        } else if is_image_file(&entry) {
            files.push(entry);
        }
    }
    Ok(())
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| INPUT_EXTENSIONS.iter().any(|ok| ext.eq_ignore_ascii_case(ok)))
        .unwrap_or(false)
}
