//! Upload seam: where prepared bytes leave the pipeline.
//!
//! The pipeline itself never talks to the network. It hands encoded
//! buffers to an [`Uploader`] along with the repo-relative path they
//! should live at; the uploader is responsible for persisting them and
//! reporting the public addresses the content will be served from.
//!
//! [`DirUploader`] is the built-in implementation: it stages files into
//! a local directory laid out exactly like the target repository, and
//! derives the raw/CDN URLs a GitHub contents upload of the same path
//! would yield. Pushing the staged tree is then an ordinary `git add`
//! and push, which keeps tokens and HTTP entirely out of this tool.
//!
//! Every published file gets two addresses:
//! - raw: `https://raw.githubusercontent.com/<repo>/<branch>/<path>`
//! - CDN: `https://cdn.jsdelivr.net/gh/<repo>/<path>` (jsDelivr serves
//!   the default branch, so no branch segment appears)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("could not stage {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("upload rejected ({status}): {message}")]
    Api { status: u16, message: String },
}

/// One successfully published file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Published {
    /// Repo-relative path, e.g. `images/2026/8/bia-sach.jpg`.
    pub path: String,
    pub raw_url: String,
    pub cdn_url: String,
    /// Encoded size in bytes.
    pub size: u64,
}

/// Destination for prepared bytes.
pub trait Uploader {
    /// Persist `bytes` at the repo-relative `path` and report where the
    /// content will be publicly served from.
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<Published, UploadError>;
}

/// Rewrite a GitHub web (blob) download URL into its raw-content form.
///
/// The contents API reports where a file can be fetched; the web host
/// wraps blobs in HTML, the raw host serves bytes. URLs already on the
/// raw host pass through unchanged.
pub fn raw_from_download_url(download_url: &str) -> String {
    download_url
        .replace("https://github.com", "https://raw.githubusercontent.com")
        .replace("/blob/", "/")
}

/// jsDelivr mirror address for a repo path. jsDelivr resolves `gh/`
/// against the default branch, so the branch never appears here.
pub fn cdn_mirror_url(repo: &str, path: &str) -> String {
    format!("https://cdn.jsdelivr.net/gh/{repo}/{path}")
}

/// Stages files under a local root, mirroring the target repository's
/// layout, and derives the URLs publishing would produce.
pub struct DirUploader {
    root: PathBuf,
    repo: String,
    branch: String,
}

impl DirUploader {
    pub fn new(root: impl Into<PathBuf>, repo: &str, branch: &str) -> Self {
        Self {
            root: root.into(),
            repo: repo.to_string(),
            branch: branch.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Uploader for DirUploader {
    fn upload(&self, path: &str, bytes: &[u8]) -> Result<Published, UploadError> {
        let dest = self.root.join(path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| UploadError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dest, bytes).map_err(|source| UploadError::Io {
            path: dest.clone(),
            source,
        })?;

        let download_url = format!(
            "https://github.com/{}/blob/{}/{}",
            self.repo, self.branch, path
        );
        Ok(Published {
            path: path.to_string(),
            raw_url: raw_from_download_url(&download_url),
            cdn_url: cdn_mirror_url(&self.repo, path),
            size: bytes.len() as u64,
        })
    }
}
