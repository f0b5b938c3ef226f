//! # picpress
//!
//! Prepare images for GitHub-hosted delivery. Each input photo is
//! EXIF-uprighted, capped to a maximum width, optionally watermarked,
//! recompressed as JPEG or WebP, renamed to an SEO-safe slug, and staged
//! into a git-ready folder together with its raw.githubusercontent.com and
//! jsDelivr CDN URLs.
//!
//! # Architecture: Prepare, Name, Stage
//!
//! A batch run pushes every input through one chain:
//!
//! ```text
//! read ─> decode ─> orient ─> cap width ─> watermark ─┬─> encode main ─> stage
//!                                                     └─> thumbnail ────> stage
//! ```
//!
//! The chain is deliberately split across three seams:
//!
//! - **Pixels** ([`imaging`]): pure functions from bytes and options to
//!   encoded images. No filesystem, no config, fully unit-testable.
//! - **Names** ([`naming`]): the slug convention and folder templates that
//!   decide where a file lands. Pure string functions.
//! - **Destination** ([`upload`]): the [`upload::Uploader`] trait takes
//!   finished bytes at a repo-relative path. Batch logic never knows whether
//!   it is talking to a staging directory or a mock.
//!
//! [`process`] wires the three together and reports per-file progress and
//! failures; [`config`]/[`output`] are the TOML and terminal edges.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Decode, EXIF orientation, resize math, watermarking, JPEG/WebP encode |
//! | [`naming`] | SEO slugs, hashed fallbacks, folder templates, staged filenames |
//! | [`upload`] | `Uploader` trait, staging-directory uploader, raw/CDN URL derivation |
//! | [`process`] | Batch orchestration: collect inputs, prepare, stage, report |
//! | [`config`] | `picpress.toml` loading, validation, and the stock config text |
//! | [`output`] | CLI output formatting: per-file progress lines and run summaries |
//!
//! # Design Decisions
//!
//! ## Staging Over Direct API Calls
//!
//! Prepared files are written into a local staging directory shaped exactly
//! like the target repository, with final URLs derived up front (the raw URL
//! by host rewrite, the CDN URL from the repo slug). Committing and pushing
//! the staged tree is left to git, which already handles auth, retries, and
//! history. The [`upload::Uploader`] trait keeps the seam open: batch code
//! is written against the trait, and the test suite exercises it with an
//! in-memory mock.
//!
//! ## Thumbnails Derive From the Prepared Image
//!
//! The thumbnail is cut from the already-resized, already-watermarked image,
//! not from the original. What the preview shows is exactly what the full
//! image delivers, watermark included, and each input is decoded only once.
//! Unlike the main image (which is only ever capped), the thumbnail is
//! brought to its exact configured width even when that means upscaling, so
//! gallery grids stay uniform.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, orientation, resampling (Lanczos3) and JPEG encoding use the
//! `image` crate; EXIF comes from `kamadak-exif`; lossy WebP goes through
//! the `webp` crate. No ImageMagick, no system binaries to install: the
//! tool is a single self-contained executable.
//!
//! ## One Slug Convention Everywhere
//!
//! Destination names are produced by a single NFKD-based slug function:
//! diacritics fold to ASCII (`Ảnh` → `anh`), separator runs collapse to one
//! hyphen, and names with no ASCII content fall back to a short content-hash
//! identifier instead of an empty string. URLs stay lowercase, stable, and
//! safe to paste anywhere.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_helpers;
