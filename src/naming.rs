//! SEO-safe destination naming: slugs, folder templates, and staged filenames.
//!
//! Every uploaded file gets a name derived from its original stem through a
//! single slug convention, so URLs stay lowercase, ASCII, and hyphen-delimited
//! regardless of what the source file was called:
//!
//! - `"Ảnh Bán Hàng.jpg"` → `anh-ban-hang.jpg`
//! - `"My Photo (1).PNG"` → `my-photo-1.jpg` (extension follows output format)
//! - `"日本語.jpg"` → `img-3f9a01c2.jpg` (no ASCII content, hashed fallback)
//!
//! ## Slug algorithm
//!
//! 1. NFKD-decompose, separating base characters from combining marks
//! 2. Drop all non-ASCII code points (the isolated marks fall away: `ả` → `a`)
//! 3. Replace every run of characters outside `[a-zA-Z0-9-]` with one hyphen
//! 4. Lowercase
//! 5. Collapse repeated hyphens, strip leading/trailing hyphens
//!
//! A slug can come out empty (step 2 may drop everything). Callers that need a
//! filename use [`slug_or_fallback`], which substitutes a short content-hash
//! identifier so the name is never empty and stays stable per input.
//!
//! ## Folder templates
//!
//! Destination folders support three placeholders, expanded at process time:
//! `{year}` and `{month}` from the current date, `{custom}` from a
//! user-chosen name (itself slugged before substitution).

use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

/// Convert arbitrary text into a lowercase ASCII hyphen-delimited slug.
///
/// Output contains only `[a-z0-9]` and single interior hyphens, with no
/// leading or trailing hyphen. May be empty when the input has no
/// ASCII-representable characters; see [`slug_or_fallback`].
pub fn slugify(text: &str) -> String {
    // NFKD first: "ả" decomposes to "a" + a combining mark, and the mark is
    // non-ASCII so the filter drops it while the base letter survives.
    let ascii: String = text.nfkd().filter(char::is_ascii).collect();

    // Single pass does steps 3-5: alphanumerics are kept lowercased, any
    // maximal run of other characters (separators, punctuation, literal
    // hyphens) contributes exactly one interior hyphen.
    let mut slug = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slugify, falling back to a generated identifier when the slug is empty.
///
/// The fallback is `img-` plus the first 8 hex characters of the SHA-256 of
/// the original text, so fully non-ASCII names still get distinct, stable,
/// filename-safe slugs.
pub fn slug_or_fallback(text: &str) -> String {
    let slug = slugify(text);
    if !slug.is_empty() {
        return slug;
    }
    let digest = Sha256::digest(text.as_bytes());
    let hex = format!("{digest:x}");
    format!("img-{}", &hex[..8])
}

/// Destination filename for a prepared image: slugged stem + output extension.
pub fn destination_name(stem: &str, extension: &str) -> String {
    format!("{}.{}", slug_or_fallback(stem), extension)
}

/// Thumbnail filename derived from the main destination name.
pub fn thumbnail_name(filename: &str) -> String {
    format!("thumb_{filename}")
}

/// Expand a destination folder template.
///
/// `{year}` and `{month}` substitute as plain decimal (month unpadded:
/// August is `8`, not `08`); `{custom}` substitutes the slugged custom name.
/// Templates without placeholders pass through unchanged.
pub fn expand_folder(template: &str, year: i32, month: u32, custom: &str) -> String {
    template
        .replace("{year}", &year.to_string())
        .replace("{month}", &month.to_string())
        .replace("{custom}", &slugify(custom))
}

/// Join an expanded folder and a filename into a repo-relative path.
///
/// Tolerates folders written with or without a trailing slash; an empty
/// folder places the file at the repo root.
pub fn repo_path(folder: &str, filename: &str) -> String {
    if folder.is_empty() {
        return filename.to_string();
    }
    if folder.ends_with('/') {
        format!("{folder}{filename}")
    } else {
        format!("{folder}/{filename}")
    }
}
