use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::types::{DocumentFormat, SelectedFile};

pub const PICKER_EXTENSIONS: [&str; 2] = ["pdf", "epub"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("no file was dropped")]
    Empty,
    #[error("unsupported file type: {mime}")]
    Unsupported { path: PathBuf, mime: String },
}

/// Declared type of a path, derived from its extension only.
pub fn declared_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

pub fn accept_path(path: &Path) -> Result<SelectedFile, UploadError> {
    let mime = declared_mime(path);
    match DocumentFormat::from_mime(&mime) {
        Some(format) => Ok(SelectedFile::new(path, format)),
        None => Err(UploadError::Unsupported {
            path: path.to_path_buf(),
            mime,
        }),
    }
}

/// Forwards the first dropped file whose declared type is accepted. When
/// none match, the first rejection is reported.
pub fn accept_drop(paths: &[PathBuf]) -> Result<SelectedFile, UploadError> {
    let mut first_error = None;
    for path in paths {
        match accept_path(path) {
            Ok(file) => return Ok(file),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    Err(first_error.unwrap_or(UploadError::Empty))
}

/// Splits pasted text into paths. Terminals paste dropped files as quoted or
/// backslash-escaped paths, sometimes as `file://` URIs, separated by
/// whitespace or newlines.
pub fn parse_dropped_paths(pasted: &str) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = pasted.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() => push_path(&mut current, &mut out),
            (None, c) => current.push(c),
        }
    }
    push_path(&mut current, &mut out);
    out
}

fn push_path(current: &mut String, out: &mut Vec<PathBuf>) {
    if current.is_empty() {
        return;
    }
    let raw = std::mem::take(current);
    match raw.strip_prefix("file://") {
        Some(uri_path) => out.push(PathBuf::from(percent_decode(uri_path))),
        None => out.push(PathBuf::from(raw.as_str())),
    }
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    char::from(byte).to_digit(16).and_then(|d| u8::try_from(d).ok())
}

/// Files the picker offers: `.pdf`/`.epub` directly inside `dir`, sorted.
pub fn list_candidates(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && has_picker_extension(path))
        .collect();
    files.sort();
    Ok(files)
}

fn has_picker_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            PICKER_EXTENSIONS
                .iter()
                .any(|allowed| e.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
