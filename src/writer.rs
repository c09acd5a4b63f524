use std::path::Path;

use tracing::{info, warn};

use crate::error::{ProjfieldsError, Result};
use crate::present::ValuePresenter;
use crate::project::Project;
use crate::record::RecordCollection;
use crate::report;

/// Character sets the writer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    UsAscii,
    Latin1,
    /// Big-endian with a byte order mark.
    Utf16,
    Utf16Le,
    Utf16Be,
}

impl Charset {
    /// Resolves a charset name. Case, `-` and `_` are ignored, so `UTF8`,
    /// `utf-8` and `Utf_8` all name UTF-8.
    pub fn for_name(name: &str) -> Result<Charset> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        let charset = match normalized.as_str() {
            "UTF8" => Self::Utf8,
            "ASCII" | "USASCII" => Self::UsAscii,
            "ISO88591" | "LATIN1" => Self::Latin1,
            "UTF16" => Self::Utf16,
            "UTF16LE" => Self::Utf16Le,
            "UTF16BE" => Self::Utf16Be,
            _ => return Err(ProjfieldsError::UnsupportedEncoding(name.to_owned())),
        };
        Ok(charset)
    }
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::UsAscii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
            Self::Utf16 => "UTF-16",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
        }
    }
    /// Encodes `text`; characters the charset cannot represent become `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::UsAscii => text.chars().map(|c| if c.is_ascii() { c as u8 } else { b'?' }).collect(),
            Self::Latin1 => text.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect(),
            Self::Utf16 => {
                let mut bytes = vec![0xFE, 0xFF];
                bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
                bytes
            }
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }
    fn represents(&self, c: char) -> bool {
        match self {
            Self::UsAscii => c.is_ascii(),
            Self::Latin1 => u8::try_from(c).is_ok(),
            _ => true,
        }
    }
}

/// Writes the full project report to `path` in the named charset.
pub fn write_project<P: AsRef<Path>>(
    project: &Project,
    path: P,
    encoding: &str,
    presenter: &ValuePresenter,
) -> Result<()> {
    let charset = Charset::for_name(encoding)?;
    let lines = report::project_report(project, presenter)?;
    write_lines(&lines, path.as_ref(), charset)
}

/// Writes the raw values of one collection to `path` in the named charset.
pub fn write_collection<P: AsRef<Path>>(collection: &RecordCollection, path: P, encoding: &str) -> Result<()> {
    let charset = Charset::for_name(encoding)?;
    write_lines(&report::raw_listing(collection), path.as_ref(), charset)
}

fn write_lines(lines: &[String], path: &Path, charset: Charset) -> Result<()> {
    let mut text = lines.join("\n");
    text.push('\n');
    let unmappable = text.chars().filter(|c| !charset.represents(*c)).count();
    if unmappable > 0 {
        warn!(charset = charset.name(), unmappable, "characters replaced with '?'");
    }
    let bytes = charset.encode(&text);
    std::fs::write(path, &bytes)
        .map_err(|e| ProjfieldsError::WriteFailure(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), charset = charset.name(), bytes = bytes.len(), "wrote report");
    Ok(())
}
