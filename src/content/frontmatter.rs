//! Front-matter parsing

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::PostError;

const FENCE: &str = "---";

/// Metadata block at the head of a post.
///
/// Only `title` and `date` are recognized; any other key is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
}

impl FrontMatter {
    /// Parse the metadata block of the post `name`.
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(name: &str, content: &'a str) -> Result<(Self, &'a str), PostError> {
        let (yaml, body) = split_block(content)
            .ok_or_else(|| PostError::metadata(name, "missing `---` metadata block"))?;

        if yaml.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml)
            .map_err(|e| PostError::metadata(name, e.to_string()))?;

        Ok((fm, body))
    }

    /// Check required fields, yielding `(title, date)`
    pub fn require(self, name: &str) -> Result<(String, String), PostError> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PostError::metadata(name, "missing `title`"))?;

        let date = self
            .date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| PostError::metadata(name, "missing `date`"))?;

        if !is_iso_date(&date) {
            return Err(PostError::metadata(
                name,
                format!("`date` must be YYYY-MM-DD, got {:?}", date),
            ));
        }

        Ok((title, date))
    }
}

/// Split `content` into (metadata, body) at the `---` fences.
///
/// The opening fence must be the first non-blank line and the closing fence
/// a line of its own.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();
    let rest = content.strip_prefix(FENCE)?;

    // Opening fence must end its line
    let pos = rest.find('\n')?;
    if !rest[..pos].trim().is_empty() {
        return None;
    }
    let rest = &rest[pos + 1..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == FENCE {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

/// `YYYY-MM-DD` naming a real calendar day
fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
        && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
