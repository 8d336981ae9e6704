//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    /// Home page introduction, rendered as markdown
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// URL segment under which single posts live
    pub posts_path: String,

    // Directory
    pub posts_dir: String,
    pub public_dir: String,

    // Date format for listings: "LL" for "January 1, 2020", otherwise a
    // Moment.js-style pattern such as "YYYY-MM-DD"
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            author: "John Doe".to_string(),
            description: String::new(),
            language: "en".to_string(),

            url: "http://localhost:4000".to_string(),
            root: "/".to_string(),
            posts_path: "posts".to_string(),

            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),

            date_format: "LL".to_string(),

            highlight: HighlightConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would send output outside the public directory
    pub fn validate(&self) -> Result<()> {
        let posts_path = self.posts_path.trim_matches('/');
        if posts_path.is_empty() {
            return Ok(());
        }

        let mut components = Path::new(posts_path).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => anyhow::bail!(
                "posts_path must be a single URL segment, got {:?}",
                self.posts_path
            ),
        }
    }

    /// `posts_path` without surrounding slashes
    pub fn posts_segment(&self) -> &str {
        self.posts_path.trim_matches('/')
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub line_number: bool,
    /// syntect theme name
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_number: false,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.date_format, "LL");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Ching Yin's Blog
author: Ching Yin
posts_dir: content/posts
highlight:
  line_number: true
unknown_key: ignored
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Ching Yin's Blog");
        assert_eq!(config.posts_dir, "content/posts");
        assert!(config.highlight.line_number);
        assert_eq!(config.highlight.theme, "base16-ocean.dark");
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_posts_path_must_be_one_segment() {
        let with_path = |p: &str| SiteConfig {
            posts_path: p.to_string(),
            ..Default::default()
        };

        assert!(with_path("posts").validate().is_ok());
        assert!(with_path("/blog/").validate().is_ok());
        assert!(with_path("").validate().is_ok());
        assert!(with_path("../").validate().is_err());
        assert!(with_path("..").validate().is_err());
        assert!(with_path("./").validate().is_err());
        assert!(with_path("a/b").validate().is_err());
    }

    #[test]
    fn test_load_rejects_parent_posts_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(&path, "posts_path: ../\n").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("posts_path"));
    }

    #[test]
    fn test_load_empty_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("_config.yml");
        fs::write(&path, "\n").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "My Blog");
    }
}
