//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Create a new post file dated today, returning its path
pub fn create_post(blog: &Blog, title: &str, name: Option<&str>) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    create_post_dated(blog, title, name, &today)
}

/// Create a new post file with an explicit date
pub fn create_post_dated(
    blog: &Blog,
    title: &str,
    name: Option<&str>,
    date: &str,
) -> Result<PathBuf> {
    let id = match name {
        Some(n) => n.trim_end_matches(".md").to_string(),
        None => slug::slugify(title),
    };
    if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) {
        anyhow::bail!("Invalid post name: {:?}", id);
    }

    fs::create_dir_all(&blog.posts_dir)?;

    let file_path = blog.posts_dir.join(format!("{}.md", id));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    // Quote the title so colons and the like survive YAML
    let content = format!(
        "---\ntitle: {}\ndate: {}\n---\n\n",
        serde_json::to_string(title)?,
        date
    );
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}
