//! Generator module - writes the site as static HTML files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{listing, PostRecord, PostSummary};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Static site generator
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        blog.config.validate()?;
        let renderer = TemplateRenderer::new(&blog.config)?;

        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Generate the entire site, returning the listing that was written.
    ///
    /// Every page is rendered before anything on disk changes, so a failed
    /// render leaves the previous output in place.
    pub fn generate(&self) -> Result<Vec<PostSummary>> {
        // One read serves both the listing and the post pages
        let posts = self.blog.store().list_all_posts()?;
        let listing = listing::summarize(&posts);

        let index = self.renderer.render_index(&listing)?;
        let pages = self.render_post_pages(&posts)?;

        fs::create_dir_all(&self.blog.public_dir)?;
        self.clear_post_pages()?;

        write_file(&self.blog.public_dir.join("index.html"), &index)?;
        let posts_root = self.posts_root();
        for (id, html) in &pages {
            write_file(&posts_root.join(id).join("index.html"), html)?;
        }

        tracing::info!("Generated {} post pages", pages.len());
        Ok(listing)
    }

    /// Render one page per post, keyed by post id
    fn render_post_pages(&self, posts: &[PostRecord]) -> Result<Vec<(String, String)>> {
        posts
            .iter()
            .map(|post| {
                let html = self
                    .renderer
                    .render_post(post)
                    .with_context(|| format!("Failed to render post {}", post.id))?;
                Ok((post.id.clone(), html))
            })
            .collect()
    }

    /// Drop pages of posts that no longer exist
    fn clear_post_pages(&self) -> Result<()> {
        let public_dir = &self.blog.public_dir;
        let posts_root = self.posts_root();

        if posts_root == *public_dir || !posts_root.starts_with(public_dir) {
            return Ok(());
        }
        if posts_root.exists() {
            fs::remove_dir_all(&posts_root)
                .with_context(|| format!("Failed to clear {:?}", posts_root))?;
        }
        Ok(())
    }

    fn posts_root(&self) -> PathBuf {
        self.blog.public_dir.join(self.blog.config.posts_segment())
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
