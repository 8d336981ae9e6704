//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::new_debouncer;
use notify_debouncer_mini::notify::RecursiveMode;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Blog;

/// Generate the static site
pub fn run(blog: &Blog) -> Result<()> {
    let start = Instant::now();

    let listing = Generator::new(blog)?.generate()?;

    tracing::info!(
        "Generated {} posts in {:.2}s",
        listing.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Watch the posts directory and config, regenerating on change
pub fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let config_path = blog.base_dir.join("_config.yml");
    if blog.posts_dir.exists() {
        debouncer
            .watcher()
            .watch(&blog.posts_dir, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", blog.posts_dir);
    }
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut blog = blog.clone();
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let config_changed = events.iter().any(|e| e.path.ends_with("_config.yml"));
                if config_changed {
                    match Blog::new(&blog.base_dir) {
                        Ok(reloaded) => blog = reloaded,
                        Err(e) => {
                            tracing::error!("Failed to reload config: {:#}", e);
                            continue;
                        }
                    }
                }

                tracing::info!("{} file(s) changed, regenerating...", events.len());
                if let Err(e) = run(&blog) {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(_) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_generates_index() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        fs::create_dir_all(&blog.posts_dir).unwrap();
        fs::write(
            blog.posts_dir.join("hello.md"),
            "---\ntitle: Hello\ndate: 2020-01-01\n---\nHi\n",
        )
        .unwrap();

        run(&blog).unwrap();
        assert!(blog.public_dir.join("index.html").exists());
        assert!(blog.public_dir.join("posts/hello/index.html").exists());
    }

    #[test]
    fn test_run_without_posts_dir_fails() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        assert!(run(&blog).is_err());
    }
}
