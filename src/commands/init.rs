//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: My Blog
author: John Doe
description: |
  Hello, I'm **John**. I share my recent news on this blog.
language: en

# URL
url: http://localhost:4000
root: /
posts_path: posts

# Directory
posts_dir: posts
public_dir: public

# Listing dates: LL gives "January 1, 2020"
date_format: LL

highlight:
  line_number: false
  theme: base16-ocean.dark
"#;

const WELCOME_POST: &str = r#"---
title: Welcome to blog-rs
date: {date}
---

This is your first post. Edit or delete it, then start writing.

Create a new post with:

```bash
$ blog-rs new "My New Post"
```

Preview it with `blog-rs server`, or build the static site with
`blog-rs generate`.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::write(&config_path, CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    fs::write(
        target_dir.join("posts/welcome.md"),
        WELCOME_POST.replace("{date}", &today),
    )?;

    Ok(())
}
