//! List posts

use anyhow::Result;
use std::io::Write;

use crate::content::PostSummary;
use crate::helpers::format_date;
use crate::Blog;

/// Print the listing, newest first
pub fn run(blog: &Blog, json: bool) -> Result<()> {
    let listing = blog.listing()?;
    let stdout = std::io::stdout();
    write_listing(&mut stdout.lock(), &listing, json)
}

/// Write the listing as text or JSON
pub fn write_listing<W: Write>(out: &mut W, listing: &[PostSummary], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, listing)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Posts ({}):", listing.len())?;
    for post in listing {
        writeln!(
            out,
            "  {} - {} [{}]",
            format_date(&post.date),
            post.title,
            post.id
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<PostSummary> {
        vec![PostSummary {
            id: "b".to_string(),
            date: "2020-06-15".to_string(),
            title: "Second".to_string(),
        }]
    }

    #[test]
    fn test_text_listing() {
        let mut out = Vec::new();
        write_listing(&mut out, &listing(), false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Posts (1):\n  June 15, 2020 - Second [b]\n");
    }

    #[test]
    fn test_json_listing() {
        let mut out = Vec::new();
        write_listing(&mut out, &listing(), true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "id": "b", "date": "2020-06-15", "title": "Second" }])
        );
    }
}
