//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Both the static generator and the
//! server render through [`TemplateRenderer`].

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{MarkdownRenderer, PostRecord, PostSummary};
use crate::helpers;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
    config: ConfigData,
    markdown: MarkdownRenderer,
    site: SiteConfig,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        let url_config = config.clone();
        tera.register_filter(
            "post_url",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let id = tera::try_get_value!("post_url", "value", String, value);
                Ok(tera::Value::String(helpers::post_url(&url_config, &id)))
            },
        );

        Ok(Self {
            tera,
            config: ConfigData::from(config),
            markdown: MarkdownRenderer::from_config(&config.highlight),
            site: config.clone(),
        })
    }

    /// Render the home page listing
    pub fn render_index(&self, posts: &[PostSummary]) -> Result<String> {
        let mut context = self.base_context(true, &helpers::full_url_for(&self.site, "/"));
        context.insert("posts", posts);

        let intro = if self.site.description.trim().is_empty() {
            String::new()
        } else {
            self.markdown.render(&self.site.description)
        };
        context.insert("intro", &intro);

        self.render("index.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, post: &PostRecord) -> Result<String> {
        let path = helpers::post_url(&self.site, &post.id);
        let mut context = self.base_context(false, &helpers::full_url_for(&self.site, &path));
        context.insert("post", &post.summary());
        context.insert("content", &self.markdown.render(&post.content));

        self.render("post.html", &context)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    #[cfg(test)]
    pub(crate) fn replace_template(&mut self, name: &str, source: &str) -> Result<()> {
        Ok(self.tera.add_raw_template(name, source)?)
    }

    fn base_context(&self, is_home: bool, canonical: &str) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.config);
        context.insert("is_home", &is_home);
        context.insert("canonical", canonical);
        context
    }
}

/// Tera filter: format an ISO date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "LL".to_string(),
    };

    Ok(tera::Value::String(helpers::format_date_with(&s, &format)))
}

/// Site settings exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub author: String,
    pub language: String,
    pub root: String,
    pub date_format: String,
}

impl From<&SiteConfig> for ConfigData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            root: helpers::url_for(config, "/"),
            date_format: config.date_format.clone(),
        }
    }
}
