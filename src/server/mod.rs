//! Preview server rendering pages on each request

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::PostError;
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Server state
struct ServerState {
    blog: Blog,
    renderer: TemplateRenderer,
}

/// Failure while serving a page
#[derive(Debug)]
enum ServerError {
    Post(PostError),
    Internal(anyhow::Error),
}

impl From<PostError> for ServerError {
    fn from(e: PostError) -> Self {
        ServerError::Post(e)
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(e: anyhow::Error) -> Self {
        ServerError::Internal(e)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Post(PostError::NotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Post not found: {}", id)).into_response()
            }
            ServerError::Post(e) => {
                tracing::error!("Render failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
            ServerError::Internal(e) => {
                tracing::error!("Render failed: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e)).into_response()
            }
        }
    }
}

/// Build the application router
pub fn router(blog: &Blog) -> Result<Router> {
    blog.config.validate()?;
    let state = Arc::new(ServerState {
        blog: blog.clone(),
        renderer: TemplateRenderer::new(&blog.config)?,
    });

    let prefix = match blog.config.posts_segment() {
        "" => String::new(),
        p => format!("/{}", p),
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route(&format!("{}/:id", prefix), get(post_handler))
        .route(&format!("{}/:id/", prefix), get(post_handler))
        .fallback_service(ServeDir::new(&blog.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let root = blog.config.root.trim_end_matches('/');
    if root.is_empty() {
        Ok(app)
    } else {
        Ok(Router::new().nest(root, app))
    }
}

/// Start the preview server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, blog.config.root);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Home page: the listing is read fresh for every request
async fn index_handler(State(state): State<Arc<ServerState>>) -> Result<Html<String>, ServerError> {
    let html = tokio::task::spawn_blocking(move || -> Result<String, ServerError> {
        let listing = state.blog.listing()?;
        Ok(state.renderer.render_index(&listing)?)
    })
    .await
    .map_err(|e| ServerError::Internal(e.into()))??;

    Ok(Html(html))
}

/// Single post page
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, ServerError> {
    let html = tokio::task::spawn_blocking(move || -> Result<String, ServerError> {
        let post = state.blog.store().read_post(&id)?;
        Ok(state.renderer.render_post(&post)?)
    })
    .await
    .map_err(|e| ServerError::Internal(e.into()))??;

    Ok(Html(html))
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use axum::body::Body;
    use axum::http::Request;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_blog() -> (TempDir, Blog) {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path().to_path_buf(), SiteConfig::default());
        fs::create_dir_all(&blog.posts_dir).unwrap();
        fs::write(
            blog.posts_dir.join("a.md"),
            "---\ntitle: First\ndate: 2020-01-01\n---\nFirst body\n",
        )
        .unwrap();
        fs::write(
            blog.posts_dir.join("b.md"),
            "---\ntitle: Second\ndate: 2020-06-15\n---\nSecond body\n",
        )
        .unwrap();
        (tmp, blog)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn index_lists_posts_newest_first() {
        let (_tmp, blog) = test_blog();
        let (status, body) = get(router(&blog).unwrap(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.find("Second").unwrap() < body.find("First").unwrap());
        assert!(body.contains("June 15, 2020"));
    }

    #[tokio::test]
    async fn index_reflects_new_posts_without_restart() {
        let (_tmp, blog) = test_blog();
        let app = router(&blog).unwrap();

        fs::write(
            blog.posts_dir.join("c.md"),
            "---\ntitle: Third\ndate: 2021-01-01\n---\n",
        )
        .unwrap();

        let (_, body) = get(app, "/").await;
        assert!(body.contains("Third"));
    }

    #[tokio::test]
    async fn post_page_renders() {
        let (_tmp, blog) = test_blog();
        let app = router(&blog).unwrap();

        let (status, body) = get(app.clone(), "/posts/a/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("First body"));

        let (status, _) = get(app, "/posts/a").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_post_is_404() {
        let (_tmp, blog) = test_blog();
        let (status, _) = get(router(&blog).unwrap(), "/posts/nope/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_post_fails_the_render() {
        let (_tmp, blog) = test_blog();
        fs::write(blog.posts_dir.join("broken.md"), "---\ntitle: Broken\n---\n").unwrap();

        let (status, body) = get(router(&blog).unwrap(), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("broken.md"));
    }
}
