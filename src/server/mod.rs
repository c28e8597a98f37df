//! Preview server for the blog
//!
//! Every request goes to the content store, which re-reads the content
//! directory, so edits show up on the next reload.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{ContentError, ContentStore};
use crate::helpers::blog_index_path;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Server state
struct ServerState {
    site: Site,
    store: ContentStore,
}

/// Error body for the JSON endpoints
enum ApiError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ContentError> for ApiError {
    fn from(e: ContentError) -> Self {
        match e {
            ContentError::InvalidSlug { .. } => ApiError::NotFound(e.to_string()),
            e => {
                tracing::warn!("Content error: {}", e);
                ApiError::Internal(e.to_string())
            }
        }
    }
}

/// Run a store call on the blocking pool
async fn blocking<T, F>(f: F) -> std::result::Result<T, ApiError>
where
    F: FnOnce() -> crate::content::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            tracing::error!("Store task failed: {}", e);
            Err(ApiError::Internal("internal error".to_string()))
        }
    }
}

/// Build the router serving `site`
pub fn router(site: &Site) -> Router {
    let state = Arc::new(ServerState {
        site: site.clone(),
        store: site.store(),
    });

    let routes = Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(index_handler))
        .route("/blog/", get(index_handler))
        .route("/blog/:slug", get(post_handler))
        .route("/api/posts", get(api_posts_handler))
        .route("/api/posts/:slug", get(api_post_handler))
        .route("/api/slugs", get(api_slugs_handler))
        .nest_service("/static", ServeDir::new(&site.static_dir))
        .with_state(state);

    let root = site.config.root.trim_end_matches('/');
    let app = if root.is_empty() {
        routes
    } else {
        Router::new().nest(root, routes)
    };

    app.layer(TraceLayer::new_for_http())
}

/// Start the preview server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(site);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}{}", ip, port, blog_index_path(&site.config));
    println!("Serving {:?} at {}", site.content_dir, url);
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

async fn home_handler(State(state): State<Arc<ServerState>>) -> Redirect {
    Redirect::temporary(&blog_index_path(&state.site.config))
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Html<String> {
    let store = state.store.clone();
    let posts = blocking(move || Ok(store.list_all()))
        .await
        .unwrap_or_default();

    Html(TemplateRenderer::new(&state.site.config).index(&posts))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let store = state.store.clone();
    let post = blocking(move || Ok(store.get_by_slug(&slug)))
        .await
        .ok()
        .flatten();

    let templates = TemplateRenderer::new(&state.site.config);
    match post {
        Some(post) => Html(templates.post(&post)).into_response(),
        None => (StatusCode::NOT_FOUND, Html(templates.not_found())).into_response(),
    }
}

async fn api_posts_handler(State(state): State<Arc<ServerState>>) -> Response {
    let store = state.store.clone();
    match blocking(move || store.try_list_all()).await {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn api_post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let store = state.store.clone();
    let lookup = slug.clone();
    match blocking(move || store.try_get_by_slug(&lookup)).await {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => ApiError::NotFound(format!("no post with slug {:?}", slug)).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn api_slugs_handler(State(state): State<Arc<ServerState>>) -> Response {
    let store = state.store.clone();
    match blocking(move || store.try_list_slugs()).await {
        Ok(slugs) => Json(slugs).into_response(),
        Err(e) => e.into_response(),
    }
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
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use std::fs;
    use tower::ServiceExt;

    fn site() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.content_dir).unwrap();
        fs::write(
            site.content_dir.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-01\nauthor: Ana\nexcerpt: Hi.\ncategory: News\nfeatured: true\n---\nHello world\n",
        )
        .unwrap();
        fs::write(
            site.content_dir.join("later.md"),
            "---\ntitle: Later\ndate: 2024-06-01\nauthor: Ben\nexcerpt: Newer.\ncategory: Guides\n---\nSecond post\n",
        )
        .unwrap();
        (dir, site)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_page() {
        let (_dir, site) = site();
        let (status, body) = get(router(&site), "/blog/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.find("/blog/later").unwrap() < body.rfind("/blog/hello").unwrap());
        assert!(body.contains("<h2>Featured</h2>"));
    }

    #[tokio::test]
    async fn test_post_page() {
        let (_dir, site) = site();
        let (status, body) = get(router(&site), "/blog/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<p>Hello world</p>"));
        assert!(body.contains("By Ana"));
    }

    #[tokio::test]
    async fn test_index_links_reach_posts_with_reserved_characters() {
        let (_dir, site) = site();
        fs::write(
            site.content_dir.join("faq?v2#top.md"),
            "---\ntitle: FAQ\ndate: 2024-03-01\nauthor: Ana\nexcerpt: Answers.\ncategory: Help\n---\nAsked often\n",
        )
        .unwrap();

        let (_, body) = get(router(&site), "/blog/").await;
        assert!(body.contains(r#"href="/blog/faq%3Fv2%23top""#));

        let (status, body) = get(router(&site), "/blog/faq%3Fv2%23top").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<p>Asked often</p>"));
    }

    #[tokio::test]
    async fn test_missing_and_traversal_slugs_are_not_found() {
        let (_dir, site) = site();
        let (status, body) = get(router(&site), "/blog/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Post not found"));

        let (status, _) = get(router(&site), "/blog/..%2F_config").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_home_redirects_to_blog() {
        let (_dir, site) = site();
        let response = router(&site)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/blog/");
    }

    #[tokio::test]
    async fn test_api_posts_and_slugs() {
        let (_dir, site) = site();
        let (status, body) = get(router(&site), "/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        let posts: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(posts[0]["slug"], "later");
        assert_eq!(posts[1]["slug"], "hello");
        assert!(posts[0].get("content").is_none());

        let (_, body) = get(router(&site), "/api/slugs").await;
        let slugs: Vec<String> = serde_json::from_str(&body).unwrap();
        assert_eq!(slugs, vec!["hello", "later"]);
    }

    #[tokio::test]
    async fn test_api_post() {
        let (_dir, site) = site();
        let (status, body) = get(router(&site), "/api/posts/hello").await;
        assert_eq!(status, StatusCode::OK);
        let post: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(post["content"], "<p>Hello world</p>\n");

        let (status, _) = get(router(&site), "/api/posts/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_distinguishes_load_failures() {
        let (_dir, site) = site();
        fs::write(site.content_dir.join("broken.md"), "---\ntitle: Broken\n---\n").unwrap();

        let (status, body) = get(router(&site), "/api/posts").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("missing"));

        // The HTML index degrades to an empty listing instead
        let (status, body) = get(router(&site), "/blog/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No posts yet."));
    }

    #[tokio::test]
    async fn test_nested_root() {
        let (dir, _) = site();
        let mut config = crate::config::SiteConfig::default();
        config.root = "/site/".to_string();
        let site = Site::with_config(dir.path(), config);

        let (status, body) = get(router(&site), "/site/blog/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"href="/site/blog/""#));
    }
}
