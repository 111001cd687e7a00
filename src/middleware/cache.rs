use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
    middleware::Next,
};

/// Embedded assets may be cached for a year; pages and the JSON API never,
/// since every response reflects the live session.
pub async fn cache_control_middleware(req: Request<Body>, next: Next) -> Response<Body> {
    let is_static_file = req.uri().path().starts_with("/static/");
    let mut response = next.run(req).await;
    let ok = response.status().is_success();

    let headers = response.headers_mut();

    if is_static_file && ok {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=31536000, immutable"),
        );
    } else {
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, proxy-revalidate"),
        );
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/static/app.css", get(|| async { "body {}" }))
            .route("/", get(|| async { "page" }))
            .layer(axum::middleware::from_fn(cache_control_middleware))
    }

    async fn cache_control(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let value = response.headers()[header::CACHE_CONTROL]
            .to_str()
            .unwrap()
            .to_owned();

        (response.status(), value)
    }

    #[tokio::test]
    async fn static_files_are_immutable() {
        let (status, value) = cache_control("/static/app.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, "public, max-age=31536000, immutable");
    }

    #[tokio::test]
    async fn pages_and_missing_assets_are_not_stored() {
        let (_, value) = cache_control("/").await;
        assert!(value.starts_with("no-store"));

        let (status, value) = cache_control("/static/missing.js").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(value.starts_with("no-store"));
    }
}
