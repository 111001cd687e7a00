use axum::{
    body::Body,
    http::{HeaderMap, header},
    response::Response,
};

cfg_if::cfg_if! {
    if #[cfg(not(debug_assertions))] {
        use std::sync::LazyLock;

        static MINIFY_CFG: LazyLock<minify_html::Cfg> = LazyLock::new(|| minify_html::Cfg {
            keep_closing_tags: true,
            keep_html_and_head_opening_tags: true,
            minify_doctype: false,
            minify_css: true,
            ..Default::default()
        });

        async fn minify(response: Response<Body>) -> Response<Body> {
            let (mut parts, body) = response.into_parts();
            let Ok(bytes) = axum::body::to_bytes(body, usize::MAX).await else {
                tracing::warn!("failed to buffer html body for minification");
                return Response::from_parts(parts, Body::empty());
            };

            parts.headers.remove(header::CONTENT_LENGTH);

            Response::from_parts(parts, Body::from(minify_html::minify(&bytes, &MINIFY_CFG)))
        }
    } else {
        async fn minify(response: Response<Body>) -> Response<Body> {
            response
        }
    }
}

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"))
}

/// Minifies rendered pages in release builds, other responses pass through.
pub async fn minify_html_middleware(response: Response<Body>) -> Response<Body> {
    if !is_html(response.headers()) {
        return response;
    }

    minify(response).await
}
