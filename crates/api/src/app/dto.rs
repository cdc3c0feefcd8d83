use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use inkpost_core::{Blog, BlogDraft, BlogId};

use crate::app::errors;

// -------------------------
// Request parsing
// -------------------------

/// Unwrap a JSON body, mapping rejections to the API error shape.
pub fn draft_from_body(
    body: Result<axum::Json<BlogDraft>, JsonRejection>,
) -> Result<BlogDraft, axum::response::Response> {
    match body {
        Ok(axum::Json(draft)) => Ok(draft),
        Err(rejection) => Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_body",
            rejection.body_text(),
        )),
    }
}

pub fn parse_blog_id(raw: &str) -> Result<BlogId, axum::response::Response> {
    raw.parse::<BlogId>().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            format!("invalid ID: {raw}"),
        )
    })
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn blog_to_json(blog: Blog) -> serde_json::Value {
    serde_json::json!({
        "id": blog.id.as_i64(),
        "author": blog.author,
        "title": blog.title,
        "content": blog.content,
        "image": blog.image,
        "ctime": blog.ctime.to_rfc3339(),
    })
}
