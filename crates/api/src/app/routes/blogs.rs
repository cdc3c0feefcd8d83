use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use inkpost_core::BlogDraft;

use crate::app::{AppServices, dto, errors};
use crate::context::AuthContext;

pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

pub async fn create_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    body: Result<Json<BlogDraft>, JsonRejection>,
) -> axum::response::Response {
    let draft = match dto::draft_from_body(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    match services.blogs.create(draft).await {
        Ok(blog) => {
            tracing::info!(id = %blog.id, mechanism = auth.mechanism(), "blog record created");
            (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "message": "Successfully injected new blog record",
                    "data": dto::blog_to_json(blog),
                })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn read_blogs(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let blogs = match services.blogs.list().await {
        Ok(b) => b,
        Err(e) => return errors::store_error_to_response(e),
    };

    if blogs.is_empty() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "no records found!");
    }

    let data = blogs.into_iter().map(dto::blog_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "data": data }))).into_response()
}

pub async fn read_blog_by_id(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_blog_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.blogs.get(id).await {
        Ok(Some(blog)) => {
            let body = serde_json::json!({ "data": dto::blog_to_json(blog) });
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("no records found for {id}"),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
    body: Result<Json<BlogDraft>, JsonRejection>,
) -> axum::response::Response {
    let id = match dto::parse_blog_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let draft = match dto::draft_from_body(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    match services.blogs.update(id, draft).await {
        Ok(blog) => {
            tracing::info!(id = %id, mechanism = auth.mechanism(), "blog record updated");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": format!("successfully updated {id}"),
                    "data": dto::blog_to_json(blog),
                })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_blog(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match dto::parse_blog_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.blogs.delete(id).await {
        Ok(()) => {
            tracing::info!(id = %id, mechanism = auth.mechanism(), "blog record deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "message": format!("successfully deleted record {id}") })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

/// CORS preflight / capability discovery for the collection.
pub async fn options(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let allow_headers = format!(
        "Content-Type, {}",
        canonical_header_case(services.auth_header.as_str())
    );

    let mut resp = StatusCode::OK.into_response();
    let headers = resp.headers_mut();
    headers.insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    if let Ok(v) = HeaderValue::from_str(&allow_headers) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, v);
    }
    if let Ok(v) = HeaderValue::from_str(&services.cors_origin) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, v);
    }
    resp
}

/// `x-auth-token` -> `X-Auth-Token`; header names are stored lowercased.
fn canonical_header_case(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_are_title_cased_per_segment() {
        assert_eq!(canonical_header_case("x-auth-token"), "X-Auth-Token");
        assert_eq!(canonical_header_case("authorization"), "Authorization");
    }
}
