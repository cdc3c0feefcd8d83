use axum::{
    Router,
    routing::{get, post, put},
};

use crate::app::API_PREFIX;
use crate::middleware::{self, AuthState};

pub mod blogs;
pub mod system;

/// Blog routes under `/api/v1`; writes pass through the auth guard.
pub fn router(auth_state: AuthState) -> Router {
    let collection = [API_PREFIX.to_string(), format!("{API_PREFIX}/")];
    let item = format!("{API_PREFIX}/:id");

    let mut public = Router::new().route(&item, get(blogs::read_blog_by_id));
    let mut protected =
        Router::new().route(&item, put(blogs::update_blog).delete(blogs::delete_blog));
    for path in &collection {
        public = public.route(path, get(blogs::read_blogs).options(blogs::options));
        protected = protected.route(path, post(blogs::create_blog));
    }

    let protected = protected.route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    public.merge(protected)
}
