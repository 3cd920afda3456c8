//! Route definitions.

use axum::Router;
use axum::routing::get;
use validator::Validate;

use docbase_database::DocumentRepository;
use docbase_entity::DocumentPayload;

use crate::handlers::{documents, health};
use crate::state::AppState;

/// Builds the `/api` router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(health::health))
        .nest("/users", document_routes(state.users.clone()))
        .with_state(state);

    Router::new().nest("/api", api)
}

/// CRUD and paging routes over one document kind.
pub fn document_routes<T, S>(repo: DocumentRepository<T>) -> Router<S>
where
    T: DocumentPayload + Validate,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(documents::list::<T>)
                .post(documents::create::<T>)
                .patch(documents::update::<T>),
        )
        .route(
            "/{id}",
            get(documents::get::<T>).delete(documents::delete::<T>),
        )
        .with_state(repo)
}
