//! Generic document handlers, mounted once per document kind.
//!
//! Absence is not an error on these routes: point reads, updates and
//! deletes of a missing id answer `204 No Content`.

use axum::Json;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use validator::Validate;

use docbase_core::error::AppError;
use docbase_database::DocumentRepository;
use docbase_entity::DocumentPayload;

use crate::CONTINUATION_HEADER;
use crate::dto::PageQuery;
use crate::error::ApiError;
use crate::extractors::{Author, ContinuationHeader, IfMatch, ValidatedDocument};

/// Characters escaped when an id becomes a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn header_value(raw: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(raw)
        .map_err(|e| ApiError::from(AppError::internal(format!("Invalid header value: {e}"))))
}

/// GET /api/{kind}
pub async fn list<T: DocumentPayload>(
    State(repo): State<DocumentRepository<T>>,
    ContinuationHeader(continuation): ContinuationHeader,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    let sort = query.sort_spec()?;
    let page = repo
        .get_page(&sort, continuation.as_ref(), query.page_size)
        .await?;

    if page.items.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let mut headers = HeaderMap::new();
    if let Some(token) = &page.continuation {
        headers.insert(
            HeaderName::from_static(CONTINUATION_HEADER),
            header_value(token.as_str())?,
        );
    }
    Ok((headers, Json(page.items)).into_response())
}

/// GET /api/{kind}/{id}
pub async fn get<T: DocumentPayload>(
    State(repo): State<DocumentRepository<T>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(match repo.get_by_id(&id).await? {
        Some(document) => Json(document).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// POST /api/{kind}
pub async fn create<T: DocumentPayload + Validate>(
    State(repo): State<DocumentRepository<T>>,
    OriginalUri(uri): OriginalUri,
    Author(author): Author,
    ValidatedDocument(draft): ValidatedDocument<T>,
) -> Result<Response, ApiError> {
    let document = repo.add(draft, author).await?;
    let location = format!(
        "{}/{}",
        uri.path().trim_end_matches('/'),
        utf8_percent_encode(&document.id, PATH_SEGMENT)
    );
    Ok((
        StatusCode::CREATED,
        [(LOCATION, header_value(&location)?)],
        Json(document),
    )
        .into_response())
}

/// PATCH /api/{kind}
///
/// The `If-Match` header, when present, takes precedence over the body's
/// `_etag`.
pub async fn update<T: DocumentPayload + Validate>(
    State(repo): State<DocumentRepository<T>>,
    IfMatch(if_match): IfMatch,
    ValidatedDocument(mut document): ValidatedDocument<T>,
) -> Result<Response, ApiError> {
    if if_match.is_some() {
        document.etag = if_match;
    }
    Ok(match repo.update(document).await? {
        Some(document) => Json(document).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// DELETE /api/{kind}/{id}
pub async fn delete<T: DocumentPayload>(
    State(repo): State<DocumentRepository<T>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    Ok(if repo.delete(&id).await? {
        StatusCode::OK
    } else {
        StatusCode::NO_CONTENT
    })
}
