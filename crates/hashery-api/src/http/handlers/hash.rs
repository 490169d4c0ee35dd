//! Hash submission and retrieval handlers.
//!
//! POST /hash      - Submit a secret (form field `password`)
//! GET  /hash/{id} - Fetch a completed digest

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tokio::time::Instant;

use hashery_types::config::SubmitMode;
use hashery_types::entry::EntryId;
use hashery_types::error::HashError;

use crate::http::error::AppError;
use crate::http::extractors::password::PasswordForm;
use crate::state::AppState;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// POST /hash - Reserve an identifier and schedule the digest.
///
/// The minimum delay is measured from the moment the request reached this
/// handler, before the body is read. What the caller receives depends on the
/// configured mode:
/// - deferred: the identifier, immediately
/// - blocking: the digest, once the window has passed
/// - streaming: the identifier line at once, then the digest on the same body
pub async fn submit_hash(State(state): State<AppState>, req: Request) -> Result<Response, AppError> {
    let submitted_at = Instant::now();
    let PasswordForm(secret) = PasswordForm::from_request(req, &state).await?;
    let completion = state.hash_service.submit(&secret, submitted_at)?;
    drop(secret);
    let id = completion.id();

    tracing::info!(%id, mode = %state.mode, "hash submitted");

    match state.mode {
        SubmitMode::Deferred => Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], id.to_string()).into_response()),
        SubmitMode::Blocking => {
            let digest = completion.wait().await?;
            Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], digest).into_response())
        }
        SubmitMode::Streaming => {
            let body = async_stream::stream! {
                yield Ok::<_, Infallible>(format!("{id}\n"));
                match completion.wait().await {
                    Ok(digest) => yield Ok(digest),
                    Err(e) => tracing::warn!(%id, error = %e, "streamed digest never arrived"),
                }
            };
            Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], Body::from_stream(body)).into_response())
        }
    }
}

/// GET /hash/{id} - Digest for a completed submission.
///
/// Unknown, pending, and non-numeric identifiers all answer 404.
pub async fn get_hash(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id: EntryId = raw_id.parse().map_err(|_| HashError::NotFound)?;
    let digest = state.hash_service.retrieve(id)?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], digest).into_response())
}
