use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{error, info, warn};

use crate::{
    app::AppState,
    models::verdict::{CheckLinkRequest, Verdict},
    utils::scan_errors::CheckError,
};

/// Check a link
/// POST /check-link
///
/// Always answers with `{ "verdict": ... }`: 400 when `url` is absent, null or empty, 200 otherwise.
pub async fn check_link(
    State(state): State<AppState>,
    payload: Result<Json<CheckLinkRequest>, JsonRejection>,
) -> Verdict {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Unreadable check-link body: {}", rejection.body_text());
            CheckLinkRequest::default()
        },
    };

    let url = match request.url_text() {
        Ok(url) => url.map(str::to_owned),
        Err(e) => {
            info!("Rejected link check input: {}", e);
            return CheckError::from(e).verdict();
        },
    };

    // Detached from the request future; panics come back as JoinError
    let checker = state.link_checker.clone();
    let scan = tokio::spawn(async move { checker.check(url.as_deref()).await });

    match scan.await {
        Ok(verdict) => verdict,
        Err(join_error) => {
            let err = CheckError::Unexpected(join_error.to_string());
            error!("Unexpected server error: {}", err);
            err.verdict()
        },
    }
}
