use std::io::ErrorKind;
use std::path::Path;

use askama::Template;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::{
        HeaderMap, HeaderValue, StatusCode, Uri,
        header::{CONTENT_TYPE, LOCATION, SET_COOKIE},
    },
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::KioskConfig;
use crate::constants::http::CODE_PARAM;
use crate::kiosk::{ButtonGrid, CaptureScreen, View};
use crate::session::{Record, SessionAccess, SessionId};

use super::error::AppError;
use super::pages::{CapturePage, HomePage};
use super::request::{first_param, session_cookie, session_cookie_header};
use super::SharedState;

#[derive(Debug, Deserialize)]
pub struct CaptureForm {
    #[serde(default)]
    code: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    code: Option<String>,
    records: Vec<Record>,
}

/// `GET /`: Home without a code, Capture for `?code=<code>`.
/// A Home render only updates an existing session; it never creates one.
pub async fn index(
    State(state): State<SharedState>,
    headers: HeaderMap,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let cookie = session_cookie(&headers);
    let detected = state.origin_for(&headers, &uri);
    let title = state.config.general.title.as_str();
    let show_logo = logo_available(&state.config).await;

    let code = match View::from_code_param(first_param(&params, CODE_PARAM)) {
        View::Home => {
            let origin = state
                .sessions
                .with_existing(cookie, |session| {
                    session.enter(None);
                    session.origin_or_detect(|| detected.clone()).to_string()
                })?
                .unwrap_or(detected);
            debug!(session = ?cookie, "Rendering home");

            let grid = ButtonGrid::build(&state.config, &origin)?;
            debug!(buttons = grid.button_count(), rows = grid.rows.len(), "Built button grid");
            let html = HomePage {
                title,
                show_logo,
                style_rules: grid.style_rules(),
                grid: &grid,
            }
            .render()?;
            return Ok(Html(html).into_response());
        }
        View::Capture { code } => code,
    };

    let SessionAccess {
        id,
        created,
        output: records,
    } = state.sessions.with_session(cookie, |session| {
        session.enter(Some(code.as_str()));
        session.origin_or_detect(|| detected);
        session.records().to_vec()
    })?;
    debug!(session = %id, code = %code, "Rendering capture");

    let screen = CaptureScreen::build(&state.config, &code, &records);
    let html = CapturePage {
        title,
        show_logo,
        screen: &screen,
    }
    .render()?;

    with_cookie(Html(html).into_response(), id, created)
}

/// `POST /capture`: append the submitted value under `code`, then reload
/// the capture view
pub async fn capture(
    State(state): State<SharedState>,
    headers: HeaderMap,
    uri: Uri,
    Form(form): Form<CaptureForm>,
) -> Result<Response, AppError> {
    let detected = state.origin_for(&headers, &uri);

    let SessionAccess {
        id,
        created,
        output: (view, appended, count, origin),
    } = state
        .sessions
        .with_session(session_cookie(&headers), |session| {
            let view = session.enter(Some(form.code.as_str()));
            let appended = session.submit(&form.value).is_some();
            let count = session.records().len();
            let origin = session.origin_or_detect(|| detected).to_string();
            (view, appended, count, origin)
        })?;

    if appended {
        debug!(session = %id, code = %form.code, count, "Recorded value");
    } else {
        debug!(session = %id, view = ?view, "Ignored submission");
    }

    let response = see_other(&view.href(&origin))?;
    with_cookie(response, id, created)
}

/// `POST /back`: discard the record list and return Home
pub async fn go_back(
    State(state): State<SharedState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    let detected = state.origin_for(&headers, &uri);

    let SessionAccess {
        id,
        created,
        output: (code, discarded, origin),
    } = state
        .sessions
        .with_session(session_cookie(&headers), |session| {
            let code = session.view().code().map(str::to_string);
            let discarded = session.records().len();
            session.go_back();
            let origin = session.origin_or_detect(|| detected).to_string();
            (code, discarded, origin)
        })?;
    info!(session = %id, code = ?code, discarded, "Returned to home");

    let response = see_other(&View::Home.href(&origin))?;
    with_cookie(response, id, created)
}

/// `GET /logo`: the configured logo file, 404 when unset or missing
pub async fn logo(State(state): State<SharedState>) -> Result<Response, AppError> {
    let Some(path) = &state.config.general.logo else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(([(CONTENT_TYPE, content_type_for(path))], bytes).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "Logo file not found");
            Ok(StatusCode::NOT_FOUND.into_response())
        }
        Err(e) => Err(AppError::Logo(e)),
    }
}

/// `GET /api/records`: the calling session's records. Never creates a session.
pub async fn records(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<RecordsResponse>, AppError> {
    let snapshot = match session_cookie(&headers) {
        Some(id) => state.sessions.peek(id, |session| {
            (
                session.view().code().map(str::to_string),
                session.records().to_vec(),
            )
        })?,
        None => None,
    };
    let (code, records) = snapshot.unwrap_or_default();

    Ok(Json(RecordsResponse { code, records }))
}

pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "buttons": state.config.buttons.len(),
        "sessions": state.sessions.len(),
    }))
}

fn see_other(location: &str) -> Result<Response, AppError> {
    let location = HeaderValue::try_from(location)?;
    Ok((StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response())
}

fn with_cookie(mut response: Response, id: SessionId, created: bool) -> Result<Response, AppError> {
    if created {
        response
            .headers_mut()
            .insert(SET_COOKIE, session_cookie_header(id)?);
    }
    Ok(response)
}

async fn logo_available(config: &KioskConfig) -> bool {
    match &config.general.logo {
        Some(path) => tokio::fs::metadata(path).await.is_ok_and(|m| m.is_file()),
        None => false,
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
