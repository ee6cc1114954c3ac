//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints: creating a draw
//! session, selecting spread slots, requesting a reading, and resetting.

use crate::web::i18n;
use crate::web::protocol::{
    DrawStateResponse, ReadingPayload, ReadingResponse, SelectSlotPayload,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;
use tarot_core::build_request;
use tarot_core::session::DrawSession;
use tracing::info;
use uuid::Uuid;

/// Start a new draw session over a freshly shuffled deck.
pub async fn create_draw_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let draw_id = Uuid::new_v4();
    let session = DrawSession::new();
    let response = DrawStateResponse::from_session(draw_id, &session, i18n::DEFAULT_LOCALE);

    app_state.draws.lock().await.insert(draw_id, session);
    info!(%draw_id, "draw session created");
    (StatusCode::CREATED, Json(response))
}

/// Apply one slot selection to a draw session.
///
/// Re-clicking a consumed slot, or clicking once the spread is complete, is
/// accepted and changes nothing; the response simply reports the current
/// state.
pub async fn select_slot_handler(
    State(app_state): State<Arc<AppState>>,
    Path(draw_id): Path<Uuid>,
    Json(payload): Json<SelectSlotPayload>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut draws = app_state.draws.lock().await;
    let session = draws
        .get_mut(&draw_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Unknown draw session".to_string()))?;

    session.select_slot(payload.slot);
    Ok(Json(DrawStateResponse::from_session(
        draw_id,
        session,
        payload.locale,
    )))
}

/// Generate the reading for a completed draw.
///
/// The request is assembled and validated while the session lock is held,
/// then the long-latency generation call is awaited without it so other
/// sessions stay responsive.
pub async fn reading_handler(
    State(app_state): State<Arc<AppState>>,
    Path(draw_id): Path<Uuid>,
    Json(payload): Json<ReadingPayload>,
) -> Result<Json<ReadingResponse>, (StatusCode, String)> {
    let request = {
        let draws = app_state.draws.lock().await;
        let session = draws
            .get(&draw_id)
            .ok_or_else(|| (StatusCode::NOT_FOUND, "Unknown draw session".to_string()))?;
        if !session.is_complete() {
            return Err((
                StatusCode::CONFLICT,
                "The spread is not complete yet".to_string(),
            ));
        }

        let locale = payload.locale;
        build_request(
            &payload.question,
            session.drawn_cards(),
            i18n::spread_labels(locale),
            payload.profile,
            locale,
            i18n::language_name(locale),
        )
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?
    };

    let result = app_state.reading_adapter.generate(&request).await;
    Ok(Json(ReadingResponse::from(result)))
}

/// Discard a session's state and reshuffle a brand-new deck.
pub async fn reset_draw_handler(
    State(app_state): State<Arc<AppState>>,
    Path(draw_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut draws = app_state.draws.lock().await;
    let session = draws
        .get_mut(&draw_id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Unknown draw session".to_string()))?;

    session.reset(&mut rand::thread_rng());
    info!(%draw_id, "draw session reset");
    Ok(Json(DrawStateResponse::from_session(
        draw_id,
        session,
        i18n::DEFAULT_LOCALE,
    )))
}
