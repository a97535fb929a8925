use actix_web::{
    http::StatusCode,
    web::{Data, Json},
    HttpResponse, Responder,
};
use inkgrid_core::SetInputOutcome;

use crate::response::json_error;
use crate::types::{
    HealthResponse, InputRequest, InputResponse, JoinRequest, JoinResponse, LeaveRequest,
};
use crate::AppState;

pub(crate) async fn health(state: Data<AppState>) -> impl Responder {
    let service = state.service.read().await;
    let (rows, cols) = service.board_dims();
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        service: "inkgrid-game-server",
        players: service.player_count(),
        turn_index: service.turn_index(),
        rows,
        cols,
        tick_interval_ms: service.tick_interval_ms(),
        turns_to_restart: service.turns_to_restart(),
    })
}

pub(crate) async fn join(state: Data<AppState>, req: Json<JoinRequest>) -> impl Responder {
    let mut service = state.service.write().await;
    match service.join(req.into_inner().name) {
        Some(admission) => HttpResponse::Ok().json(JoinResponse {
            success: true,
            session_id: admission.session_id,
            player_id: admission.player_id,
            team: admission.team,
            seeded: admission.seeded,
        }),
        None => json_error(StatusCode::CONFLICT, "all player slots are taken"),
    }
}

pub(crate) async fn leave(state: Data<AppState>, req: Json<LeaveRequest>) -> impl Responder {
    let session_id = req.into_inner().session_id;
    let mut service = state.service.write().await;
    match service.leave(&session_id) {
        Some(player_id) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "player_id": player_id,
        })),
        None => json_error(
            StatusCode::NOT_FOUND,
            format!("unknown session: {session_id}"),
        ),
    }
}

/// Late or misaddressed inputs are part of normal operation (network jitter),
/// so everything short of an unknown session answers 200 with an outcome.
pub(crate) async fn input(state: Data<AppState>, req: Json<InputRequest>) -> impl Responder {
    let req = req.into_inner();
    let mut service = state.service.write().await;
    match service.input(&req.session_id, req.direction, req.turn_index) {
        None => json_error(
            StatusCode::NOT_FOUND,
            format!("unknown session: {}", req.session_id),
        ),
        Some(SetInputOutcome::Applied { replayed }) => HttpResponse::Ok().json(InputResponse {
            success: true,
            outcome: "applied",
            replayed: Some(replayed),
        }),
        Some(SetInputOutcome::StaleTurnIndex) => HttpResponse::Ok().json(InputResponse {
            success: true,
            outcome: "ignored_stale_turn",
            replayed: None,
        }),
        Some(SetInputOutcome::UnknownPlayer) => HttpResponse::Ok().json(InputResponse {
            success: true,
            outcome: "ignored_no_painter",
            replayed: None,
        }),
    }
}

pub(crate) async fn state(state: Data<AppState>) -> impl Responder {
    let service = state.service.read().await;
    HttpResponse::Ok().json(service.state())
}

pub(crate) async fn state_raw(state: Data<AppState>) -> impl Responder {
    let service = state.service.read().await;
    HttpResponse::Ok()
        .content_type("application/octet-stream")
        .body(service.raw_state())
}

pub(crate) async fn restart(state: Data<AppState>) -> impl Responder {
    let mut service = state.service.write().await;
    service.restart();
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "turn_index": 0,
    }))
}
