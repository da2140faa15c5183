//! HTTP host adapter: the board commands as a JSON API.
//!
//! Each command runs against the [`Scoreboards`] layer and the outcome is
//! published to the [`InMemorySurface`], which plays the chat channel.
//! Boards are addressed by `/api/boards/{server_id}/{channel_id}/{thread_id}`
//! with `thread_id = 0` for a plain channel.

use crate::logic::{help, Outcome, Reply, Scoreboards};
use crate::models::{BoardError, ContextKey, ErrorKind, MessageRef};
use crate::store::RecordStore;
use crate::surface::{publish, InMemorySurface};
use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path},
    HttpResponse, HttpResponseBuilder, Responder,
};
use serde::Deserialize;

/// Shared state: the command layer plus the message surface it publishes to.
pub struct ApiState {
    pub boards: Scoreboards<Box<dyn RecordStore>>,
    pub surface: InMemorySurface,
}

impl ApiState {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            boards: Scoreboards::new(store),
            surface: InMemorySurface::new(),
        }
    }
}

type AppState = Data<ApiState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segments: server, base channel, thread (0 = none).
#[derive(Deserialize)]
struct BoardPath {
    server_id: u64,
    channel_id: u64,
    thread_id: u64,
}

impl BoardPath {
    fn key(&self) -> ContextKey {
        ContextKey {
            server_id: self.server_id,
            channel_id: self.channel_id,
            thread_id: self.thread_id,
        }
    }
}

#[derive(Deserialize)]
struct StartBody {
    player_a: String,
    player_b: String,
    title: Option<String>,
}

#[derive(Default, Deserialize)]
struct AddBody {
    #[serde(default)]
    a: i64,
    #[serde(default)]
    b: i64,
}

#[derive(Deserialize)]
struct EditBody {
    round_no: i64,
    a: Option<i64>,
    b: Option<i64>,
}

#[derive(Default, Deserialize)]
struct RenameBody {
    player_a: Option<String>,
    player_b: Option<String>,
    title: Option<String>,
}

#[derive(Deserialize)]
struct ZeroStyleBody {
    style: String,
}

fn status_for(kind: ErrorKind) -> HttpResponseBuilder {
    match kind {
        ErrorKind::Validation => HttpResponse::BadRequest(),
        ErrorKind::NotFound => HttpResponse::NotFound(),
        ErrorKind::Conflict => HttpResponse::Conflict(),
        ErrorKind::Persistence => HttpResponse::InternalServerError(),
    }
}

/// Publish a successful outcome and turn the result into a response.
fn respond(state: &ApiState, key: &ContextKey, result: Result<Outcome, BoardError>) -> HttpResponse {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => return status_for(e.kind()).json(Reply::error(&e)),
    };
    match publish(&state.boards, key, &state.surface, &outcome) {
        Ok(message_ref) => HttpResponse::Ok().json(Reply::ok(&outcome).with_message_ref(message_ref)),
        Err(e) => {
            log::error!("{}: board saved but message not updated: {}", key, e);
            let mut reply = Reply::ok(&outcome);
            reply.message = format!("{} (message not updated: {})", outcome.notice, e);
            HttpResponse::BadGateway().json(reply)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "duel-scoreboard",
    })
}

#[get("/api/help")]
async fn api_help() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/markdown; charset=utf-8")
        .body(help())
}

/// Read a published board message (what the channel shows).
#[get("/api/messages/{id}")]
async fn api_get_message(state: AppState, path: Path<u64>) -> HttpResponse {
    match state.surface.get(MessageRef(path.into_inner())) {
        Some(message) => HttpResponse::Ok().json(message),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No message" })),
    }
}

#[post("/api/boards/{server_id}/{channel_id}/{thread_id}/start")]
async fn api_start(state: AppState, path: Path<BoardPath>, body: Json<StartBody>) -> HttpResponse {
    let key = path.key();
    let result = state.boards.start(
        &key,
        &body.player_a,
        &body.player_b,
        body.title.as_deref(),
    );
    respond(&state, &key, result)
}

#[post("/api/boards/{server_id}/{channel_id}/{thread_id}/add")]
async fn api_add(state: AppState, path: Path<BoardPath>, body: Option<Json<AddBody>>) -> HttpResponse {
    let key = path.key();
    let body = body.map(Json::into_inner).unwrap_or_default();
    let result = state.boards.add(&key, body.a, body.b);
    respond(&state, &key, result)
}

#[post("/api/boards/{server_id}/{channel_id}/{thread_id}/edit")]
async fn api_edit(state: AppState, path: Path<BoardPath>, body: Json<EditBody>) -> HttpResponse {
    let key = path.key();
    let result = state.boards.edit(&key, body.round_no, body.a, body.b);
    respond(&state, &key, result)
}

#[post("/api/boards/{server_id}/{channel_id}/{thread_id}/undo")]
async fn api_undo(state: AppState, path: Path<BoardPath>) -> HttpResponse {
    let key = path.key();
    let result = state.boards.undo(&key);
    respond(&state, &key, result)
}

#[post("/api/boards/{server_id}/{channel_id}/{thread_id}/show")]
async fn api_show(state: AppState, path: Path<BoardPath>) -> HttpResponse {
    let key = path.key();
    let result = state.boards.show(&key);
    respond(&state, &key, result)
}

#[post("/api/boards/{server_id}/{channel_id}/{thread_id}/rename")]
async fn api_rename(state: AppState, path: Path<BoardPath>, body: Option<Json<RenameBody>>) -> HttpResponse {
    let key = path.key();
    let body = body.map(Json::into_inner).unwrap_or_default();
    let result = state.boards.rename(
        &key,
        body.player_a.as_deref(),
        body.player_b.as_deref(),
        body.title.as_deref(),
    );
    respond(&state, &key, result)
}

#[post("/api/boards/{server_id}/{channel_id}/{thread_id}/reset")]
async fn api_reset(state: AppState, path: Path<BoardPath>) -> HttpResponse {
    let key = path.key();
    let result = state.boards.reset(&key);
    respond(&state, &key, result)
}

#[post("/api/boards/{server_id}/{channel_id}/{thread_id}/zero_style")]
async fn api_zero_style(state: AppState, path: Path<BoardPath>, body: Json<ZeroStyleBody>) -> HttpResponse {
    let key = path.key();
    let result = state.boards.set_zero_style(&key, &body.style);
    respond(&state, &key, result)
}

#[delete("/api/boards/{server_id}/{channel_id}/{thread_id}")]
async fn api_delete(state: AppState, path: Path<BoardPath>) -> HttpResponse {
    let key = path.key();
    let result = state.boards.delete(&key);
    respond(&state, &key, result)
}

/// Register every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_help)
        .service(api_get_message)
        .service(api_start)
        .service(api_add)
        .service(api_edit)
        .service(api_undo)
        .service(api_show)
        .service(api_rename)
        .service(api_reset)
        .service(api_zero_style)
        .service(api_delete);
}
