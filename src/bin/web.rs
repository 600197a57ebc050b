//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (snapshot
//! directory, default ./data).

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use interclass_tournament_web::storage::{self, SnapshotStore, KEY_ADMIN_USER};
use interclass_tournament_web::{
    coerce_score, compute_ranking, generate_bracket, record_result, reset_bracket, RankedTeam,
    Tournament,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::RwLock;
use uuid::Uuid;

/// Shared app state: the in-memory tournament plus the snapshot store.
/// All core operations run under the write lock and the full snapshot is
/// saved before the lock is released, so the persisted stores always hold
/// one consistent generation.
struct AppContext {
    tournament: RwLock<Tournament>,
    store: SnapshotStore,
}

type AppState = Data<AppContext>;

/// Session key holding the logged-in organizer's email.
const SESSION_ADMIN_KEY: &str = "admin_email";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Registered organizer account, persisted via the snapshot store.
#[derive(Clone, Serialize, Deserialize)]
struct AdminUser {
    email: String,
    password_hash: String,
}

#[derive(Deserialize)]
struct AdminCredentialsBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    #[serde(default)]
    coach: String,
    #[serde(default)]
    participants: Vec<String>,
}

/// Scores arrive as raw JSON values (number, numeric string, or junk) and
/// are coerced server-side; malformed input counts as zero.
#[derive(Deserialize)]
struct RecordResultBody {
    #[serde(default)]
    score_a: serde_json::Value,
    #[serde(default)]
    score_b: serde_json::Value,
}

/// Path segment: team id (e.g. /api/teams/{team_id})
#[derive(Deserialize)]
struct TeamPath {
    team_id: Uuid,
}

/// Path segment: match id (e.g. /api/matches/{match_id}/result)
#[derive(Deserialize)]
struct MatchPath {
    match_id: Uuid,
}

fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Mutating endpoints require a logged-in organizer; reads are public.
fn require_admin(session: &Session) -> Result<(), HttpResponse> {
    match session.get::<String>(SESSION_ADMIN_KEY) {
        Ok(Some(_)) => Ok(()),
        _ => Err(HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Organizer login required" }))),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "interclass-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Full public snapshot: roster, bracket, results (spectator view).
#[get("/api/state")]
async fn api_state(state: AppState) -> HttpResponse {
    let g = match state.tournament.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&*g)
}

/// Register the organizer account (email + password). Overwrites any
/// previously registered organizer, mirroring the single-organizer model.
#[post("/api/admin/register")]
async fn api_admin_register(state: AppState, body: Json<AdminCredentialsBody>) -> HttpResponse {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') || body.password.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Valid email and password required" }));
    }
    let user = AdminUser {
        email,
        password_hash: hash_password(&body.password),
    };
    state.store.save(KEY_ADMIN_USER, &Some(user.clone()));
    log::info!("Registered organizer {}", user.email);
    HttpResponse::Ok().json(serde_json::json!({ "registered": true }))
}

/// Log in as the organizer; on success the session cookie carries the email.
#[post("/api/admin/login")]
async fn api_admin_login(
    state: AppState,
    session: Session,
    body: Json<AdminCredentialsBody>,
) -> HttpResponse {
    let email = body.email.trim().to_lowercase();
    let stored: Option<AdminUser> = state.store.load(KEY_ADMIN_USER, None);
    let user = match stored {
        Some(u) if u.email == email => u,
        _ => {
            return HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Organizer not found" }))
        }
    };
    if hash_password(&body.password) != user.password_hash {
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Wrong password" }));
    }
    if session.insert(SESSION_ADMIN_KEY, &user.email).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    HttpResponse::Ok().json(serde_json::json!({ "logged_in": true, "email": user.email }))
}

#[post("/api/admin/logout")]
async fn api_admin_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "logged_in": false }))
}

/// Session introspection: whether an organizer is logged in, and who.
#[get("/api/admin/session")]
async fn api_admin_session(session: Session) -> HttpResponse {
    match session.get::<String>(SESSION_ADMIN_KEY) {
        Ok(Some(email)) => {
            HttpResponse::Ok().json(serde_json::json!({ "logged_in": true, "email": email }))
        }
        _ => HttpResponse::Ok().json(serde_json::json!({ "logged_in": false })),
    }
}

/// Register a team (organizer only; roster must not be locked by a bracket).
#[post("/api/teams")]
async fn api_add_team(state: AppState, session: Session, body: Json<AddTeamBody>) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.tournament.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let body = body.into_inner();
    match g.add_team(body.name, body.coach, body.participants) {
        Ok(_) => {
            storage::save_tournament(&state.store, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a team by id (organizer only; rejected while a bracket exists).
#[delete("/api/teams/{team_id}")]
async fn api_remove_team(state: AppState, session: Session, path: Path<TeamPath>) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.tournament.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove_team(path.team_id) {
        Ok(()) => {
            storage::save_tournament(&state.store, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Generate the elimination bracket from the current roster (organizer only).
/// Replaces any previous bracket and clears all results with it.
#[post("/api/bracket/generate")]
async fn api_generate_bracket(state: AppState, session: Session) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.tournament.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match generate_bracket(&mut g, &mut rand::thread_rng()) {
        Ok(()) => {
            storage::save_tournament(&state.store, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Clear the bracket and all results (organizer only).
#[post("/api/bracket/reset")]
async fn api_reset_bracket(state: AppState, session: Session) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.tournament.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    reset_bracket(&mut g);
    storage::save_tournament(&state.store, &g);
    HttpResponse::Ok().json(&*g)
}

/// Record a match result and advance the winner (organizer only).
#[put("/api/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    session: Session,
    path: Path<MatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.tournament.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let score_a = coerce_score(&body.score_a);
    let score_b = coerce_score(&body.score_b);
    match record_result(&mut g, path.match_id, score_a, score_b) {
        Ok(()) => {
            storage::save_tournament(&state.store, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Current ranking, recomputed from scratch on every request. The derived
/// stats are written back onto the roster and persisted.
#[get("/api/ranking")]
async fn api_ranking(state: AppState) -> HttpResponse {
    let mut g = match state.tournament.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let rows = compute_ranking(&mut g);
    storage::save_tournament(&state.store, &g);
    HttpResponse::Ok().json(rows)
}

/// Download the current ranking as CSV.
#[get("/api/export/ranking.csv")]
async fn api_export_ranking(state: AppState) -> HttpResponse {
    let rows = {
        let mut g = match state.tournament.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        let rows = compute_ranking(&mut g);
        storage::save_tournament(&state.store, &g);
        rows
    };
    match ranking_csv(&rows) {
        Ok(data) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"ranking.csv\""))
            .body(data),
        Err(e) => {
            log::error!("CSV export failed: {e}");
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

fn ranking_csv(rows: &[RankedTeam]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["rank", "name", "coach", "wins", "losses", "points"])?;
    for row in rows {
        wtr.write_record([
            row.rank.to_string(),
            row.team.name.clone(),
            row.team.coach.clone(),
            row.team.wins.to_string(),
            row.team.losses.to_string(),
            row.team.points.to_string(),
        ])?;
    }
    Ok(wtr.into_inner()?)
}

/// Force a full snapshot save (the organizer's manual sync button).
#[post("/api/sync")]
async fn api_sync(state: AppState, session: Session) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let g = match state.tournament.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    storage::save_tournament(&state.store, &g);
    HttpResponse::Ok().json(serde_json::json!({ "synced": true }))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

    let store = SnapshotStore::open(&data_dir)?;
    let tournament = storage::load_tournament(&store);
    log::info!(
        "Loaded snapshot from {}: {} team(s), bracket {}",
        data_dir,
        tournament.teams.len(),
        if tournament.bracket.is_some() { "present" } else { "absent" }
    );

    let state = Data::new(AppContext {
        tournament: RwLock::new(tournament),
        store,
    });
    // Cookie signing key is regenerated per boot; organizer sessions do not
    // survive a restart.
    let session_key = Key::generate();

    log::info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_state)
            .service(api_admin_register)
            .service(api_admin_login)
            .service(api_admin_logout)
            .service(api_admin_session)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_generate_bracket)
            .service(api_reset_bracket)
            .service(api_record_result)
            .service(api_ranking)
            .service(api_export_ranking)
            .service(api_sync)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
