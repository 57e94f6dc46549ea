//! Single binary web server: bracket API via REST, static front end from /static.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set STATE_FILE to persist workspaces across restarts.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use dart_bracket_web::{
    increment_leg, legs_from_f64, quick_set_winner, reset_tournament_winners, storage,
    update_legs, PlayerId, ServerConfig, Side, TournamentError, Workspace, WorkspaceId,
    DEFAULT_BEST_OF,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-workspace entry: workspace data + last activity time (for auto-cleanup).
struct WorkspaceEntry {
    workspace: Workspace,
    last_activity: Instant,
}

impl WorkspaceEntry {
    fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            last_activity: Instant::now(),
        }
    }
}

/// In-memory state: workspaces by id, plus whether anything changed since the last save.
#[derive(Default)]
struct Workspaces {
    entries: HashMap<WorkspaceId, WorkspaceEntry>,
    dirty: bool,
}

type AppState = Data<RwLock<Workspaces>>;

/// Inactivity threshold: workspaces not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

const SAVE_INTERVAL: Duration = Duration::from_secs(10);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateWorkspaceBody {
    #[serde(default = "default_best_of")]
    best_of: u32,
    #[serde(default)]
    players: Vec<String>,
}

fn default_best_of() -> u32 {
    DEFAULT_BEST_OF
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct BestOfBody {
    best_of: u32,
}

#[derive(Deserialize)]
struct SetLegsBody {
    round_index: usize,
    match_index: usize,
    legs_a: f64,
    legs_b: f64,
}

#[derive(Deserialize)]
struct IncrementLegBody {
    round_index: usize,
    match_index: usize,
    side: Side,
    delta: i64,
}

#[derive(Deserialize)]
struct QuickWinnerBody {
    round_index: usize,
    match_index: usize,
    winner: Side,
}

/// Path segment: workspace id (e.g. /api/workspaces/{id})
#[derive(Deserialize)]
struct WorkspacePath {
    id: WorkspaceId,
}

/// Path segments: workspace id and player id.
#[derive(Deserialize)]
struct WorkspacePlayerPath {
    id: WorkspaceId,
    player_id: PlayerId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `f` against one workspace under the write lock and respond with the updated
/// workspace. Touching a workspace refreshes its last_activity.
fn with_workspace<F>(state: &AppState, id: WorkspaceId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Workspace) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.entries.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No workspace" })),
    };
    entry.last_activity = Instant::now();
    match f(&mut entry.workspace) {
        Ok(()) => {
            let response = HttpResponse::Ok().json(&entry.workspace);
            g.dirty = true;
            response
        }
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "dart-bracket-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new workspace (returns it with id; client stores id for subsequent requests).
#[post("/api/workspaces")]
async fn api_create_workspace(state: AppState, body: Option<Json<CreateWorkspaceBody>>) -> HttpResponse {
    let (best_of, names) = match body {
        Some(b) => {
            let b = b.into_inner();
            (b.best_of, b.players)
        }
        None => (default_best_of(), Vec::new()),
    };
    let mut workspace = match Workspace::new(best_of) {
        Ok(w) => w,
        Err(e) => return error_response(&e),
    };
    for name in names {
        if let Err(e) = workspace.add_player(name) {
            return error_response(&e);
        }
    }

    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&workspace);
    log::info!("Created workspace {}", workspace.id);
    g.entries.insert(workspace.id, WorkspaceEntry::new(workspace));
    g.dirty = true;
    response
}

/// Get a workspace by id (404 if not found).
#[get("/api/workspaces/{id}")]
async fn api_get_workspace(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.entries.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.workspace)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No workspace" })),
    }
}

/// Drop roster and tournament, restore default best-of.
#[post("/api/workspaces/{id}/clear")]
async fn api_clear_workspace(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    with_workspace(&state, path.id, |w| {
        w.clear();
        Ok(())
    })
}

/// Add a player (roster must not be locked by a tournament).
#[post("/api/workspaces/{id}/players")]
async fn api_add_player(state: AppState, path: Path<WorkspacePath>, body: Json<AddPlayerBody>) -> HttpResponse {
    with_workspace(&state, path.id, |w| w.add_player(body.name.as_str()).map(|_| ()))
}

/// Import players from a CSV body (one name per row, first column).
#[post("/api/workspaces/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<WorkspacePath>, body: String) -> HttpResponse {
    with_workspace(&state, path.id, |w| w.import_players_csv(body.as_bytes()).map(|_| ()))
}

/// Remove a player by id.
#[delete("/api/workspaces/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<WorkspacePlayerPath>) -> HttpResponse {
    with_workspace(&state, path.id, |w| w.remove_player(path.player_id))
}

/// Set best-of for the next generated bracket.
#[put("/api/workspaces/{id}/best-of")]
async fn api_set_best_of(state: AppState, path: Path<WorkspacePath>, body: Json<BestOfBody>) -> HttpResponse {
    with_workspace(&state, path.id, |w| w.set_best_of(body.best_of))
}

/// Generate (or re-shuffle) the bracket from the roster.
#[post("/api/workspaces/{id}/tournament")]
async fn api_generate_tournament(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    with_workspace(&state, path.id, |w| w.generate().map(|_| ()))
}

/// Set both leg counts of one match.
#[put("/api/workspaces/{id}/tournament/legs")]
async fn api_set_legs(state: AppState, path: Path<WorkspacePath>, body: Json<SetLegsBody>) -> HttpResponse {
    let legs_a = legs_from_f64(body.legs_a);
    let legs_b = legs_from_f64(body.legs_b);
    with_workspace(&state, path.id, |w| {
        w.update_tournament(|t| update_legs(t, body.round_index, body.match_index, legs_a, legs_b))
            .map(|_| ())
    })
}

/// Add or remove one leg for one side.
#[post("/api/workspaces/{id}/tournament/legs/increment")]
async fn api_increment_leg(
    state: AppState,
    path: Path<WorkspacePath>,
    body: Json<IncrementLegBody>,
) -> HttpResponse {
    let delta = body.delta.signum();
    with_workspace(&state, path.id, |w| {
        w.update_tournament(|t| increment_leg(t, body.round_index, body.match_index, body.side, delta))
            .map(|_| ())
    })
}

/// Declare a match winner without tracking every leg.
#[put("/api/workspaces/{id}/tournament/winner")]
async fn api_quick_winner(
    state: AppState,
    path: Path<WorkspacePath>,
    body: Json<QuickWinnerBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |w| {
        w.update_tournament(|t| quick_set_winner(t, body.round_index, body.match_index, body.winner))
            .map(|_| ())
    })
}

/// Reset all winners and legs, keeping the seeding.
#[post("/api/workspaces/{id}/tournament/reset")]
async fn api_reset_tournament(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    with_workspace(&state, path.id, |w| w.update_tournament(reset_tournament_winners).map(|_| ()))
}

fn load_state(state_file: Option<&PathBuf>) -> Workspaces {
    let mut workspaces = Workspaces::default();
    let Some(path) = state_file else {
        return workspaces;
    };
    match storage::load_from_file(path) {
        Ok(loaded) => {
            log::info!("Loaded {} workspace(s) from {}", loaded.len(), path.display());
            for w in loaded {
                workspaces.entries.insert(w.id, WorkspaceEntry::new(w));
            }
        }
        Err(e) => log::warn!("Ignoring state file {}: {}", path.display(), e),
    }
    workspaces
}

/// Snapshot all workspaces if anything changed. Returns None when there is nothing to save.
fn take_snapshot(state: &AppState) -> Option<Vec<Workspace>> {
    let mut g = state.write().ok()?;
    if !g.dirty {
        return None;
    }
    g.dirty = false;
    Some(g.entries.values().map(|e| e.workspace.clone()).collect())
}

fn mark_dirty(state: &AppState) {
    if let Ok(mut g) = state.write() {
        g.dirty = true;
    }
}

async fn save_snapshot(state: &AppState, path: &std::path::Path) {
    let Some(workspaces) = take_snapshot(state) else {
        return;
    };
    let result = match storage::encode(&workspaces) {
        Ok(json) => tokio::fs::write(path, json).await.map_err(storage::StorageError::from),
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => log::debug!("Saved {} workspace(s) to {}", workspaces.len(), path.display()),
        Err(e) => {
            log::warn!("Could not save state to {}: {}", path.display(), e);
            mark_dirty(state);
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.as_str(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(load_state(config.state_file.as_ref())));

    // Background task: every 30 minutes, remove workspaces inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.entries.len();
            g.entries
                .retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.entries.len();
            if removed > 0 {
                g.dirty = true;
                log::info!("Cleaned up {} inactive workspace(s) (no activity for 12h)", removed);
            }
        }
    });

    // Background task: write the snapshot file when something changed
    if let Some(path) = config.state_file.clone() {
        let state_save = state.clone();
        actix_web::rt::spawn(async move {
            let mut interval = actix_web::rt::time::interval(SAVE_INTERVAL);
            loop {
                interval.tick().await;
                save_snapshot(&state_save, &path).await;
            }
        });
    }

    let app_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_workspace)
            .service(api_get_workspace)
            .service(api_clear_workspace)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_set_best_of)
            .service(api_generate_tournament)
            .service(api_set_legs)
            .service(api_increment_leg)
            .service(api_quick_winner)
            .service(api_reset_tournament)
            .service(Files::new("/static", "static").index_file("index.html"))
    })
    .bind(bind)?
    .run()
    .await?;

    if let Some(path) = config.state_file.as_ref() {
        save_snapshot(&state, path).await;
    }
    Ok(())
}
