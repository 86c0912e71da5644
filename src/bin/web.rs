//! Single binary web server: JSON API over in-memory workspaces.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), WORKSPACE_TTL_HOURS (e.g. 12).

use actix_web::{
    delete, error, get, post, put,
    web::{Data, Json, JsonConfig, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_planner::{
    standings_csv, MatchId, Score, ScoreField, TournamentConfig, TournamentError, Workspace,
    WorkspaceId,
};

/// Per-workspace entry: workspace data + last activity time (for auto-cleanup).
struct WorkspaceEntry {
    workspace: Workspace,
    last_activity: Instant,
}

/// In-memory state: many workspaces by ID. Idle entries are removed by a background task.
type AppState = Data<RwLock<HashMap<WorkspaceId, WorkspaceEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddEntrantBody {
    name: String,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Deserialize)]
struct GenerateBody {
    #[serde(flatten)]
    config: TournamentConfig,
    /// Fixed seed for a reproducible shuffle.
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct ScoreBody {
    #[serde(default)]
    home: Option<ScoreField>,
    #[serde(default)]
    away: Option<ScoreField>,
}

/// Path segment: workspace id (e.g. /api/workspaces/{id})
#[derive(Deserialize)]
struct WorkspacePath {
    id: WorkspaceId,
}

/// Path segments: workspace id and entrant name (e.g. /api/workspaces/{id}/entrants/{name})
#[derive(Deserialize)]
struct WorkspaceEntrantPath {
    id: WorkspaceId,
    name: String,
}

/// Path segments: workspace id and match id (e.g. /api/workspaces/{id}/matches/{match_id}/score)
#[derive(Deserialize)]
struct WorkspaceMatchPath {
    id: WorkspaceId,
    match_id: MatchId,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No workspace" }))
}

/// Malformed JSON bodies get the same `{"error": ..}` shape as rejected actions.
fn json_error(err: error::JsonPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let body = serde_json::json!({ "error": err.to_string() });
    error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Look up the workspace, refresh its activity time, run `action`, and answer with the
/// updated workspace (400 with the error message if the action was rejected).
fn with_workspace<F>(state: &AppState, id: WorkspaceId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Workspace) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.workspace) {
        Ok(()) => HttpResponse::Ok().json(&entry.workspace),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-planner",
    })
}

/// Create a new workspace (client stores the id for subsequent requests).
#[post("/api/workspaces")]
async fn api_create_workspace(state: AppState) -> HttpResponse {
    let workspace = Workspace::new();
    let body = HttpResponse::Ok().json(&workspace);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created workspace {}", workspace.id);
    g.insert(
        workspace.id,
        WorkspaceEntry {
            workspace,
            last_activity: Instant::now(),
        },
    );
    body
}

/// Get a workspace by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/workspaces/{id}")]
async fn api_get_workspace(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    with_workspace(&state, path.id, |_| Ok(()))
}

/// Register an entrant.
#[post("/api/workspaces/{id}/entrants")]
async fn api_add_entrant(
    state: AppState,
    path: Path<WorkspacePath>,
    body: Json<AddEntrantBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        ws.registry.add(&body.name, body.color.as_deref())
    })
}

/// Remove entrants by exact name.
#[delete("/api/workspaces/{id}/entrants/{name}")]
async fn api_remove_entrant(state: AppState, path: Path<WorkspaceEntrantPath>) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        ws.registry.remove(&path.name);
        Ok(())
    })
}

/// Generate the tournament from the registered entrants.
#[post("/api/workspaces/{id}/tournament")]
async fn api_generate_tournament(
    state: AppState,
    path: Path<WorkspacePath>,
    body: Json<GenerateBody>,
) -> HttpResponse {
    let GenerateBody { config, seed } = body.into_inner();
    with_workspace(&state, path.id, |ws| {
        let generated = match seed {
            Some(seed) => ws.generate(config, &mut StdRng::seed_from_u64(seed)),
            None => ws.generate(config, &mut rand::thread_rng()),
        };
        generated.map(|_| ())
    })
}

/// Enter the score for one match. Unknown match ids leave the workspace unchanged.
#[put("/api/workspaces/{id}/matches/{match_id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<WorkspaceMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        let score = Score::parse(body.home.as_ref(), body.away.as_ref())?;
        ws.record_score(path.match_id, score).map(|_| ())
    })
}

/// Reset: discard the tournament and go back to setup.
#[delete("/api/workspaces/{id}/tournament")]
async fn api_reset_tournament(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    with_workspace(&state, path.id, |ws| {
        ws.reset();
        Ok(())
    })
}

/// Group standings as CSV.
#[get("/api/workspaces/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<WorkspacePath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let tournament = match g.get(&path.id) {
        Some(entry) => match &entry.workspace.tournament {
            Some(t) => t,
            None => return bad_request(TournamentError::NoTournament),
        },
        None => return not_found(),
    };
    match standings_csv(tournament) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("Standings export failed: {}", e);
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_hours() -> u64 {
    12
}

/// Idle time after which a workspace is dropped. Huge values saturate instead of overflowing.
fn inactivity_timeout(ttl_hours: u64) -> Duration {
    Duration::from_secs(ttl_hours.saturating_mul(3600))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let ttl_hours: u64 = std::env::var("WORKSPACE_TTL_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_ttl_hours);
    let inactivity_timeout = inactivity_timeout(ttl_hours);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<WorkspaceId, WorkspaceEntry>::new()));

    // Background task: every 30 minutes, remove workspaces idle past the timeout
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive workspace(s) (no activity for {}h)",
                    removed,
                    ttl_hours
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(JsonConfig::default().error_handler(json_error))
            .service(api_health)
            .service(api_create_workspace)
            .service(api_get_workspace)
            .service(api_add_entrant)
            .service(api_remove_entrant)
            .service(api_generate_tournament)
            .service(api_record_score)
            .service(api_reset_tournament)
            .service(api_standings_csv)
    })
    .bind(bind)?
    .run()
    .await
}
