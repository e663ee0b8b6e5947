//! Single binary web server hosting booking and allocation sessions in memory, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, SESSION_TIMEOUT_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use court_session_web::{
    AllocationSession, AvailabilityTicket, BookingSession, CapacityPolicy, ClockTime, CourtId,
    CourtSchedule, ErrorKind, OccupiedInterval, Placement, Player, PlayerId, SessionError,
    SessionId, ShortfallResolution, Team, TeamPlan, TempIdAllocator,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Session plus last activity time (for auto-cleanup).
struct SessionEntry<T> {
    session: T,
    last_activity: Instant,
}

impl<T> SessionEntry<T> {
    fn new(session: T) -> Self {
        Self {
            session,
            last_activity: Instant::now(),
        }
    }
}

/// In-memory state: sessions by id. Entries are removed after the configured inactivity.
#[derive(Default)]
struct Sessions {
    bookings: HashMap<SessionId, SessionEntry<BookingSession>>,
    allocations: HashMap<SessionId, SessionEntry<AllocationSession>>,
}

type AppState = Data<RwLock<Sessions>>;

/// Server settings read from the environment.
struct ServerConfig {
    host: String,
    port: u16,
    session_timeout: Duration,
    cleanup_interval: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let timeout_hours: u64 = env_parse("SESSION_TIMEOUT_HOURS").unwrap_or(12);
        let cleanup_minutes: u64 = env_parse("CLEANUP_INTERVAL_MINUTES").unwrap_or(30);
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parse("PORT").unwrap_or(8080),
            session_timeout: Duration::from_secs(timeout_hours * 3600),
            cleanup_interval: Duration::from_secs(cleanup_minutes.max(1) * 60),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct SelectCourtBody {
    date: NaiveDate,
    court: CourtId,
    schedule: CourtSchedule,
}

#[derive(Deserialize)]
struct AvailabilityBody {
    ticket: AvailabilityTicket,
    #[serde(default)]
    intervals: Vec<OccupiedInterval>,
}

#[derive(Deserialize)]
struct TapSlotBody {
    slot: ClockTime,
}

#[derive(Deserialize)]
struct CreateAllocationBody {
    players: Vec<Player>,
    team_size: usize,
}

#[derive(Deserialize)]
struct TeamSizeBody {
    team_size: usize,
}

#[derive(Deserialize)]
struct ShortfallBody {
    resolution: ShortfallResolution,
}

/// `team: null` unassigns.
#[derive(Deserialize)]
struct PlacePlayerBody {
    team: Option<usize>,
}

#[derive(Deserialize)]
struct SetterBody {
    setter: bool,
}

#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: PlayerId,
}

/// Booking session plus derived duration and cost.
#[derive(Serialize)]
struct BookingView<'a> {
    #[serde(flatten)]
    session: &'a BookingSession,
    availability_loaded: bool,
    duration_minutes: Option<u32>,
    cost: Option<f64>,
}

impl<'a> BookingView<'a> {
    fn of(session: &'a BookingSession) -> Self {
        Self {
            session,
            availability_loaded: session.availability_loaded(),
            duration_minutes: session.duration_minutes(),
            cost: session.cost(),
        }
    }
}

#[derive(Serialize)]
struct AllocationView<'a> {
    id: SessionId,
    players: &'a [Player],
    team_size: usize,
    plan: &'a TeamPlan,
    teams: Vec<Team>,
    unassigned: Vec<&'a PlayerId>,
    setters: Vec<&'a PlayerId>,
    max_setters: usize,
    /// Set after an assignment fills a team; a UI may move focus to the next one.
    #[serde(skip_serializing_if = "Option::is_none")]
    filled_team: Option<usize>,
}

impl<'a> AllocationView<'a> {
    fn of(session: &'a AllocationSession) -> Self {
        let registry = session.registry();
        Self {
            id: session.id,
            players: session.players(),
            team_size: session.team_size(),
            plan: session.plan(),
            teams: session.teams(),
            unassigned: session
                .players()
                .iter()
                .filter(|p| registry.placement(&p.id) == Some(Placement::Unassigned))
                .map(|p| &p.id)
                .collect(),
            setters: session.roles().setters().collect(),
            max_setters: session.roles().max(),
            filled_team: None,
        }
    }
}

fn error_response(e: &SessionError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::TeamFull | ErrorKind::SetterQuotaExceeded | ErrorKind::StaleDataDiscarded => {
            HttpResponse::Conflict().json(body)
        }
        ErrorKind::UniqueIdGenerationFailure => HttpResponse::InternalServerError().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Run `f` on a booking session (404 if not found). Touching it refreshes last_activity.
fn with_booking(
    state: &AppState,
    id: SessionId,
    f: impl FnOnce(&mut BookingSession) -> HttpResponse,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.bookings.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.session)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No booking session" })),
    }
}

/// Run `f` on an allocation session (404 if not found). Touching it refreshes last_activity.
fn with_allocation(
    state: &AppState,
    id: SessionId,
    f: impl FnOnce(&mut AllocationSession) -> HttpResponse,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.allocations.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.session)
        }
        None => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "No allocation session" }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "court-session-web",
    })
}

/// Start a booking session (client stores the id for subsequent requests).
#[post("/api/bookings")]
async fn api_create_booking(state: AppState) -> HttpResponse {
    let session = BookingSession::new();
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = g.bookings.entry(id).or_insert(SessionEntry::new(session));
    HttpResponse::Ok().json(BookingView::of(&entry.session))
}

#[get("/api/bookings/{id}")]
async fn api_get_booking(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_booking(&state, path.id, |s| HttpResponse::Ok().json(BookingView::of(s)))
}

/// Switch court/date. Returns the ticket to send back with the fetched reservations.
#[put("/api/bookings/{id}/court")]
async fn api_select_court(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<SelectCourtBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_booking(&state, path.id, |s| {
        match s.select_court(body.date, body.court, body.schedule) {
            Ok(ticket) => HttpResponse::Ok().json(ticket),
            Err(e) => error_response(&e),
        }
    })
}

/// Deliver reservations for a ticket. Outdated tickets get 409 and change nothing.
#[post("/api/bookings/{id}/availability")]
async fn api_receive_availability(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<AvailabilityBody>,
) -> HttpResponse {
    let body = body.into_inner();
    with_booking(&state, path.id, |s| {
        match s.receive_availability(&body.ticket, body.intervals) {
            Ok(()) => HttpResponse::Ok().json(BookingView::of(s)),
            Err(e) => error_response(&e),
        }
    })
}

#[post("/api/bookings/{id}/tap")]
async fn api_tap_slot(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<TapSlotBody>,
) -> HttpResponse {
    with_booking(&state, path.id, |s| match s.tap_slot(body.slot) {
        Ok(_) => HttpResponse::Ok().json(BookingView::of(s)),
        Err(e) => error_response(&e),
    })
}

/// Returns the booking payload for the external booking service.
#[post("/api/bookings/{id}/confirm")]
async fn api_confirm_booking(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_booking(&state, path.id, |s| match s.confirm() {
        Ok(request) => HttpResponse::Ok().json(request),
        Err(e) => error_response(&e),
    })
}

#[post("/api/allocations")]
async fn api_create_allocation(state: AppState, body: Json<CreateAllocationBody>) -> HttpResponse {
    let body = body.into_inner();
    let session = match AllocationSession::new(body.players, body.team_size) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = g.allocations.entry(id).or_insert(SessionEntry::new(session));
    HttpResponse::Ok().json(AllocationView::of(&entry.session))
}

#[get("/api/allocations/{id}")]
async fn api_get_allocation(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_allocation(&state, path.id, |s| HttpResponse::Ok().json(AllocationView::of(s)))
}

/// Change team size (clears all placements and setter flags).
#[put("/api/allocations/{id}/team-size")]
async fn api_set_team_size(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<TeamSizeBody>,
) -> HttpResponse {
    with_allocation(&state, path.id, |s| match s.set_team_size(body.team_size) {
        Ok(_) => HttpResponse::Ok().json(AllocationView::of(s)),
        Err(e) => error_response(&e),
    })
}

#[post("/api/allocations/{id}/shortfall")]
async fn api_resolve_shortfall(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<ShortfallBody>,
) -> HttpResponse {
    with_allocation(&state, path.id, |s| {
        let mut ids = TempIdAllocator::new(rand::thread_rng());
        match s.resolve_shortfall(body.resolution, &mut ids) {
            Ok(_) => HttpResponse::Ok().json(AllocationView::of(s)),
            Err(e) => error_response(&e),
        }
    })
}

#[post("/api/allocations/{id}/temporary-players")]
async fn api_add_temporary_player(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_allocation(&state, path.id, |s| {
        let mut ids = TempIdAllocator::new(rand::thread_rng());
        match s.add_temporary_player(&mut ids) {
            Ok(_) => HttpResponse::Ok().json(AllocationView::of(s)),
            Err(e) => error_response(&e),
        }
    })
}

/// Assign a player to a team (zero-based), or unassign with `team: null`.
#[put("/api/allocations/{id}/players/{player_id}/team")]
async fn api_place_player(
    state: AppState,
    path: Path<SessionPlayerPath>,
    body: Json<PlacePlayerBody>,
) -> HttpResponse {
    with_allocation(&state, path.id, |s| {
        let result = match body.team {
            Some(team) => s
                .assign_player(&path.player_id, team)
                .map(|filled| filled.map(|f| f.team)),
            None => s.unassign_player(&path.player_id).map(|()| None),
        };
        match result {
            Ok(filled_team) => {
                let mut view = AllocationView::of(s);
                view.filled_team = filled_team;
                HttpResponse::Ok().json(view)
            }
            Err(e) => error_response(&e),
        }
    })
}

#[put("/api/allocations/{id}/players/{player_id}/setter")]
async fn api_set_setter(
    state: AppState,
    path: Path<SessionPlayerPath>,
    body: Json<SetterBody>,
) -> HttpResponse {
    with_allocation(&state, path.id, |s| match s.set_setter(&path.player_id, body.setter) {
        Ok(()) => HttpResponse::Ok().json(AllocationView::of(s)),
        Err(e) => error_response(&e),
    })
}

/// Plain-text roster listing.
#[get("/api/allocations/{id}/export")]
async fn api_export_allocation(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_allocation(&state, path.id, |s| {
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(s.export())
    })
}

/// Returns the roster payload for the external game-session service.
#[post("/api/allocations/{id}/finalize")]
async fn api_finalize_allocation(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_allocation(&state, path.id, |s| match s.finalize() {
        Ok(submission) => {
            if matches!(s.plan().policy, CapacityPolicy::Rotate) {
                log::info!(
                    "Allocation {} finalized with {} rotating player(s)",
                    s.id,
                    s.plan().leftover
                );
            }
            HttpResponse::Ok().json(submission)
        }
        Err(e) => error_response(&e),
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Sessions::default()));

    // Background task: periodically remove sessions with no recent activity
    let state_cleanup = state.clone();
    let timeout = config.session_timeout;
    let every = config.cleanup_interval;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.bookings.len() + g.allocations.len();
            g.bookings.retain(|_, e| e.last_activity.elapsed() < timeout);
            g.allocations.retain(|_, e| e.last_activity.elapsed() < timeout);
            let removed = before - (g.bookings.len() + g.allocations.len());
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_booking)
            .service(api_get_booking)
            .service(api_select_court)
            .service(api_receive_availability)
            .service(api_tap_slot)
            .service(api_confirm_booking)
            .service(api_create_allocation)
            .service(api_get_allocation)
            .service(api_set_team_size)
            .service(api_resolve_shortfall)
            .service(api_add_temporary_player)
            .service(api_place_player)
            .service(api_set_setter)
            .service(api_export_allocation)
            .service(api_finalize_allocation)
    })
    .bind(bind)?
    .run()
    .await
}
