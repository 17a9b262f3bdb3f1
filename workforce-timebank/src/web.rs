use actix_web::{web, App, HttpServer, HttpResponse, Result, HttpRequest, middleware};
use actix_files::Files;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use crate::config::AppConfig;
use crate::manual_entry::{validate_request, validate_slots, ManualEntryRequest, ManualEntrySubmission, SlotInput};
use crate::timebank::{compute_adjustment, BalanceSummary, DayKind, Ledger, LedgerMovement, MovementOrigin, OrgTimeBankPolicy};

// In-memory storage; persistence lives behind the application's database layer
pub struct AppState {
    pub ledgers: Mutex<HashMap<String, Ledger>>,
    pub policy: Mutex<OrgTimeBankPolicy>,
    pub manual_entries: Mutex<Vec<PendingManualEntry>>,
    pub admin_password: String,
}

impl AppState {
    pub fn new(policy: OrgTimeBankPolicy, admin_password: String) -> Self {
        Self {
            ledgers: Mutex::new(HashMap::new()),
            policy: Mutex::new(policy),
            manual_entries: Mutex::new(Vec::new()),
            admin_password,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingManualEntry {
    pub employee_id: String,
    #[serde(flatten)]
    pub submission: ManualEntrySubmission,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    raw_delta_minutes: i64,
    #[serde(default)]
    current_balance_minutes: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRequest {
    date: NaiveDate,
    raw_delta_minutes: i64,
    #[serde(default)]
    day_kind: DayKind,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRequest {
    minutes: i64,
    origin: MovementOrigin,
    date: NaiveDate,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerResponse<'a> {
    employee_id: &'a str,
    summary: BalanceSummary,
    movements: &'a [LedgerMovement],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    recorded: bool,
    movement: Option<LedgerMovement>,
    balance_minutes: i64,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| actix_web::error::ErrorInternalServerError("state lock poisoned"))
}

fn is_admin(req: &HttpRequest, state: &AppState) -> bool {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    password == state.admin_password
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

fn unprocessable(kind: &str, message: String) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(serde_json::json!({
        "success": false,
        "error": kind,
        "message": message,
    }))
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

async fn get_policy(state: web::Data<AppState>) -> Result<HttpResponse> {
    let policy = lock(&state.policy)?;
    Ok(HttpResponse::Ok().json(&*policy))
}

async fn update_policy(
    req: HttpRequest,
    body: web::Json<OrgTimeBankPolicy>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(unauthorized());
    }
    let new_policy = body.into_inner();
    if let Err(e) = new_policy.validate() {
        return Ok(unprocessable("InvalidPolicy", e.to_string()));
    }

    log::info!("time bank policy updated: {:?}", new_policy);
    *lock(&state.policy)? = new_policy.clone();
    Ok(HttpResponse::Ok().json(new_policy))
}

// Dry run of the calculator, used by the settings console
async fn preview_adjustment(
    body: web::Json<PreviewRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let policy = lock(&state.policy)?;
    let adjustment = compute_adjustment(body.raw_delta_minutes, &policy, body.current_balance_minutes);
    Ok(HttpResponse::Ok().json(adjustment))
}

async fn get_ledger(
    employee_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let policy = lock(&state.policy)?.clone();
    let ledgers = lock(&state.ledgers)?;

    // An employee without movements simply has an empty bank
    let empty = Ledger::new(employee_id.as_str());
    let ledger = ledgers.get(employee_id.as_str()).unwrap_or(&empty);

    Ok(HttpResponse::Ok().json(LedgerResponse {
        employee_id: employee_id.as_str(),
        summary: ledger.summary(&policy),
        movements: ledger.movements(),
    }))
}

async fn record_daily(
    employee_id: web::Path<String>,
    body: web::Json<DailyRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let policy = lock(&state.policy)?.clone();
    let mut ledgers = lock(&state.ledgers)?;
    let ledger = ledgers
        .entry(employee_id.into_inner())
        .or_insert_with_key(|id| Ledger::new(id.as_str()));

    let movement = ledger.record_daily(body.date, body.raw_delta_minutes, body.day_kind, &policy);
    log::info!(
        "{}: daily delta {} on {} -> {:?}",
        ledger.employee_id, body.raw_delta_minutes, body.date, movement.as_ref().map(|m| m.minutes)
    );

    Ok(HttpResponse::Ok().json(RecordResponse {
        recorded: movement.is_some(),
        movement,
        balance_minutes: ledger.balance(),
    }))
}

async fn record_movement(
    req: HttpRequest,
    employee_id: web::Path<String>,
    body: web::Json<MovementRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(unauthorized());
    }
    let body = body.into_inner();
    if body.origin.is_automatic() {
        return Ok(unprocessable(
            "AutomaticOrigin",
            format!("{:?} movements are only created by the daily calculation", body.origin),
        ));
    }

    let policy = lock(&state.policy)?.clone();
    let mut ledgers = lock(&state.ledgers)?;
    let ledger = ledgers
        .entry(employee_id.into_inner())
        .or_insert_with_key(|id| Ledger::new(id.as_str()));

    let movement = ledger.record_manual(body.minutes, body.origin, body.date, body.description, &policy);
    log::info!("{}: {:?} movement of {} min recorded", ledger.employee_id, movement.origin, movement.minutes);

    Ok(HttpResponse::Ok().json(RecordResponse {
        recorded: true,
        movement: Some(movement),
        balance_minutes: ledger.balance(),
    }))
}

// Slot check only, re-run by the form on every edit
async fn validate_manual_entry(body: web::Json<Vec<SlotInput>>) -> Result<HttpResponse> {
    match validate_slots(&body) {
        Ok(validated) => Ok(HttpResponse::Ok().json(validated)),
        Err(e) => Ok(unprocessable(e.kind(), e.to_string())),
    }
}

async fn submit_manual_entry(
    employee_id: web::Path<String>,
    body: web::Json<ManualEntryRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let today = chrono::Local::now().date_naive();
    match validate_request(&body, today) {
        Ok(submission) => {
            let pending = PendingManualEntry {
                employee_id: employee_id.into_inner(),
                submission,
            };
            log::info!("{}: manual entry for {} submitted", pending.employee_id, pending.submission.date);
            lock(&state.manual_entries)?.push(pending.clone());
            Ok(HttpResponse::Ok().json(pending))
        }
        Err(e) => {
            log::debug!("{}: manual entry rejected: {}", employee_id.as_str(), e);
            Ok(unprocessable(e.kind(), e.to_string()))
        }
    }
}

async fn list_manual_entries(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !is_admin(&req, &state) {
        return Ok(unauthorized());
    }
    let entries = lock(&state.manual_entries)?;
    Ok(HttpResponse::Ok().json(&*entries))
}

/// Registers the JSON API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(admin_login))
        .route("/api/policy", web::get().to(get_policy))
        .route("/api/policy", web::put().to(update_policy))
        .route("/api/timebank/preview", web::post().to(preview_adjustment))
        .route("/api/timebank/{employee_id}", web::get().to(get_ledger))
        .route("/api/timebank/{employee_id}/daily", web::post().to(record_daily))
        .route("/api/timebank/{employee_id}/movements", web::post().to(record_movement))
        .route("/api/manual-entries/validate", web::post().to(validate_manual_entry))
        .route("/api/manual-entries", web::get().to(list_manual_entries))
        .route("/api/manual-entries/{employee_id}", web::post().to(submit_manual_entry));
}

pub async fn start_server(config: AppConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config.policy, config.admin_password));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", "static"))
            .configure(configure)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
