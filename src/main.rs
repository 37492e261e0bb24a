use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{delete, get, middleware::Logger, post, put, web, App, HttpResponse, HttpServer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

mod balance;
mod config;
mod error;
mod ledger;
mod receipt;
mod schemas;

use crate::{
    balance::compute_settlement,
    config::Config,
    error::ApiError,
    ledger::{Ledger, LedgerError},
    receipt::render_receipt,
    schemas::{Session, SettlementResult},
};

/// The one page session: the editable ledger and the last calculation.
#[derive(Default)]
struct AppState {
    ledger: Ledger,
    results: Vec<SettlementResult>,
    calculated_at: Option<DateTime<Utc>>,
}

impl AppState {
    fn session(&self) -> Session {
        self.ledger.to_session(self.results.clone())
    }
}

type SharedState = web::Data<Mutex<AppState>>;

#[derive(Deserialize, Serialize)]
struct ValueJson {
    value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SettlementJson {
    calculated_at: Option<DateTime<Utc>>,
    results: Vec<SettlementResult>,
}

fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, ApiError> {
    state.lock().map_err(|_| ApiError::SessionPoisoned)
}

// Runs one ledger edit and answers with the updated session.
fn edit(
    state: &SharedState,
    op: impl FnOnce(&mut Ledger) -> Result<(), LedgerError>,
) -> Result<HttpResponse, ApiError> {
    let mut state = lock(state)?;
    if let Err(err) = op(&mut state.ledger) {
        warn!(%err, "Rejected ledger edit");
        return Err(err.into());
    }
    Ok(HttpResponse::Ok().json(state.session()))
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

#[get("/session")]
async fn get_session(state: SharedState) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(lock(&state)?.session()))
}

#[put("/session/card-owner")]
async fn set_card_owner(state: SharedState, json: web::Json<ValueJson>) -> Result<HttpResponse, ApiError> {
    edit(&state, |ledger| {
        ledger.set_card_owner(json.into_inner().value);
        Ok(())
    })
}

#[post("/entries")]
async fn add_entry(state: SharedState) -> Result<HttpResponse, ApiError> {
    edit(&state, |ledger| {
        ledger.add_entry();
        Ok(())
    })
}

#[delete("/entries/{index}")]
async fn remove_entry(state: SharedState, index: web::Path<usize>) -> Result<HttpResponse, ApiError> {
    edit(&state, |ledger| ledger.remove_entry(index.into_inner()))
}

#[put("/entries/{index}/amount")]
async fn set_amount(
    state: SharedState,
    index: web::Path<usize>,
    json: web::Json<ValueJson>,
) -> Result<HttpResponse, ApiError> {
    edit(&state, |ledger| {
        ledger.set_amount(index.into_inner(), json.into_inner().value)
    })
}

#[post("/entries/{index}/toggle-drinking")]
async fn toggle_drinking(state: SharedState, index: web::Path<usize>) -> Result<HttpResponse, ApiError> {
    edit(&state, |ledger| ledger.toggle_category(index.into_inner()))
}

#[post("/entries/{index}/participants")]
async fn add_participant(state: SharedState, index: web::Path<usize>) -> Result<HttpResponse, ApiError> {
    edit(&state, |ledger| ledger.add_participant(index.into_inner()))
}

#[put("/entries/{index}/participants/{name_index}")]
async fn set_participant_name(
    state: SharedState,
    path: web::Path<(usize, usize)>,
    json: web::Json<ValueJson>,
) -> Result<HttpResponse, ApiError> {
    let (index, name_index) = path.into_inner();
    edit(&state, |ledger| {
        ledger.set_participant_name(index, name_index, json.into_inner().value)
    })
}

#[delete("/entries/{index}/participants/{name_index}")]
async fn remove_participant(
    state: SharedState,
    path: web::Path<(usize, usize)>,
) -> Result<HttpResponse, ApiError> {
    let (index, name_index) = path.into_inner();
    edit(&state, |ledger| ledger.remove_participant(index, name_index))
}

#[post("/settlement")]
async fn calculate(state: SharedState) -> Result<HttpResponse, ApiError> {
    let mut state = lock(&state)?;
    state.results = compute_settlement(state.ledger.entries());
    state.calculated_at = Some(Utc::now());
    info!(
        entries = state.ledger.entries().len(),
        participants = state.results.len(),
        "Settlement calculated"
    );
    Ok(HttpResponse::Ok().json(SettlementJson {
        calculated_at: state.calculated_at,
        results: state.results.clone(),
    }))
}

#[get("/settlement")]
async fn get_settlement(state: SharedState) -> Result<HttpResponse, ApiError> {
    let state = lock(&state)?;
    Ok(HttpResponse::Ok().json(SettlementJson {
        calculated_at: state.calculated_at,
        results: state.results.clone(),
    }))
}

#[get("/settlement/receipt")]
async fn get_receipt(state: SharedState) -> Result<HttpResponse, ApiError> {
    let state = lock(&state)?;
    Ok(HttpResponse::Ok().json(render_receipt(state.ledger.card_owner(), &state.results)))
}

fn routes(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        warn!(%err, "Rejected request body");
        ApiError::BadRequest(err.to_string()).into()
    });

    cfg.app_data(json_config)
        .service(health)
        .service(get_session)
        .service(set_card_owner)
        .service(add_entry)
        .service(remove_entry)
        .service(set_amount)
        .service(toggle_drinking)
        .service(add_participant)
        .service(set_participant_name)
        .service(remove_participant)
        .service(calculate)
        .service(get_settlement)
        .service(get_receipt);
}

fn cors(config: &Config) -> Cors {
    match &config.allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header(),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        host = %config.host,
        port = config.port,
        workers = config.workers,
        "Starting settlement service"
    );

    let state = web::Data::new(Mutex::new(AppState::default()));
    let server_config = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&server_config))
            .app_data(state.clone())
            .configure(routes)
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Settlement service stopped");
    Ok(())
}
