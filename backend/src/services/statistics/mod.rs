//! Aggregated numbers for the statistics page.
//!
//! - `GET /api/statistics/overview`: row counts of the main tables.
//! - `GET /api/statistics/registrations`: cumulative participant registrations
//!   per day.
//! - `GET /api/statistics/sponsorship-levels`: sponsors per sponsorship level.
//! - `GET /api/statistics/hackathons`: participants and teams per hackathon.

use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};
use common::stats;

const API_PATH: &str = "/api/statistics";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/overview", get().to(overview))
        .route("/registrations", get().to(registrations))
        .route("/sponsorship-levels", get().to(sponsorship_levels))
        .route("/hackathons", get().to(hackathons))
}

async fn overview(store: web::Data<SqliteStore>) -> impl Responder {
    HttpResponse::Ok().json(stats::statistics_overview(store.get_ref()).await)
}

async fn registrations(store: web::Data<SqliteStore>) -> impl Responder {
    match stats::load_registration_trend(store.get_ref()).await {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(e) => store_error_response(&e),
    }
}

async fn sponsorship_levels(store: web::Data<SqliteStore>) -> impl Responder {
    match stats::load_sponsorship_levels(store.get_ref()).await {
        Ok(levels) => HttpResponse::Ok().json(levels),
        Err(e) => store_error_response(&e),
    }
}

async fn hackathons(store: web::Data<SqliteStore>) -> impl Responder {
    match stats::load_hackathon_breakdown(store.get_ref()).await {
        Ok(breakdown) => HttpResponse::Ok().json(breakdown),
        Err(e) => store_error_response(&e),
    }
}
