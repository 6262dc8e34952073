pub mod map;
pub mod statistics;
pub mod tables;

use actix_web::HttpResponse;
use common::store::StoreError;

/// Maps a store failure to a response: the caller's mistake is `400`, anything
/// the database could not do is `503`. The body is the error message.
pub(crate) fn store_error_response(e: &StoreError) -> HttpResponse {
    if e.is_client_error() {
        HttpResponse::BadRequest().body(e.to_string())
    } else {
        log::error!("store failure: {}", e);
        HttpResponse::ServiceUnavailable().body(e.to_string())
    }
}
