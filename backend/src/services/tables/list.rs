use actix_web::{HttpResponse, Responder};
use common::model::EDITABLE_TABLES;

/// The tables offered for bulk editing, in menu order.
pub async fn process() -> impl Responder {
    HttpResponse::Ok().json(EDITABLE_TABLES)
}
