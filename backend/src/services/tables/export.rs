use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{web, HttpResponse, Responder};
use common::export::{export_table, CSV_CONTENT_TYPE};

/// Sends the whole table as `<table>.csv`.
pub async fn process(table: web::Path<String>, store: web::Data<SqliteStore>) -> impl Responder {
    match export_table(store.get_ref(), &table).await {
        Ok(file) => HttpResponse::Ok()
            .content_type(CSV_CONTENT_TYPE)
            .insert_header((CONTENT_DISPOSITION, file.content_disposition()))
            .body(file.contents),
        Err(e) => store_error_response(&e),
    }
}
