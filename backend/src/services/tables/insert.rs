use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_web::{web, HttpResponse, Responder};
use common::model::Row;
use common::requests::ImportReport;
use common::store::RowStore;

/// Inserts every row of the body or none of them.
pub async fn process(
    table: web::Path<String>,
    rows: web::Json<Vec<Row>>,
    store: web::Data<SqliteStore>,
) -> impl Responder {
    match store.insert_rows(&table, &rows).await {
        Ok(()) => HttpResponse::Ok().json(ImportReport {
            inserted: rows.len(),
        }),
        Err(e) => store_error_response(&e),
    }
}
