use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_web::{web, HttpResponse, Responder};
use common::requests::RowsQuery;
use common::store::RowStore;

pub async fn process(
    table: web::Path<String>,
    query: web::Query<RowsQuery>,
    store: web::Data<SqliteStore>,
) -> impl Responder {
    match store.fetch_rows(&table, query.limit).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => store_error_response(&e),
    }
}
