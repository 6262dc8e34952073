use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_web::{web, HttpResponse, Responder};
use common::requests::DeleteRowsRequest;
use common::store::RowStore;

pub async fn process(
    table: web::Path<String>,
    request: web::Json<DeleteRowsRequest>,
    store: web::Data<SqliteStore>,
) -> impl Responder {
    match store.delete_rows(&table, &request.ids).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response(&e),
    }
}
