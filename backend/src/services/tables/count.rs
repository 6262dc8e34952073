use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_web::{web, HttpResponse, Responder};
use common::requests::CountResponse;
use common::store::RowStore;

pub async fn process(table: web::Path<String>, store: web::Data<SqliteStore>) -> impl Responder {
    match store.count_rows(&table).await {
        Ok(count) => HttpResponse::Ok().json(CountResponse { count }),
        Err(e) => store_error_response(&e),
    }
}
