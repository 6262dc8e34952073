use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_web::{web, HttpResponse, Responder};
use common::model::{Row, RowId};
use common::store::RowStore;

pub async fn process(
    path: web::Path<(String, String)>,
    changes: web::Json<Row>,
    store: web::Data<SqliteStore>,
) -> impl Responder {
    let (table, id) = path.into_inner();
    match store.update_row(&table, &RowId::from(id), &changes).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response(&e),
    }
}
