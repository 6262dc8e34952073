//! `GET /api/map/locations`: markers for every row with coordinates.

use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Responder, Scope};
use common::map::load_locations;

const API_PATH: &str = "/api/map";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/locations", get().to(locations))
}

async fn locations(store: web::Data<SqliteStore>) -> impl Responder {
    match load_locations(store.get_ref()).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(e) => store_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::{row, temp_store};
    use actix_web::{test, App};
    use common::map::LocationItem;
    use common::model::CellValue;
    use common::store::RowStore;

    #[actix_web::test]
    async fn only_rows_with_coordinates() {
        let (_dir, store) = temp_store();
        store
            .insert_rows(
                "food_suppliers",
                &[
                    row([
                        ("id", "f1".into()),
                        ("name", "Falafel".into()),
                        ("address", "Herzl 1".into()),
                        ("contact_person", "Dana".into()),
                        ("latitude", CellValue::from(32.1)),
                        ("longitude", CellValue::from(34.8)),
                    ]),
                    row([("id", "f2".into()), ("name", "Nowhere".into())]),
                ],
            )
            .await
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store.clone()))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::get().uri("/api/map/locations").to_request();
        let items: Vec<LocationItem> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "f1");
        assert_eq!(items[0].category, "food_suppliers");
        assert_eq!(items[0].address.as_deref(), Some("Herzl 1"));
        assert_eq!(items[0].description.as_deref(), Some("איש קשר: Dana"));
    }
}
