//! Generic row access to the dashboard tables.
//!
//! The provided routes are:
//! - `GET /api/tables`: the editable tables with their display labels.
//! - `GET /api/tables/{table}/rows?limit=N`: rows in insertion order, all of them
//!   when `limit` is absent.
//! - `POST /api/tables/{table}/rows`: inserts a JSON array of rows in one
//!   transaction.
//! - `PATCH /api/tables/{table}/rows/{id}`: writes a partial row.
//! - `POST /api/tables/{table}/rows/delete`: deletes `{ "ids": [...] }`.
//! - `GET /api/tables/{table}/count`: `{ "count": n }`.
//! - `GET /api/tables/{table}/export`: the whole table as a CSV download.
//! - `POST /api/tables/{table}/import`: inserts the rows of the CSV sent in the
//!   multipart `file` field.

use actix_web::web::{get, patch, post, scope};
use actix_web::Scope;

mod count;
mod delete;
mod export;
mod fetch;
mod import;
mod insert;
mod list;
mod update;

const API_PATH: &str = "/api/tables";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{table}/rows", get().to(fetch::process))
        .route("/{table}/rows", post().to(insert::process))
        .route("/{table}/rows/delete", post().to(delete::process))
        .route("/{table}/rows/{id}", patch().to(update::process))
        .route("/{table}/count", get().to(count::process))
        .route("/{table}/export", get().to(export::process))
        .route("/{table}/import", post().to(import::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::tests::{row, temp_store};
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use common::model::{CellValue, Row};
    use common::requests::{CountResponse, DeleteRowsRequest, ImportReport};
    use common::store::RowStore;
    use serde_json::{json, Value};

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($store.clone()))
                    .service(configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn lists_editable_tables() {
        let (_dir, store) = temp_store();
        let app = app!(store);
        let req = test::TestRequest::get().uri("/api/tables").to_request();
        let tables: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tables.as_array().map(Vec::len), Some(16));
        assert_eq!(tables[0], json!({"key": "hackathons", "display_label": "האקתונים"}));
    }

    #[actix_web::test]
    async fn insert_fetch_update_delete() {
        let (_dir, store) = temp_store();
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/tables/teams/rows")
            .set_json(json!([
                {"id": "t1", "name": "Owls"},
                {"id": "t2", "name": "Hawks"},
                {"id": "t3", "name": "Crows"}
            ]))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get().uri("/api/tables/teams/rows?limit=2").to_request();
        let rows: Vec<Row> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["name"], CellValue::from("Hawks"));

        let req = test::TestRequest::patch()
            .uri("/api/tables/teams/rows/t2")
            .set_json(json!({"project_name": "Radar"}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/tables/teams/rows/delete")
            .set_json(DeleteRowsRequest {
                ids: vec!["t1".into(), "t3".into()],
            })
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get().uri("/api/tables/teams/count").to_request();
        let count: CountResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(count, CountResponse { count: 1 });

        let remaining = store.fetch_rows("teams", None).await.unwrap();
        assert_eq!(remaining[0]["project_name"], CellValue::from("Radar"));
    }

    #[actix_web::test]
    async fn client_errors_are_bad_requests() {
        let (_dir, store) = temp_store();
        let app = app!(store);

        let req = test::TestRequest::get().uri("/api/tables/nope/rows").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(test::read_body(resp).await, "unknown table: nope");

        let req = test::TestRequest::patch()
            .uri("/api/tables/mentors/rows/m1")
            .set_json(json!({"is_potential": "perhaps"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn export_is_a_csv_download() {
        let (_dir, store) = temp_store();
        store
            .insert_rows(
                "prizes",
                &[
                    row([("id", "p1".into()), ("name", "Cup, \"gold\"".into()), ("value", CellValue::from(100))]),
                    row([("id", "p2".into()), ("name", "two\nlines".into()), ("value", CellValue::Null)]),
                ],
            )
            .await
            .unwrap();
        let app = app!(store);

        let req = test::TestRequest::get().uri("/api/tables/prizes/export").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()),
            Some("attachment; filename=\"prizes.csv\"")
        );
        let body = test::read_body(resp).await;

        // read it back with an independent RFC 4180 reader
        let mut reader = csv::ReaderBuilder::new().from_reader(body.as_ref());
        let headers = reader.headers().unwrap().clone();
        let name = headers.iter().position(|h| h == "name").unwrap();
        let value = headers.iter().position(|h| h == "value").unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][name], "Cup, \"gold\"");
        assert_eq!(&records[0][value], "100");
        assert_eq!(&records[1][name], "two\nlines");
        assert_eq!(&records[1][value], "");
    }

    #[actix_web::test]
    async fn import_inserts_uploaded_csv() {
        let (_dir, store) = temp_store();
        let app = app!(store);

        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"mentors.csv\"\r\n\
            Content-Type: text/csv\r\n\r\n\
            id,name,organization,is_potential\n\
            99,Noa,\"Acme, Ltd\",true\n\
            98,Eli,,0\r\n\
            --XBOUNDARY--\r\n";
        let req = test::TestRequest::post()
            .uri("/api/tables/mentors/import")
            .insert_header((header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY"))
            .set_payload(body)
            .to_request();
        let report: ImportReport = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report, ImportReport { inserted: 2 });

        let rows = store.fetch_rows("mentors", None).await.unwrap();
        assert_eq!(rows[0]["organization"], CellValue::from("Acme, Ltd"));
        assert_eq!(rows[0]["is_potential"], CellValue::Bool(true));
        assert_eq!(rows[1]["organization"], CellValue::Null);
        // ids from the file are dropped and fresh ones assigned
        assert!(rows.iter().all(|r| r["id"] != CellValue::from("99")));
    }

    #[actix_web::test]
    async fn import_accepts_byte_order_mark() {
        let (_dir, store) = temp_store();
        let app = app!(store);

        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"teams.csv\"\r\n\
            Content-Type: text/csv\r\n\r\n\
            \u{feff}name,project_name\r\n\
            Owls,Nest\r\n\
            --XBOUNDARY--\r\n";
        let req = test::TestRequest::post()
            .uri("/api/tables/teams/import")
            .insert_header((header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY"))
            .set_payload(body)
            .to_request();
        let report: ImportReport = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report, ImportReport { inserted: 1 });

        let rows = store.fetch_rows("teams", None).await.unwrap();
        assert_eq!(rows[0]["name"], CellValue::from("Owls"));
        assert_eq!(rows[0]["project_name"], CellValue::from("Nest"));
    }

    #[actix_web::test]
    async fn import_rejects_broken_csv() {
        let (_dir, store) = temp_store();
        let app = app!(store);

        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"teams.csv\"\r\n\r\n\
            name\n\"Owls\r\n\
            --XBOUNDARY--\r\n";
        let req = test::TestRequest::post()
            .uri("/api/tables/teams/import")
            .insert_header((header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY"))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.count_rows("teams").await, Ok(0));
    }
}
