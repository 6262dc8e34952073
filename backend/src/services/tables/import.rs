use crate::db::SqliteStore;
use crate::services::store_error_response;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::import::{import_csv_text, ImportError};
use common::requests::ImportReport;
use futures_util::StreamExt;

/// Imports the CSV uploaded in the `file` field into the table.
///
/// - On success: `200 OK` with the number of inserted rows.
/// - Unreadable upload or malformed CSV: `400 Bad Request`.
/// - Insert failure: mapped like any other store error.
pub async fn process(
    table: web::Path<String>,
    payload: Multipart,
    store: web::Data<SqliteStore>,
) -> impl Responder {
    let text = match read_csv_field(payload).await {
        Ok(text) => text,
        Err(e) => return HttpResponse::BadRequest().body(format!("Error: {}", e)),
    };

    match import_csv_text(store.get_ref(), &table, &text).await {
        Ok(inserted) => HttpResponse::Ok().json(ImportReport { inserted }),
        Err(ImportError::Store(e)) => store_error_response(&e),
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}

/// Collects the `file` field of a multipart body as UTF-8 text.
async fn read_csv_field(mut payload: Multipart) -> Result<String, Box<dyn std::error::Error>> {
    let mut file: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() == Some("file") {
            let filename = field
                .content_disposition()
                .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                .unwrap_or_default();
            if !filename.is_empty() && !filename.to_ascii_lowercase().ends_with(".csv") {
                return Err("The file must end with .csv".into());
            }

            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                bytes.extend_from_slice(&chunk?);
            }
            file = Some(bytes);
        }
    }

    let bytes = file.ok_or("Missing file")?;
    String::from_utf8(bytes).map_err(|_| "The file is not valid UTF-8".into())
}
