//! Row store over the backend's HTTP API.
//!
//! Lets the grid, importer and exporter from `common` run in the browser
//! exactly as they run against SQLite on the server.

use async_trait::async_trait;
use common::model::{Row, RowId};
use common::requests::{CountResponse, DeleteRowsRequest};
use common::store::{RowStore, StoreError};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

const API_PATH: &str = "/api/tables";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HttpStore;

fn transport(e: gloo_net::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

fn encode(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

fn table_url(table: &str, rest: &str) -> String {
    format!("{}/{}{}", API_PATH, encode(table), rest)
}

/// Passes successful responses through and turns any other status into a
/// store error carrying the response body.
async fn check(response: Response) -> Result<Response, StoreError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Backend(if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body
    }))
}

/// GETs `url` and decodes its JSON body.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, StoreError> {
    let response = Request::get(url).send().await.map_err(transport)?;
    check(response).await?.json::<T>().await.map_err(transport)
}

#[async_trait(?Send)]
impl RowStore for HttpStore {
    async fn fetch_rows(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>, StoreError> {
        let query = limit.map(|l| format!("?limit={}", l)).unwrap_or_default();
        get_json(&table_url(table, &format!("/rows{}", query))).await
    }

    async fn update_row(&self, table: &str, id: &RowId, changes: &Row) -> Result<(), StoreError> {
        let response = Request::patch(&table_url(table, &format!("/rows/{}", encode(id.as_str()))))
            .json(changes)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        check(response).await.map(|_| ())
    }

    async fn delete_rows(&self, table: &str, ids: &[RowId]) -> Result<(), StoreError> {
        let response = Request::post(&table_url(table, "/rows/delete"))
            .json(&DeleteRowsRequest { ids: ids.to_vec() })
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        check(response).await.map(|_| ())
    }

    async fn insert_rows(&self, table: &str, rows: &[Row]) -> Result<(), StoreError> {
        let response = Request::post(&table_url(table, "/rows"))
            .json(&rows)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        check(response).await.map(|_| ())
    }

    async fn count_rows(&self, table: &str) -> Result<u64, StoreError> {
        let response: CountResponse = get_json(&table_url(table, "/count")).await?;
        Ok(response.count)
    }
}
