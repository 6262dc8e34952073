use crate::model::RowId;
use serde::{Deserialize, Serialize};

/// Query string of the row listing endpoint.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct RowsQuery {
    pub limit: Option<usize>,
}

/// Body of the bulk delete endpoint.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DeleteRowsRequest {
    pub ids: Vec<RowId>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct CountResponse {
    pub count: u64,
}

/// Result of a server side CSV import.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ImportReport {
    pub inserted: usize,
}
