//! Map markers built from the tables that carry coordinates.

use crate::model::{Row, RowId};
use crate::stats::text_of;
use crate::store::{RowStore, StoreError};
use log::debug;
use serde::{Deserialize, Serialize};

const DEFAULT_COLOR: &str = "#6b7280";
const DEFAULT_NAME: &str = "אחר";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
}

pub const MAP_CATEGORIES: [MapCategory; 5] = [
    MapCategory { id: "hackathons", name: "האקתונים", color: "#3b82f6" },
    MapCategory { id: "mentors", name: "מנטורים", color: "#10b981" },
    MapCategory { id: "participants", name: "משתתפים", color: "#f59e0b" },
    MapCategory { id: "food_suppliers", name: "ספקי מזון", color: "#ef4444" },
    MapCategory { id: "shirt_suppliers", name: "ספקי חולצות", color: "#8b5cf6" },
];

pub fn category_color(category: &str) -> &'static str {
    MAP_CATEGORIES
        .iter()
        .find(|c| c.id == category)
        .map_or(DEFAULT_COLOR, |c| c.color)
}

pub fn category_name(category: &str) -> &'static str {
    MAP_CATEGORIES
        .iter()
        .find(|c| c.id == category)
        .map_or(DEFAULT_NAME, |c| c.name)
}

/// One marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Turns the rows of one category's table into markers. Rows without both
/// numeric coordinates or without an id are skipped.
pub fn locations_from_rows(category: &str, rows: &[Row]) -> Vec<LocationItem> {
    rows.iter()
        .filter_map(|row| {
            let latitude = row.get("latitude")?.as_f64()?;
            let longitude = row.get("longitude")?.as_f64()?;
            let id = RowId::of(row)?;
            Some(LocationItem {
                id: id.as_str().to_string(),
                name: text_of(row, "name").unwrap_or_default(),
                category: category.to_string(),
                latitude,
                longitude,
                address: address_of(category, row),
                description: description_of(category, row),
            })
        })
        .collect()
}

fn address_of(category: &str, row: &Row) -> Option<String> {
    match category {
        "food_suppliers" => text_of(row, "address"),
        "shirt_suppliers" => text_of(row, "location").or_else(|| text_of(row, "address")),
        _ => text_of(row, "location"),
    }
}

fn description_of(category: &str, row: &Row) -> Option<String> {
    match category {
        "hackathons" => text_of(row, "description"),
        "mentors" => with_suffix(text_of(row, "occupation")?, " ב", text_of(row, "organization")),
        "participants" => with_suffix(
            text_of(row, "participant_type")?,
            " מ",
            text_of(row, "organization"),
        ),
        "food_suppliers" | "shirt_suppliers" => {
            text_of(row, "contact_person").map(|p| format!("איש קשר: {p}"))
        }
        _ => None,
    }
}

fn with_suffix(head: String, joiner: &str, tail: Option<String>) -> Option<String> {
    Some(match tail {
        Some(tail) => format!("{head}{joiner}{tail}"),
        None => head,
    })
}

/// Markers of every category, in [`MAP_CATEGORIES`] order.
pub async fn load_locations<S>(store: &S) -> Result<Vec<LocationItem>, StoreError>
where
    S: RowStore + ?Sized,
{
    let mut locations = Vec::new();
    for category in &MAP_CATEGORIES {
        let rows = store.fetch_rows(category.id, None).await?;
        let found = locations_from_rows(category.id, &rows);
        debug!("{} of {} {} rows have coordinates", found.len(), rows.len(), category.id);
        locations.extend(found);
    }
    Ok(locations)
}
