//! Aggregations behind the statistics page.

use crate::model::{CellValue, Row, CREATED_AT_COLUMN, ID_COLUMN};
use crate::store::{RowStore, StoreError};
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const UNSET_LEVEL: &str = "לא מוגדר";

/// Row counts of the main tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsOverview {
    pub hackathons: u64,
    pub participants: u64,
    pub teams: u64,
    pub mentors: u64,
    pub food_orders: u64,
    pub shirt_orders: u64,
    pub prizes: u64,
    pub sponsors: u64,
}

/// Cumulative number of registered participants at the end of `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPoint {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCount {
    pub level: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HackathonBreakdown {
    pub name: String,
    pub participants: u64,
    pub teams: u64,
}

/// Counts every overview table. A table that cannot be counted reads as zero.
pub async fn statistics_overview<S>(store: &S) -> StatisticsOverview
where
    S: RowStore + ?Sized,
{
    let count = |table: &'static str| async move {
        store.count_rows(table).await.unwrap_or_else(|e| {
            warn!("counting {table} failed: {e}");
            0
        })
    };
    StatisticsOverview {
        hackathons: count("hackathons").await,
        participants: count("participants").await,
        teams: count("teams").await,
        mentors: count("mentors").await,
        food_orders: count("food_orders").await,
        shirt_orders: count("shirt_orders").await,
        prizes: count("prizes").await,
        sponsors: count("sponsors").await,
    }
}

/// Groups participants by the UTC calendar day of `created_at` and returns a
/// running total per day, oldest first. Rows without a readable timestamp are
/// left out.
pub fn registration_trend(participants: &[Row]) -> Vec<RegistrationPoint> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for day in participants
        .iter()
        .filter_map(|r| r.get(CREATED_AT_COLUMN))
        .filter_map(registration_day)
    {
        *per_day.entry(day).or_default() += 1;
    }

    let mut total = 0;
    per_day
        .into_iter()
        .map(|(day, count)| {
            total += count;
            RegistrationPoint {
                date: day.format("%Y-%m-%d").to_string(),
                count: total,
            }
        })
        .collect()
}

fn registration_day(value: &CellValue) -> Option<NaiveDate> {
    let text = value.as_str()?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    let date = text.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Sponsors per `sponsorship_level` in first-seen order. Missing or empty levels
/// are counted as unset.
pub fn sponsorship_levels(sponsors: &[Row]) -> Vec<LevelCount> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for sponsor in sponsors {
        let level = text_of(sponsor, "sponsorship_level").unwrap_or_else(|| UNSET_LEVEL.to_string());
        *counts.entry(level).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(level, count)| LevelCount { level, count })
        .collect()
}

/// Participant and team counts of every hackathon, matched on `hackathon_id`.
pub fn hackathon_breakdown(
    hackathons: &[Row],
    participants: &[Row],
    teams: &[Row],
) -> Vec<HackathonBreakdown> {
    let count_for = |rows: &[Row], id: &str| {
        rows.iter()
            .filter(|r| text_of(r, "hackathon_id").as_deref() == Some(id))
            .count() as u64
    };

    hackathons
        .iter()
        .filter_map(|h| {
            let id = text_of(h, ID_COLUMN)?;
            Some(HackathonBreakdown {
                name: text_of(h, "name").unwrap_or_default(),
                participants: count_for(participants, &id),
                teams: count_for(teams, &id),
            })
        })
        .collect()
}

pub async fn load_registration_trend<S>(store: &S) -> Result<Vec<RegistrationPoint>, StoreError>
where
    S: RowStore + ?Sized,
{
    let participants = store.fetch_rows("participants", None).await?;
    Ok(registration_trend(&participants))
}

pub async fn load_sponsorship_levels<S>(store: &S) -> Result<Vec<LevelCount>, StoreError>
where
    S: RowStore + ?Sized,
{
    let sponsors = store.fetch_rows("sponsors", None).await?;
    Ok(sponsorship_levels(&sponsors))
}

pub async fn load_hackathon_breakdown<S>(store: &S) -> Result<Vec<HackathonBreakdown>, StoreError>
where
    S: RowStore + ?Sized,
{
    let hackathons = store.fetch_rows("hackathons", None).await?;
    let participants = store.fetch_rows("participants", None).await?;
    let teams = store.fetch_rows("teams", None).await?;
    Ok(hackathon_breakdown(&hackathons, &participants, &teams))
}

/// Non-empty text of a cell, or `None` for missing, null and empty values.
pub(crate) fn text_of(row: &Row, column: &str) -> Option<String> {
    row.get(column)
        .map(CellValue::to_plain_text)
        .filter(|text| !text.is_empty())
}
