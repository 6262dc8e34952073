//! Statistics page: overview counts, the cumulative registration trend and the
//! sponsorship and per-hackathon breakdowns served by `/api/statistics`.

use gloo_console::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::stats::{HackathonBreakdown, LevelCount, RegistrationPoint, StatisticsOverview};
use common::store::StoreError;

use crate::helpers::format_count;
use crate::store::get_json;

const API_PATH: &str = "/api/statistics";

pub struct Statistics {
    pub overview: StatisticsOverview,
    pub registrations: Vec<RegistrationPoint>,
    pub levels: Vec<LevelCount>,
    pub hackathons: Vec<HackathonBreakdown>,
}

pub enum Msg {
    Loaded(Result<Statistics, StoreError>),
}

pub struct StatisticsComponent {
    stats: Option<Statistics>,
    failed: bool,
    loaded: bool,
}

async fn load_statistics() -> Result<Statistics, StoreError> {
    Ok(Statistics {
        overview: get_json(&format!("{}/overview", API_PATH)).await?,
        registrations: get_json(&format!("{}/registrations", API_PATH)).await?,
        levels: get_json(&format!("{}/sponsorship-levels", API_PATH)).await?,
        hackathons: get_json(&format!("{}/hackathons", API_PATH)).await?,
    })
}

fn overview_cards(overview: &StatisticsOverview) -> [(&'static str, u64); 8] {
    [
        ("האקתונים", overview.hackathons),
        ("משתתפים", overview.participants),
        ("צוותים", overview.teams),
        ("מנטורים", overview.mentors),
        ("הזמנות מזון", overview.food_orders),
        ("הזמנות חולצות", overview.shirt_orders),
        ("פרסים", overview.prizes),
        ("ספונסרים", overview.sponsors),
    ]
}

/// `2024-03-05` as `5.3.2024`; anything else is shown unchanged.
fn day_label(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts[..] {
        [year, month, day] => match (month.parse::<u32>(), day.parse::<u32>()) {
            (Ok(month), Ok(day)) => format!("{}.{}.{}", day, month, year),
            _ => date.to_string(),
        },
        _ => date.to_string(),
    }
}

/// Table rows of the registration trend: day label and running total.
fn registration_rows(points: &[RegistrationPoint]) -> Vec<(String, String)> {
    points
        .iter()
        .map(|p| (day_label(&p.date), format_count(p.count)))
        .collect()
}

impl Component for StatisticsComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            stats: None,
            failed: false,
            loaded: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(stats)) => {
                self.stats = Some(stats);
                self.failed = false;
            }
            Msg::Loaded(Err(e)) => {
                error!(format!("loading statistics failed: {}", e));
                self.failed = true;
            }
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        if self.failed {
            return html! { <div class="grid-message error">{ "אירעה שגיאה בטעינת הנתונים" }</div> };
        }
        let Some(stats) = &self.stats else {
            return html! { <div class="grid-message">{ "טוען..." }</div> };
        };

        html! {
            <div class="statistics">
                <div class="stat-cards">
                    { for overview_cards(&stats.overview).into_iter().map(|(label, count)| html! {
                        <div class="stat-card">
                            <div class="stat-value">{ format_count(count) }</div>
                            <div class="stat-label">{ label }</div>
                        </div>
                    }) }
                </div>

                <h3>{ "מגמת הרשמה" }</h3>
                if stats.registrations.is_empty() {
                    <div class="grid-message">{ "אין נתונים" }</div>
                } else {
                    <table class="stat-table">
                        <thead><tr><th>{ "תאריך" }</th><th>{ "סה\"כ משתתפים" }</th></tr></thead>
                        <tbody>
                            { for registration_rows(&stats.registrations).into_iter().map(|(day, total)| html! {
                                <tr><td>{ day }</td><td>{ total }</td></tr>
                            }) }
                        </tbody>
                    </table>
                }

                <h3>{ "רמות חסות" }</h3>
                <table class="stat-table">
                    <thead><tr><th>{ "רמה" }</th><th>{ "ספונסרים" }</th></tr></thead>
                    <tbody>
                        { for stats.levels.iter().map(|l| html! {
                            <tr><td>{ &l.level }</td><td>{ format_count(l.count) }</td></tr>
                        }) }
                    </tbody>
                </table>

                <h3>{ "לפי האקתון" }</h3>
                <table class="stat-table">
                    <thead><tr><th>{ "האקתון" }</th><th>{ "משתתפים" }</th><th>{ "צוותים" }</th></tr></thead>
                    <tbody>
                        { for stats.hackathons.iter().map(|h| html! {
                            <tr>
                                <td>{ &h.name }</td>
                                <td>{ format_count(h.participants) }</td>
                                <td>{ format_count(h.teams) }</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Loaded(load_statistics().await));
            });
        }
    }
}
