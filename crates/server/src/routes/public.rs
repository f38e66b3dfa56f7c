//! Read-only payloads for the public marketing pages.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use models::Collection;
use service::ordered::OrderedRecord;

use crate::routes::auth::ServerState;
use crate::routes::collections::list_or_empty;

const HOME_REELS: usize = 6;
const HOME_TESTIMONIALS: usize = 3;

#[derive(Serialize)]
pub struct HomePage {
    pub stats: Vec<OrderedRecord>,
    pub featured_services: Vec<OrderedRecord>,
    pub featured_reels: Vec<OrderedRecord>,
    pub testimonials: Vec<OrderedRecord>,
}

#[derive(Serialize)]
pub struct AboutPage {
    pub tools: Vec<OrderedRecord>,
    pub values: Vec<OrderedRecord>,
    pub journey: Vec<OrderedRecord>,
    pub team: Vec<OrderedRecord>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct GenreQuery { pub genre: Option<String> }

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct CategoryQuery { pub category: Option<String> }

/// Keep records whose `field` equals `wanted` (case-insensitive). `None` and "all" keep everything.
fn filter_by(records: Vec<OrderedRecord>, field: &str, wanted: Option<&str>) -> Vec<OrderedRecord> {
    match wanted.map(str::trim) {
        None | Some("") => records,
        Some(w) if w.eq_ignore_ascii_case("all") => records,
        Some(w) => records
            .into_iter()
            .filter(|r| r.text(field).map(|v| v.eq_ignore_ascii_case(w)).unwrap_or(false))
            .collect(),
    }
}

#[utoipa::path(get, path = "/api/home", tag = "public", responses((status = 200, description = "Home page content")))]
pub async fn home(State(state): State<ServerState>) -> Json<HomePage> {
    let stats = list_or_empty(&state, Collection::HomepageStats).await;
    let featured_services = list_or_empty(&state, Collection::Services)
        .await
        .into_iter()
        .filter(|s| s.flag("featured"))
        .collect();
    let mut featured_reels = list_or_empty(&state, Collection::Reels).await;
    featured_reels.truncate(HOME_REELS);
    let mut testimonials = list_or_empty(&state, Collection::Testimonials).await;
    testimonials.truncate(HOME_TESTIMONIALS);
    Json(HomePage { stats, featured_services, featured_reels, testimonials })
}

#[utoipa::path(get, path = "/api/about", tag = "public", responses((status = 200, description = "About page content")))]
pub async fn about(State(state): State<ServerState>) -> Json<AboutPage> {
    Json(AboutPage {
        tools: list_or_empty(&state, Collection::AboutTools).await,
        values: list_or_empty(&state, Collection::AboutValues).await,
        journey: list_or_empty(&state, Collection::AboutJourney).await,
        team: list_or_empty(&state, Collection::Team).await,
    })
}

#[utoipa::path(get, path = "/api/services", tag = "public", responses((status = 200, description = "Services")))]
pub async fn services(State(state): State<ServerState>) -> Json<Vec<OrderedRecord>> {
    Json(list_or_empty(&state, Collection::Services).await)
}

#[utoipa::path(get, path = "/api/portfolio", tag = "public", params(GenreQuery), responses((status = 200, description = "Reels, optionally by genre")))]
pub async fn portfolio(State(state): State<ServerState>, Query(q): Query<GenreQuery>) -> Json<Vec<OrderedRecord>> {
    let reels = list_or_empty(&state, Collection::Reels).await;
    Json(filter_by(reels, "genre", q.genre.as_deref()))
}

#[utoipa::path(get, path = "/api/stock-videos", tag = "public", params(CategoryQuery), responses((status = 200, description = "Stock videos, optionally by category")))]
pub async fn stock_videos(State(state): State<ServerState>, Query(q): Query<CategoryQuery>) -> Json<Vec<OrderedRecord>> {
    let videos = list_or_empty(&state, Collection::StockVideos).await;
    Json(filter_by(videos, "category", q.category.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn reel(genre: &str) -> OrderedRecord {
        OrderedRecord {
            id: Uuid::new_v4(),
            collection: Collection::Reels,
            display_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            payload: json!({"genre": genre}).as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn genre_filter() {
        let all = vec![reel("Fashion"), reel("Food"), reel("fashion")];
        assert_eq!(filter_by(all.clone(), "genre", Some("FASHION")).len(), 2);
        assert_eq!(filter_by(all.clone(), "genre", Some("All")).len(), 3);
        assert_eq!(filter_by(all, "genre", None).len(), 3);
    }
}
