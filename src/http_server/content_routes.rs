//! Content HTTP Routes
//!
//! Read-only JSON views over the loaded collections.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::dates::{format_displayed_date, format_displayed_full_date, DateFormat};
use crate::schema::{
    ContentEntry, EducationEntry, ExperienceEntry, PostEntry, ResumeEntry, SiteContent,
};

use super::errors::{SiteError, SiteResult};

/// Shared site state: configuration and content, both immutable.
pub struct SiteState {
    pub config: SiteConfig,
    pub content: SiteContent,
}

impl SiteState {
    pub fn new(config: SiteConfig, content: SiteContent) -> Self {
        Self { config, content }
    }
}

/// Content routes with shared state
pub fn content_routes(state: Arc<SiteState>) -> Router {
    Router::new()
        .route("/about", get(about_handler))
        .route("/education", get(education_handler))
        .route("/experience", get(experience_handler))
        .route("/blog", get(blog_index_handler))
        .route("/blog/:slug", get(blog_post_handler))
        .with_state(state)
}

// ==================
// Response Types
// ==================

/// A date with its display strings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayDate {
    pub date: NaiveDate,
    pub display: String,
    pub full: String,
}

impl DisplayDate {
    fn new(date: NaiveDate, format: &DateFormat) -> Self {
        Self {
            date,
            display: format_displayed_date(date, format),
            full: format_displayed_full_date(date, format),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem<T> {
    pub slug: String,
    #[serde(flatten)]
    pub data: T,
    pub start_display: String,
    pub end_display: Option<String>,
    pub body: String,
}

impl TimelineItem<EducationEntry> {
    fn education(entry: &ContentEntry<EducationEntry>, format: &DateFormat) -> Self {
        timeline_item(entry, entry.data.start, entry.data.end, format)
    }
}

impl TimelineItem<ExperienceEntry> {
    fn experience(entry: &ContentEntry<ExperienceEntry>, format: &DateFormat) -> Self {
        timeline_item(entry, entry.data.start, entry.data.end, format)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub sub_title: Option<String>,
    pub tags: Vec<String>,
    pub published: DisplayDate,
    pub edited: Option<DisplayDate>,
}

impl PostSummary {
    fn new(entry: &ContentEntry<PostEntry>, format: &DateFormat) -> Self {
        Self {
            slug: entry.slug.clone(),
            title: entry.data.title.clone(),
            sub_title: entry.data.sub_title.clone(),
            tags: entry.data.tags.clone(),
            published: DisplayDate::new(entry.data.published, format),
            edited: entry.data.edited.map(|d| DisplayDate::new(d, format)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub source: Option<String>,
    pub body: String,
}

// ==================
// Handlers
// ==================

async fn about_handler(State(state): State<Arc<SiteState>>) -> Json<Vec<ContentEntry<ResumeEntry>>> {
    Json(state.content.resume.clone())
}

async fn education_handler(
    State(state): State<Arc<SiteState>>,
) -> Json<Vec<TimelineItem<EducationEntry>>> {
    let format = &state.config.dates;
    Json(
        state
            .content
            .education_timeline()
            .into_iter()
            .map(|e| TimelineItem::education(e, format))
            .collect(),
    )
}

async fn experience_handler(
    State(state): State<Arc<SiteState>>,
) -> Json<Vec<TimelineItem<ExperienceEntry>>> {
    let format = &state.config.dates;
    Json(
        state
            .content
            .experience_timeline()
            .into_iter()
            .map(|e| TimelineItem::experience(e, format))
            .collect(),
    )
}

async fn blog_index_handler(State(state): State<Arc<SiteState>>) -> Json<Vec<PostSummary>> {
    let format = &state.config.dates;
    Json(
        state
            .content
            .published_posts()
            .into_iter()
            .map(|p| PostSummary::new(p, format))
            .collect(),
    )
}

async fn blog_post_handler(
    State(state): State<Arc<SiteState>>,
    Path(slug): Path<String>,
) -> SiteResult<Json<PostView>> {
    let entry = state
        .content
        .post(&slug)
        .ok_or(SiteError::PostNotFound(slug))?;

    Ok(Json(PostView {
        summary: PostSummary::new(entry, &state.config.dates),
        source: entry.data.source.as_ref().map(|u| u.to_string()),
        body: entry.body.clone(),
    }))
}

/// Not-found handler, also the target of gated requests
pub async fn not_found_handler() -> SiteError {
    SiteError::NotFound
}

fn timeline_item<T: Clone>(
    entry: &ContentEntry<T>,
    start: NaiveDate,
    end: Option<NaiveDate>,
    format: &DateFormat,
) -> TimelineItem<T> {
    TimelineItem {
        slug: entry.slug.clone(),
        data: entry.data.clone(),
        start_display: format_displayed_date(start, format),
        end_display: end.map(|d| format_displayed_date(d, format)),
        body: entry.body.clone(),
    }
}
