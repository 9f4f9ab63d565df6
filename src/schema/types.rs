//! Content record types
//!
//! Supported collections:
//! - education: EducationEntry
//! - experience: ExperienceEntry
//! - posts: PostEntry
//! - resume: ResumeEntry
//!
//! Records are produced only by the validator and are never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

/// Collection a record belongs to; selects the schema applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Education,
    Experience,
    Posts,
    Resume,
}

impl CollectionKind {
    /// Every collection, in load order
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Education,
        CollectionKind::Experience,
        CollectionKind::Posts,
        CollectionKind::Resume,
    ];

    /// Directory name under the content root
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Education => "education",
            CollectionKind::Experience => "experience",
            CollectionKind::Posts => "posts",
            CollectionKind::Resume => "resume",
        }
    }

    /// Title length bounds, if this collection constrains them
    pub fn title_bounds(&self) -> Option<(usize, usize)> {
        match self {
            CollectionKind::Resume => None,
            _ => Some((TITLE_MIN_CHARS, TITLE_MAX_CHARS)),
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown collection '{}'", s))
    }
}

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 100;
pub const EXPERIENCE_SUBTITLE_MAX_CHARS: usize = 100;
pub const POST_SUBTITLE_MAX_CHARS: usize = 300;
pub const TAG_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub title: String,
    pub location: Option<String>,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    pub sub_title: Option<String>,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEntry {
    pub title: String,
    pub sub_title: Option<String>,
    /// Unique tags in authoring order
    pub tags: Vec<String>,
    pub published: NaiveDate,
    pub edited: Option<NaiveDate>,
    pub draft: bool,
    pub source: Option<Url>,
}

impl PostEntry {
    /// Most recent of `published` and `edited`
    pub fn last_updated(&self) -> NaiveDate {
        self.edited.unwrap_or(self.published)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeEntry {
    pub title: String,
    pub photo: Option<String>,
}

/// A validated record of any collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "collection", rename_all = "lowercase")]
pub enum Entry {
    Education(EducationEntry),
    Experience(ExperienceEntry),
    Posts(PostEntry),
    Resume(ResumeEntry),
}

impl Entry {
    pub fn kind(&self) -> CollectionKind {
        match self {
            Entry::Education(_) => CollectionKind::Education,
            Entry::Experience(_) => CollectionKind::Experience,
            Entry::Posts(_) => CollectionKind::Posts,
            Entry::Resume(_) => CollectionKind::Resume,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Entry::Education(e) => &e.title,
            Entry::Experience(e) => &e.title,
            Entry::Posts(e) => &e.title,
            Entry::Resume(e) => &e.title,
        }
    }
}
