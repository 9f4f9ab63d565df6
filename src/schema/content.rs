//! Loaded content: validated records with their file context.

use std::path::PathBuf;

use serde::Serialize;

use super::loader::ContentDiagnostic;
use super::types::{EducationEntry, ExperienceEntry, PostEntry, ResumeEntry};

/// One validated content file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEntry<T> {
    /// File stem, used in URLs
    pub slug: String,
    #[serde(skip)]
    pub path: PathBuf,
    /// Markdown after the front-matter block
    pub body: String,
    pub data: T,
}

/// Every collection after loading, plus the diagnostics for excluded files.
///
/// Built once at startup and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub education: Vec<ContentEntry<EducationEntry>>,
    pub experience: Vec<ContentEntry<ExperienceEntry>>,
    pub posts: Vec<ContentEntry<PostEntry>>,
    pub resume: Vec<ContentEntry<ResumeEntry>>,
    /// Files excluded in lenient mode
    pub diagnostics: Vec<ContentDiagnostic>,
}

impl SiteContent {
    /// Non-draft posts, newest first (ties broken by slug)
    pub fn published_posts(&self) -> Vec<&ContentEntry<PostEntry>> {
        let mut posts: Vec<_> = self.posts.iter().filter(|p| !p.data.draft).collect();
        posts.sort_by(|a, b| {
            b.data
                .published
                .cmp(&a.data.published)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        posts
    }

    /// A non-draft post by slug
    pub fn post(&self, slug: &str) -> Option<&ContentEntry<PostEntry>> {
        self.posts
            .iter()
            .find(|p| p.slug == slug && !p.data.draft)
    }

    /// Education entries, most recent start first
    pub fn education_timeline(&self) -> Vec<&ContentEntry<EducationEntry>> {
        let mut entries: Vec<_> = self.education.iter().collect();
        entries.sort_by(|a, b| {
            b.data
                .start
                .cmp(&a.data.start)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        entries
    }

    /// Experience entries, most recent start first
    pub fn experience_timeline(&self) -> Vec<&ContentEntry<ExperienceEntry>> {
        let mut entries: Vec<_> = self.experience.iter().collect();
        entries.sort_by(|a, b| {
            b.data
                .start
                .cmp(&a.data.start)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        entries
    }

    /// Total number of loaded records
    pub fn len(&self) -> usize {
        self.education.len() + self.experience.len() + self.posts.len() + self.resume.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(slug: &str, published: (i32, u32, u32), draft: bool) -> ContentEntry<PostEntry> {
        ContentEntry {
            slug: slug.to_string(),
            path: PathBuf::from(format!("posts/{}.md", slug)),
            body: String::new(),
            data: PostEntry {
                title: format!("Post {}", slug),
                sub_title: None,
                tags: vec![],
                published: NaiveDate::from_ymd_opt(published.0, published.1, published.2).unwrap(),
                edited: None,
                draft,
                source: None,
            },
        }
    }

    #[test]
    fn test_published_posts_excludes_drafts_and_sorts() {
        let content = SiteContent {
            posts: vec![
                post("old", (2023, 1, 1), false),
                post("wip", (2024, 6, 1), true),
                post("new", (2024, 3, 15), false),
                post("also-new", (2024, 3, 15), false),
            ],
            ..Default::default()
        };

        let slugs: Vec<_> = content
            .published_posts()
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["also-new", "new", "old"]);
    }

    #[test]
    fn test_post_lookup_hides_drafts() {
        let content = SiteContent {
            posts: vec![post("live", (2024, 1, 1), false), post("wip", (2024, 1, 2), true)],
            ..Default::default()
        };

        assert!(content.post("live").is_some());
        assert!(content.post("wip").is_none());
        assert!(content.post("missing").is_none());
    }

    #[test]
    fn test_experience_timeline_most_recent_first() {
        let entry = |slug: &str, year: i32| ContentEntry {
            slug: slug.to_string(),
            path: PathBuf::new(),
            body: String::new(),
            data: ExperienceEntry {
                title: "Software engineer".into(),
                sub_title: None,
                start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
                end: None,
                link: None,
            },
        };
        let content = SiteContent {
            experience: vec![entry("first-job", 2015), entry("current", 2022), entry("second", 2018)],
            ..Default::default()
        };

        let slugs: Vec<_> = content
            .experience_timeline()
            .iter()
            .map(|e| e.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["current", "second", "first-job"]);
        assert_eq!(content.len(), 3);
    }

    #[test]
    fn test_education_timeline_ties_break_on_slug() {
        let entry = |slug: &str, start: (i32, u32, u32)| ContentEntry {
            slug: slug.to_string(),
            path: PathBuf::new(),
            body: String::new(),
            data: EducationEntry {
                title: "MSc Computer Science".into(),
                location: None,
                start: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
                end: None,
                link: None,
            },
        };
        let content = SiteContent {
            education: vec![
                entry("zeta", (2019, 9, 1)),
                entry("alpha", (2019, 9, 1)),
                entry("older", (2015, 9, 1)),
            ],
            ..Default::default()
        };

        let slugs: Vec<_> = content
            .education_timeline()
            .iter()
            .map(|e| e.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["alpha", "zeta", "older"]);
    }
}
