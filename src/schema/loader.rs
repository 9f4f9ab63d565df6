//! Content loader reading collections from disk
//!
//! Layout:
//! - `<content_dir>/<collection>/<slug>.md`
//! - One record per file, front-matter first
//! - A missing collection directory is an empty collection
//!
//! Strictness decides what happens to records that fail validation: strict
//! mode blocks the whole load, lenient mode excludes the record and keeps a
//! diagnostic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::content::{ContentEntry, SiteContent};
use super::errors::{FieldError, SchemaErrorCode, ValidationReport};
use super::frontmatter;
use super::types::{CollectionKind, Entry};
use super::validator::SchemaValidator;
use crate::observability::Event;

const CONTENT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// An authoring diagnostic: which file, which field, what was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentDiagnostic {
    pub path: PathBuf,
    pub collection: CollectionKind,
    pub field: String,
    pub code: &'static str,
    pub message: String,
}

impl ContentDiagnostic {
    fn from_field_error(path: &Path, collection: CollectionKind, err: FieldError) -> Self {
        Self {
            path: path.to_path_buf(),
            collection,
            field: err.field,
            code: err.code.code(),
            message: err.message,
        }
    }
}

impl std::fmt::Display for ContentDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: {} [{}]",
            self.path.display(),
            self.field,
            self.message,
            self.code
        )
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} content error(s)", .diagnostics.len())]
    Invalid { diagnostics: Vec<ContentDiagnostic> },
}

impl LoadError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result of reading one file: either a record or its diagnostics.
struct LoadedFile {
    slug: String,
    path: PathBuf,
    body: String,
    outcome: Result<Entry, ValidationReport>,
}

/// Reads, parses and validates content files.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    strict: bool,
    validator: SchemaValidator,
}

impl ContentLoader {
    /// Creates a strict loader rooted at `content_dir`.
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            strict: true,
            validator: SchemaValidator::new(),
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn collection_dir(&self, kind: CollectionKind) -> PathBuf {
        self.content_dir.join(kind.as_str())
    }

    /// Validates every collection and returns all diagnostics.
    ///
    /// Strictness is ignored; nothing is excluded or rejected here.
    pub fn check_all(&self) -> Result<Vec<ContentDiagnostic>, LoadError> {
        let mut diagnostics = Vec::new();
        for kind in CollectionKind::ALL {
            for file in self.read_collection(kind)? {
                if let Err(report) = file.outcome {
                    diagnostics.extend(
                        report
                            .into_iter()
                            .map(|e| ContentDiagnostic::from_field_error(&file.path, kind, e)),
                    );
                }
            }
        }
        Ok(diagnostics)
    }

    /// Loads every collection, applying the strictness policy.
    ///
    /// # Errors
    ///
    /// - `LoadError::Io` if a directory or file cannot be read
    /// - `LoadError::Invalid` in strict mode when any record fails validation
    pub fn load(&self) -> Result<SiteContent, LoadError> {
        let mut content = SiteContent::default();

        for kind in CollectionKind::ALL {
            let mut accepted = 0usize;
            for file in self.read_collection(kind)? {
                match file.outcome {
                    Ok(entry) => {
                        accepted += 1;
                        push_entry(&mut content, file.slug, file.path, file.body, entry);
                    }
                    Err(report) => {
                        for err in report {
                            let diagnostic = ContentDiagnostic::from_field_error(&file.path, kind, err);
                            if !self.strict {
                                tracing::warn!(
                                    event = Event::ContentRejected.as_str(),
                                    path = %diagnostic.path.display(),
                                    field = %diagnostic.field,
                                    code = diagnostic.code,
                                    message = %diagnostic.message,
                                );
                            }
                            content.diagnostics.push(diagnostic);
                        }
                    }
                }
            }
            tracing::info!(
                event = Event::CollectionLoaded.as_str(),
                collection = kind.as_str(),
                count = accepted,
            );
        }

        if self.strict && !content.diagnostics.is_empty() {
            tracing::error!(
                event = Event::ContentLoadFailed.as_str(),
                errors = content.diagnostics.len(),
            );
            return Err(LoadError::Invalid {
                diagnostics: content.diagnostics,
            });
        }

        tracing::info!(
            event = Event::ContentLoaded.as_str(),
            records = content.len(),
            excluded = content.diagnostics.len(),
        );
        Ok(content)
    }

    /// Reads every content file of one collection, sorted by file name.
    fn read_collection(&self, kind: CollectionKind) -> Result<Vec<LoadedFile>, LoadError> {
        let dir = self.collection_dir(kind);
        if !dir.is_dir() {
            tracing::debug!(
                event = Event::CollectionMissing.as_str(),
                path = %dir.display(),
            );
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| LoadError::io(&dir, e))? {
            let path = entry.map_err(|e| LoadError::io(&dir, e))?.path();
            let is_content = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| CONTENT_EXTENSIONS.contains(&ext));
            if path.is_file() && is_content {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .into_iter()
            .map(|path| self.read_file(kind, path))
            .collect()
    }

    fn read_file(&self, kind: CollectionKind, path: PathBuf) -> Result<LoadedFile, LoadError> {
        let source = fs::read_to_string(&path).map_err(|e| LoadError::io(&path, e))?;
        let slug = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (body, outcome) = match frontmatter::parse(&source) {
            Ok(doc) => (doc.body, self.validator.validate(kind, &doc.data)),
            Err(e) => {
                let mut report = ValidationReport::new();
                report.push(FieldError::new(
                    SchemaErrorCode::SchemaTypeError,
                    "$root",
                    e.to_string(),
                ));
                (String::new(), Err(report))
            }
        };

        Ok(LoadedFile {
            slug,
            path,
            body,
            outcome,
        })
    }
}

fn push_entry(content: &mut SiteContent, slug: String, path: PathBuf, body: String, entry: Entry) {
    match entry {
        Entry::Education(data) => content.education.push(ContentEntry { slug, path, body, data }),
        Entry::Experience(data) => content.experience.push(ContentEntry { slug, path, body, data }),
        Entry::Posts(data) => content.posts.push(ContentEntry { slug, path, body, data }),
        Entry::Resume(data) => content.resume.push(ContentEntry { slug, path, body, data }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, collection: &str, name: &str, contents: &str) {
        let collection_dir = dir.join(collection);
        fs::create_dir_all(&collection_dir).unwrap();
        fs::write(collection_dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_content_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ContentLoader::new(temp_dir.path().join("nope"));

        let content = loader.load().unwrap();
        assert!(content.is_empty());
        assert!(loader.check_all().unwrap().is_empty());
    }

    #[test]
    fn test_loads_valid_post_with_slug_and_body() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "posts",
            "hello-world.md",
            "---\ntitle: Hello world\npublished: 2024-03-15\n---\nFirst post.\n",
        );

        let content = ContentLoader::new(temp_dir.path()).load().unwrap();
        assert_eq!(content.posts.len(), 1);
        assert_eq!(content.posts[0].slug, "hello-world");
        assert_eq!(content.posts[0].body, "First post.\n");
        assert_eq!(content.posts[0].data.title, "Hello world");
    }

    #[test]
    fn test_non_content_files_ignored() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "posts", "notes.txt", "not content");
        write(temp_dir.path(), "posts", "cover.png", "binary-ish");

        let content = ContentLoader::new(temp_dir.path()).load().unwrap();
        assert!(content.posts.is_empty());
    }

    #[test]
    fn test_strict_mode_blocks_on_invalid_record() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "education",
            "msc.md",
            "---\ntitle: MSc Computer Science\nstart: 2021-09-01\nend: 2020-06-30\n---\n",
        );

        let err = ContentLoader::new(temp_dir.path()).load().unwrap_err();
        match err {
            LoadError::Invalid { diagnostics } => {
                assert_eq!(diagnostics.len(), 1);
                assert_eq!(diagnostics[0].field, "end");
                assert_eq!(diagnostics[0].code, "FOLIO_SCHEMA_ORDER_ERROR");
                assert!(diagnostics[0].path.ends_with("msc.md"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_lenient_mode_excludes_invalid_record() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "experience",
            "good.md",
            "---\ntitle: Backend engineer\nstart: 2020-01-01\n---\n",
        );
        write(
            temp_dir.path(),
            "experience",
            "bad.md",
            "---\ntitle: Bad\nstart: 2020-01-01\n---\n",
        );

        let content = ContentLoader::new(temp_dir.path())
            .with_strict(false)
            .load()
            .unwrap();
        assert_eq!(content.experience.len(), 1);
        assert_eq!(content.experience[0].slug, "good");
        assert_eq!(content.diagnostics.len(), 1);
        assert_eq!(content.diagnostics[0].field, "title");
    }

    #[test]
    fn test_missing_frontmatter_reported_at_root() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "resume", "about.md", "# About me\n");

        let diagnostics = ContentLoader::new(temp_dir.path()).check_all().unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, "$root");
        assert_eq!(diagnostics[0].collection, CollectionKind::Resume);
        assert_eq!(diagnostics[0].code, "FOLIO_SCHEMA_TYPE_ERROR");
    }

    #[test]
    fn test_check_all_reports_every_field() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "posts",
            "broken.md",
            "---\ntitle: Nope\npublished: yesterday\ntags: [ok]\n---\n",
        );

        let diagnostics = ContentLoader::new(temp_dir.path()).check_all().unwrap();
        let fields: Vec<_> = diagnostics.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "published"]);
    }

    #[test]
    fn test_files_load_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.md", "a.md", "c.markdown"] {
            write(
                temp_dir.path(),
                "resume",
                name,
                "---\ntitle: About\n---\n",
            );
        }

        let content = ContentLoader::new(temp_dir.path()).load().unwrap();
        let slugs: Vec<_> = content.resume.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
    }
}
