//! Content schema subsystem for folio
//!
//! Content records are markdown files whose front-matter is validated against
//! the schema of their collection before anything renders them.
//!
//! # Design Principles
//!
//! - Coercion and defaults before range checks
//! - Cross-field ordering checks only over fields that type-checked
//! - Every error reported, never just the first
//! - Validated records are immutable
//! - Deterministic validation and load order

mod content;
mod errors;
pub mod frontmatter;
mod loader;
mod types;
mod validator;

pub use content::{ContentEntry, SiteContent};
pub use errors::{FieldError, SchemaErrorCode, SchemaResult, ValidationReport};
pub use frontmatter::{Document, FrontmatterError};
pub use loader::{ContentDiagnostic, ContentLoader, LoadError};
pub use types::{
    CollectionKind, EducationEntry, Entry, ExperienceEntry, PostEntry, ResumeEntry,
    TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
pub use validator::{
    coerce_bool, coerce_date, SchemaValidator, EDITED_BEFORE_PUBLISHED, END_BEFORE_START,
};
