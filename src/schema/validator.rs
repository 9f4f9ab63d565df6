//! Schema validator for content front-matter
//!
//! Validation runs in two phases over one raw record:
//!
//! 1. Field phase: every declared field is coerced (string to date, string to
//!    boolean), defaults are resolved for absent optional fields, then
//!    length/format constraints are checked on the coerced value.
//! 2. Cross-field phase: date ordering checks run over the typed draft, but
//!    only for pairs whose two fields both survived phase 1.
//!
//! Both phases append to the same `ValidationReport`. Nothing short-circuits
//! on the first failure. Undeclared keys are ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use url::Url;

use super::errors::{FieldError, SchemaErrorCode, SchemaResult, ValidationReport};
use super::types::{
    CollectionKind, EducationEntry, Entry, ExperienceEntry, PostEntry, ResumeEntry,
    EXPERIENCE_SUBTITLE_MAX_CHARS, POST_SUBTITLE_MAX_CHARS, TAG_MAX_CHARS,
};

pub const END_BEFORE_START: &str = "End date cannot be earlier than start date.";
pub const EDITED_BEFORE_PUBLISHED: &str = "Edited date cannot be earlier than published date.";

/// Validates raw records against the schema of their collection.
///
/// Validation is pure and deterministic. The validator holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validates a raw record for the given collection.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationReport` holding every field error found.
    pub fn validate(&self, kind: CollectionKind, raw: &Value) -> SchemaResult<Entry> {
        match kind {
            CollectionKind::Education => self.validate_education(raw).map(Entry::Education),
            CollectionKind::Experience => self.validate_experience(raw).map(Entry::Experience),
            CollectionKind::Posts => self.validate_post(raw).map(Entry::Posts),
            CollectionKind::Resume => self.validate_resume(raw).map(Entry::Resume),
        }
    }

    pub fn validate_education(&self, raw: &Value) -> SchemaResult<EducationEntry> {
        let mut fields = FieldReader::new(raw)?;
        let kind = CollectionKind::Education;

        let title = fields.title(kind);
        let location = fields.optional_string("location", None);
        let start = fields.required_date("start");
        let end = fields.optional_date("end");
        let link = fields.optional_string("link", None);

        if let (Some(start), Some(Some(end))) = (start, end) {
            fields.check_order("end", start, end, END_BEFORE_START);
        }

        match (title, location, start, end, link) {
            (Some(title), Some(location), Some(start), Some(end), Some(link)) => {
                fields.finish(EducationEntry {
                    title,
                    location,
                    start,
                    end,
                    link,
                })
            }
            _ => Err(fields.into_report()),
        }
    }

    pub fn validate_experience(&self, raw: &Value) -> SchemaResult<ExperienceEntry> {
        let mut fields = FieldReader::new(raw)?;
        let kind = CollectionKind::Experience;

        let title = fields.title(kind);
        let sub_title = fields.optional_string("subTitle", Some(EXPERIENCE_SUBTITLE_MAX_CHARS));
        let start = fields.required_date("start");
        let end = fields.optional_date("end");
        let link = fields.optional_string("link", None);

        if let (Some(start), Some(Some(end))) = (start, end) {
            fields.check_order("end", start, end, END_BEFORE_START);
        }

        match (title, sub_title, start, end, link) {
            (Some(title), Some(sub_title), Some(start), Some(end), Some(link)) => {
                fields.finish(ExperienceEntry {
                    title,
                    sub_title,
                    start,
                    end,
                    link,
                })
            }
            _ => Err(fields.into_report()),
        }
    }

    pub fn validate_post(&self, raw: &Value) -> SchemaResult<PostEntry> {
        let mut fields = FieldReader::new(raw)?;
        let kind = CollectionKind::Posts;

        let title = fields.title(kind);
        let sub_title = fields.optional_string("subTitle", Some(POST_SUBTITLE_MAX_CHARS));
        let tags = fields.tags("tags");
        let published = fields.required_date("published");
        let edited = fields.optional_date("edited");
        let draft = fields.boolean_or("draft", false);
        let source = fields.optional_url("source");

        if let (Some(published), Some(Some(edited))) = (published, edited) {
            fields.check_order("edited", published, edited, EDITED_BEFORE_PUBLISHED);
        }

        match (title, sub_title, tags, published, edited, draft, source) {
            (
                Some(title),
                Some(sub_title),
                Some(tags),
                Some(published),
                Some(edited),
                Some(draft),
                Some(source),
            ) => fields.finish(PostEntry {
                title,
                sub_title,
                tags,
                published,
                edited,
                draft,
                source,
            }),
            _ => Err(fields.into_report()),
        }
    }

    pub fn validate_resume(&self, raw: &Value) -> SchemaResult<ResumeEntry> {
        let mut fields = FieldReader::new(raw)?;

        let title = fields.title(CollectionKind::Resume);
        let photo = fields.optional_string("photo", None);

        match (title, photo) {
            (Some(title), Some(photo)) => fields.finish(ResumeEntry { title, photo }),
            _ => Err(fields.into_report()),
        }
    }
}

/// Reads fields out of one raw record, collecting errors as it goes.
///
/// Required readers return `None` when the field failed. Optional readers
/// return `None` when the field failed and `Some(None)` when it was absent.
struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    report: ValidationReport,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a Value) -> SchemaResult<Self> {
        match raw.as_object() {
            Some(obj) => Ok(Self {
                obj,
                report: ValidationReport::new(),
            }),
            None => {
                let mut report = ValidationReport::new();
                report.push(FieldError::type_mismatch("$root", "object", json_type_name(raw)));
                Err(report)
            }
        }
    }

    fn field(&self, name: &str) -> Option<&'a Value> {
        self.obj.get(name)
    }

    fn title(&mut self, kind: CollectionKind) -> Option<String> {
        let title = self.required_string("title")?;
        if let Some((min, max)) = kind.title_bounds() {
            if !self.check_length("title", &title, Some(min), Some(max)) {
                return None;
            }
        }
        Some(title)
    }

    fn required_string(&mut self, name: &str) -> Option<String> {
        match self.field(name) {
            None => {
                self.report.push(FieldError::required(name));
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.report
                    .push(FieldError::type_mismatch(name, "string", json_type_name(other)));
                None
            }
        }
    }

    fn optional_string(&mut self, name: &str, max: Option<usize>) -> Option<Option<String>> {
        match self.field(name) {
            None => Some(None),
            Some(Value::String(s)) => {
                if self.check_length(name, s, None, max) {
                    Some(Some(s.clone()))
                } else {
                    None
                }
            }
            Some(other) => {
                self.report
                    .push(FieldError::type_mismatch(name, "string", json_type_name(other)));
                None
            }
        }
    }

    fn required_date(&mut self, name: &str) -> Option<NaiveDate> {
        match self.field(name) {
            None => {
                self.report.push(FieldError::required(name));
                None
            }
            Some(value) => self.date(name, value),
        }
    }

    fn optional_date(&mut self, name: &str) -> Option<Option<NaiveDate>> {
        match self.field(name) {
            None => Some(None),
            Some(value) => self.date(name, value).map(Some),
        }
    }

    fn date(&mut self, name: &str, value: &Value) -> Option<NaiveDate> {
        match value {
            Value::String(_) | Value::Number(_) => {
                let date = coerce_date(value);
                if date.is_none() {
                    self.report.push(FieldError::new(
                        SchemaErrorCode::SchemaTypeError,
                        name,
                        "Invalid date",
                    ));
                }
                date
            }
            other => {
                self.report
                    .push(FieldError::type_mismatch(name, "date", json_type_name(other)));
                None
            }
        }
    }

    fn boolean_or(&mut self, name: &str, default: bool) -> Option<bool> {
        match self.field(name) {
            None => Some(default),
            Some(value) => {
                let coerced = coerce_bool(value);
                if coerced.is_none() {
                    self.report
                        .push(FieldError::type_mismatch(name, "boolean", json_type_name(value)));
                }
                coerced
            }
        }
    }

    fn tags(&mut self, name: &str) -> Option<Vec<String>> {
        let items = match self.field(name) {
            None => return Some(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                self.report
                    .push(FieldError::type_mismatch(name, "array", json_type_name(other)));
                return None;
            }
        };

        let mut tags: Vec<String> = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            let path = format!("{}[{}]", name, i);
            match item {
                Value::String(tag) => {
                    if !self.check_length(&path, tag, None, Some(TAG_MAX_CHARS)) {
                        ok = false;
                    } else if !tags.contains(tag) {
                        tags.push(tag.clone());
                    }
                }
                other => {
                    self.report
                        .push(FieldError::type_mismatch(path, "string", json_type_name(other)));
                    ok = false;
                }
            }
        }

        ok.then_some(tags)
    }

    fn optional_url(&mut self, name: &str) -> Option<Option<Url>> {
        let raw = self.optional_string(name, None)?;
        match raw {
            None => Some(None),
            Some(s) => match Url::parse(&s) {
                Ok(url) => Some(Some(url)),
                Err(_) => {
                    self.report.push(FieldError::new(
                        SchemaErrorCode::SchemaTypeError,
                        name,
                        "Invalid url",
                    ));
                    None
                }
            },
        }
    }

    /// Returns false (and records an error) if `value` is outside the bounds.
    fn check_length(
        &mut self,
        name: &str,
        value: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> bool {
        let len = value.chars().count();
        if let Some(min) = min {
            if len < min {
                self.report.push(FieldError::too_short(name, min));
                return false;
            }
        }
        if let Some(max) = max {
            if len > max {
                self.report.push(FieldError::too_long(name, max));
                return false;
            }
        }
        true
    }

    fn check_order(&mut self, later_name: &str, earlier: NaiveDate, later: NaiveDate, message: &str) {
        if later < earlier {
            self.report.push(FieldError::out_of_order(later_name, message));
        }
    }

    fn finish<T>(self, record: T) -> SchemaResult<T> {
        if self.report.is_empty() {
            Ok(record)
        } else {
            Err(self.report)
        }
    }

    fn into_report(self) -> ValidationReport {
        self.report
    }
}

/// Coerces a front-matter value to a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times (taken in UTC), naive
/// `YYYY-MM-DDTHH:MM:SS`, and integer milliseconds since the Unix epoch.
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Coerces a front-matter value to a boolean.
///
/// Strings are matched case-insensitively against a fixed vocabulary so that
/// `draft: "false"` means false.
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
