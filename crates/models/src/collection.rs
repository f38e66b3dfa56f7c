//! Declarative schemas for the ordered content collections.
//!
//! Every admin-managed collection shares one storage shape (`ordered_record`)
//! and differs only by the field table below. Payloads are JSON objects that
//! must match the table: unknown keys and wrong kinds are rejected, required
//! fields must be present and non-blank.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;
use crate::reel;

/// Keys owned by the record envelope; never accepted inside a payload.
pub const RESERVED_KEYS: [&str; 5] = ["id", "collection", "display_order", "created_at", "updated_at"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Bool,
    TextList,
    Object,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Integer => "an integer",
            FieldKind::Bool => "a boolean",
            FieldKind::TextList => "a list of strings",
            FieldKind::Object => "an object",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::TextList => value
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false),
            FieldKind::Object => value.is_object(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Allowed values for text fields; empty means unrestricted.
    pub choices: &'static [&'static str],
}

const fn req(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind, required: true, choices: &[] }
}

const fn opt(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind, required: false, choices: &[] }
}

use FieldKind::*;

const SERVICE_FIELDS: &[FieldSpec] = &[
    req("title", Text),
    opt("icon", Text),
    req("short_description", Text),
    req("description", Text),
    opt("deliverables", TextList),
    opt("ideal_client", Text),
    opt("pricing_note", Text),
    opt("featured", Bool),
];

const TESTIMONIAL_FIELDS: &[FieldSpec] = &[
    req("name", Text),
    opt("role", Text),
    opt("company", Text),
    opt("image", Text),
    req("rating", Integer),
    req("text", Text),
    opt("project_type", Text),
    opt("results", Text),
    opt("featured", Bool),
];

const TEAM_FIELDS: &[FieldSpec] = &[
    req("name", Text),
    opt("roles", TextList),
    opt("email", Text),
    opt("phone", Text),
    opt("bio", Text),
    opt("image", Text),
];

const STOCK_VIDEO_FIELDS: &[FieldSpec] = &[
    req("title", Text),
    req("category", Text),
    req("video_url", Text),
    opt("thumbnail_url", Text),
    opt("is_free", Bool),
];

const HOMEPAGE_STAT_FIELDS: &[FieldSpec] = &[
    req("label", Text),
    req("value", Text),
    opt("icon", Text),
];

const ABOUT_TOOL_FIELDS: &[FieldSpec] = &[
    req("name", Text),
    opt("category", Text),
    opt("icon_url", Text),
];

const ABOUT_VALUE_FIELDS: &[FieldSpec] = &[
    req("title", Text),
    req("description", Text),
    opt("icon", Text),
];

const ABOUT_JOURNEY_FIELDS: &[FieldSpec] = &[
    req("year", Text),
    req("title", Text),
    opt("description", Text),
];

const REEL_FIELDS: &[FieldSpec] = &[
    req("title", Text),
    opt("description", Text),
    req("embed_url", Text),
    opt("thumbnail_url", Text),
    req("genre", Text),
    opt("platform", Text),
    opt("tools", TextList),
    opt("stats", Object),
    opt("client_name", Text),
];

const UPLOAD_FIELDS: &[FieldSpec] = &[
    req("filename", Text),
    req("file_url", Text),
    FieldSpec { name: "file_type", kind: Text, required: true, choices: &["video", "image"] },
    opt("category", Text),
    opt("tags", TextList),
    opt("metadata", Object),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
    Services,
    Testimonials,
    Team,
    StockVideos,
    HomepageStats,
    AboutTools,
    AboutValues,
    AboutJourney,
    Reels,
    Uploads,
}

impl Collection {
    pub const ALL: [Collection; 10] = [
        Collection::Services,
        Collection::Testimonials,
        Collection::Team,
        Collection::StockVideos,
        Collection::HomepageStats,
        Collection::AboutTools,
        Collection::AboutValues,
        Collection::AboutJourney,
        Collection::Reels,
        Collection::Uploads,
    ];

    /// URL segment and stored `collection` column value.
    pub fn slug(self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Testimonials => "testimonials",
            Collection::Team => "team",
            Collection::StockVideos => "stock-videos",
            Collection::HomepageStats => "homepage-stats",
            Collection::AboutTools => "about-tools",
            Collection::AboutValues => "about-values",
            Collection::AboutJourney => "about-journey",
            Collection::Reels => "reels",
            Collection::Uploads => "uploads",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Collection::Services => SERVICE_FIELDS,
            Collection::Testimonials => TESTIMONIAL_FIELDS,
            Collection::Team => TEAM_FIELDS,
            Collection::StockVideos => STOCK_VIDEO_FIELDS,
            Collection::HomepageStats => HOMEPAGE_STAT_FIELDS,
            Collection::AboutTools => ABOUT_TOOL_FIELDS,
            Collection::AboutValues => ABOUT_VALUE_FIELDS,
            Collection::AboutJourney => ABOUT_JOURNEY_FIELDS,
            Collection::Reels => REEL_FIELDS,
            Collection::Uploads => UPLOAD_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Validate a complete payload (create, or the merged result of an update).
    pub fn validate_payload(self, payload: &Map<String, Value>) -> Result<(), ModelError> {
        self.validate_patch(payload)?;
        for field in self.fields().iter().filter(|f| f.required) {
            match payload.get(field.name) {
                None | Some(Value::Null) => {
                    return Err(ModelError::Validation(format!("{}: {} is required", self, field.name)));
                }
                Some(Value::String(s)) if s.trim().is_empty() => {
                    return Err(ModelError::Validation(format!("{}: {} must not be blank", self, field.name)));
                }
                Some(_) => {}
            }
        }
        if self == Collection::Reels {
            if let Some(url) = payload.get("embed_url").and_then(Value::as_str) {
                if reel::is_missing_reel_id(url) {
                    return Err(ModelError::Validation(format!("{}: embed_url has no reel id", self)));
                }
            }
        }
        Ok(())
    }

    /// Validate the keys and kinds of a partial payload; required-ness is not checked.
    pub fn validate_patch(self, patch: &Map<String, Value>) -> Result<(), ModelError> {
        for (key, value) in patch {
            if RESERVED_KEYS.contains(&key.as_str()) {
                return Err(ModelError::Validation(format!("{key} cannot be set in the payload")));
            }
            let field = self
                .field(key)
                .ok_or_else(|| ModelError::Validation(format!("{}: unknown field {key}", self)))?;
            if value.is_null() {
                continue;
            }
            if !field.kind.accepts(value) {
                return Err(ModelError::Validation(format!(
                    "{}: {key} must be {}",
                    self,
                    field.kind.describe()
                )));
            }
            if !field.choices.is_empty() {
                let v = value.as_str().unwrap_or_default();
                if !field.choices.contains(&v) {
                    return Err(ModelError::Validation(format!(
                        "{}: {key} must be one of {}",
                        self,
                        field.choices.join(", ")
                    )));
                }
            }
        }
        Ok(())
    }

    /// Collection-specific cleanup applied before persisting.
    pub fn normalize(self, payload: &mut Map<String, Value>) {
        if self == Collection::Reels {
            if let Some(Value::String(url)) = payload.get_mut("embed_url") {
                *url = reel::normalize_embed_url(url);
            }
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Collection {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| ModelError::Validation(format!("unknown collection {s}")))
    }
}

/// Shallow-merge `patch` into `payload`; a `null` value removes the key.
pub fn merge_payload(payload: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if value.is_null() {
            payload.remove(&key);
        } else {
            payload.insert(key, value);
        }
    }
}
