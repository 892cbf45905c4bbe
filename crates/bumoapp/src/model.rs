//! # Domain Model: Collections, Records and the Document
//!
//! Everything bumo persists lives in one JSON document with five named arrays:
//!
//! ```text
//! {
//!   "reports":       [ {record}, ... ],
//!   "articles":      [ ... ],
//!   "documentation": [ ... ],
//!   "alumni":        [ ... ],
//!   "structure":     [ ... ]
//! }
//! ```
//!
//! ## Records Are Schema-Loose
//!
//! A [`Record`] is an open, ordered map of fields. The store only owns two of them:
//!
//! - `id`: decimal string, assigned at creation, never rewritten.
//! - `createdAt`: RFC 3339 UTC timestamp, assigned at creation, never rewritten.
//!
//! Every other field belongs to the caller. Articles may or may not carry an
//! `excerpt`, reports may or may not carry a `saldo`; the store does not care.
//!
//! ## Asset Fields
//!
//! Three collections own an image. The field holding the reference differs per
//! collection (see [`Collection::asset_field`]):
//!
//! | Collection      | Field   |
//! |-----------------|---------|
//! | `documentation` | `image` |
//! | `alumni`        | `photo` |
//! | `structure`     | `photo` |
//!
//! The value is an empty string when no image is attached, otherwise a
//! `/uploads/<name>` reference owned by [`crate::assets::AssetManager`].

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::BumoError;

pub const ID_FIELD: &str = "id";
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Caller-supplied record fields, in insertion order.
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Reports,
    Articles,
    Documentation,
    Alumni,
    Structure,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Reports,
        Collection::Articles,
        Collection::Documentation,
        Collection::Alumni,
        Collection::Structure,
    ];

    /// Key of this collection inside the document.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Reports => "reports",
            Collection::Articles => "articles",
            Collection::Documentation => "documentation",
            Collection::Alumni => "alumni",
            Collection::Structure => "structure",
        }
    }

    /// Singular, human-facing name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Collection::Reports => "Report",
            Collection::Articles => "Article",
            Collection::Documentation => "Documentation",
            Collection::Alumni => "Alumni",
            Collection::Structure => "Structure member",
        }
    }

    /// The field holding this collection's image reference, if it has one.
    pub fn asset_field(self) -> Option<&'static str> {
        match self {
            Collection::Documentation => Some("image"),
            Collection::Alumni | Collection::Structure => Some("photo"),
            Collection::Reports | Collection::Articles => None,
        }
    }

    pub fn has_assets(self) -> bool {
        self.asset_field().is_some()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = BumoError;

    /// Accepts the document keys and the legacy Indonesian route names
    /// (`laporan`, `artikel`, `dokumentasi`, `struktur`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reports" | "report" | "laporan" => Ok(Collection::Reports),
            "articles" | "article" | "artikel" => Ok(Collection::Articles),
            "documentation" | "dokumentasi" => Ok(Collection::Documentation),
            "alumni" => Ok(Collection::Alumni),
            "structure" | "struktur" => Ok(Collection::Structure),
            _ => Err(BumoError::UnknownCollection(s.to_string())),
        }
    }
}

fn is_reserved(field: &str) -> bool {
    field == ID_FIELD || field == CREATED_AT_FIELD
}

/// Format used for `createdAt`: `2024-03-31T08:15:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Fields);

impl Record {
    /// Build a record as `{id, ...fields, createdAt}`.
    ///
    /// Caller-supplied `id` and `createdAt` entries in `fields` are dropped.
    pub fn new(id: String, fields: Fields, created_at: DateTime<Utc>) -> Self {
        let mut map = Fields::new();
        map.insert(ID_FIELD.to_string(), Value::String(id));
        for (key, value) in fields {
            if !is_reserved(&key) {
                map.insert(key, value);
            }
        }
        map.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(format_timestamp(created_at)),
        );
        Self(map)
    }

    pub fn id(&self) -> &str {
        self.0.get(ID_FIELD).and_then(Value::as_str).unwrap_or("")
    }

    pub fn created_at(&self) -> Option<&str> {
        self.0.get(CREATED_AT_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Fields {
        &self.0
    }

    pub fn into_fields(self) -> Fields {
        self.0
    }

    /// Shallow merge: present keys replace, absent keys survive.
    /// `id` and `createdAt` are never touched.
    pub fn merge(&mut self, fields: Fields) {
        for (key, value) in fields {
            if !is_reserved(&key) {
                self.0.insert(key, value);
            }
        }
    }

    /// Set a single field, returning the previous value. Reserved fields are refused.
    pub fn set(&mut self, field: &str, value: Value) -> Option<Value> {
        if is_reserved(field) {
            return None;
        }
        self.0.insert(field.to_string(), value)
    }

    /// The record's non-empty asset reference, if its collection has one.
    pub fn asset(&self, collection: Collection) -> Option<&str> {
        collection
            .asset_field()
            .and_then(|field| self.0.get(field))
            .and_then(Value::as_str)
            .filter(|reference| !reference.is_empty())
    }
}

/// The single persisted aggregate.
///
/// Missing keys deserialize as empty arrays, so a loaded document always has
/// all five collections. The Indonesian keys of older data files load into
/// the matching collection and are written back under the English key. Any
/// other top-level key is rejected: a save would otherwise drop it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(default, alias = "laporan")]
    pub reports: Vec<Record>,
    #[serde(default, alias = "artikel")]
    pub articles: Vec<Record>,
    #[serde(default, alias = "dokumentasi")]
    pub documentation: Vec<Record>,
    #[serde(default)]
    pub alumni: Vec<Record>,
    #[serde(default, alias = "struktur")]
    pub structure: Vec<Record>,
}

impl Document {
    pub fn records(&self, collection: Collection) -> &Vec<Record> {
        match collection {
            Collection::Reports => &self.reports,
            Collection::Articles => &self.articles,
            Collection::Documentation => &self.documentation,
            Collection::Alumni => &self.alumni,
            Collection::Structure => &self.structure,
        }
    }

    pub fn records_mut(&mut self, collection: Collection) -> &mut Vec<Record> {
        match collection {
            Collection::Reports => &mut self.reports,
            Collection::Articles => &mut self.articles,
            Collection::Documentation => &mut self.documentation,
            Collection::Alumni => &mut self.alumni,
            Collection::Structure => &mut self.structure,
        }
    }

    /// Move a collection's records out, leaving it empty.
    pub fn take(&mut self, collection: Collection) -> Vec<Record> {
        std::mem::take(self.records_mut(collection))
    }

    /// Every non-empty asset reference held by any record.
    pub fn asset_references(&self) -> BTreeSet<String> {
        Collection::ALL
            .iter()
            .filter(|c| c.has_assets())
            .flat_map(|&c| {
                self.records(c)
                    .iter()
                    .filter_map(move |record| record.asset(c))
            })
            .map(str::to_string)
            .collect()
    }
}
