//! # Command Layer
//!
//! Each record operation lives in its own submodule as a plain function over a
//! [`DocumentStore`](crate::store::DocumentStore) and an
//! [`AssetManager`](crate::assets::AssetManager). This is where the upload
//! lifecycle is wired around the collection repository.
//!
//! ## Ordering Rules
//!
//! The order of document writes and file writes is what keeps the two in step:
//!
//! - **create**: store upload → persist record. Persist fails → delete upload.
//! - **update**: store new upload → persist record → delete old upload.
//!   Persist fails → delete new upload, old one stays referenced.
//! - **delete**: persist removal → delete the record's upload.
//!
//! An upload is never deleted while a persisted record still points at it.
//! The worst case after a crash is an unreferenced file, which `doctor` sweeps.
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings:
//! - `affected_records`: records created, updated or deleted
//! - `listed_records`: records to display
//! - `messages`: leveled messages for the UI to render
//!
//! ## Command Modules
//!
//! - [`list`]: List a collection
//! - [`create`]: Create a record, with optional upload
//! - [`update`]: Merge fields into a record, with optional replacement upload
//! - [`delete`]: Remove a record and its upload
//! - [`doctor`]: Sweep orphaned uploads, report dangling references

use crate::model::Record;
use serde::Serialize;

pub mod create;
pub mod delete;
pub mod doctor;
pub mod helpers;
pub mod list;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
