//! JSON contact plan loader.
//!
//! Reads the `{"contacts": [...]}` format where each record carries
//! `startTime`, `endTime`, `source`, `dest`, `rate`, `owlt` and `contact`
//! (the contact id). Every field is required.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::contact::{Contact, ContactId, NodeId};
use crate::error::PlanError;
use crate::traits::ContactSource;

#[derive(Debug, Deserialize)]
struct PlanDocument {
    contacts: Vec<ContactRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContactRecord {
    start_time: f64,
    end_time: f64,
    source: NodeId,
    dest: NodeId,
    rate: f64,
    owlt: f64,
    contact: ContactId,
}

impl ContactRecord {
    fn into_contact(self) -> Result<Contact, PlanError> {
        Contact::new(
            self.contact,
            self.source,
            self.dest,
            self.start_time,
            self.end_time,
            self.owlt,
            self.rate,
        )
    }
}

/// Parses and validates the contacts of a JSON contact plan.
pub fn parse_contact_plan(json: &str) -> Result<Vec<Contact>, PlanError> {
    let document: PlanDocument = serde_json::from_str(json)?;
    document
        .contacts
        .into_iter()
        .map(ContactRecord::into_contact)
        .collect()
}

/// A contact plan stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonPlanFile {
    path: PathBuf,
}

impl JsonPlanFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem, used to label results.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("contact-plan")
            .to_string()
    }
}

impl ContactSource for JsonPlanFile {
    fn contacts(&self) -> Result<Vec<Contact>, PlanError> {
        let json = fs::read_to_string(&self.path)?;
        parse_contact_plan(&json)
    }
}
