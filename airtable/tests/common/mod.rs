//! Shared fixtures and record types for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use airtable::{
    Attachment, Checkbox, Client, Date, FormulaResult, LongText, MultipleSelect, Rating, Record,
    RecordLink, Text,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use wiremock::MockServer;

pub const BASE_ID: &str = "appTEST";
pub const API_KEY: &str = "keyTEST";

/// How a test treats its fixture file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixtureMode {
    /// Compare the actual output against the stored fixture.
    Verify,
    /// Overwrite the stored fixture with the actual output.
    Record,
}

/// Switch to `FixtureMode::Record` to regenerate every fixture from live output.
pub const FIXTURE_MODE: FixtureMode = FixtureMode::Verify;

/// Fixtures in the mode shared by every test.
pub fn fixtures() -> Fixtures {
    Fixtures::new(FIXTURE_MODE)
}

/// JSON fixtures under `tests/fixtures`.
pub struct Fixtures {
    dir: PathBuf,
    mode: FixtureMode,
}

impl Fixtures {
    pub fn new(mode: FixtureMode) -> Self {
        Self {
            dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
            mode,
        }
    }

    pub fn bytes(&self, name: &str) -> Vec<u8> {
        let path = self.dir.join(name);
        fs::read(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
    }

    pub fn json(&self, name: &str) -> Value {
        serde_json::from_slice(&self.bytes(name))
            .unwrap_or_else(|e| panic!("fixture {name} is not JSON: {e}"))
    }

    /// Verifies `actual` against the fixture, or records it.
    ///
    /// Bodies are compared as parsed JSON so formatting does not matter.
    pub fn check(&self, name: &str, actual: &[u8]) {
        let actual: Value = serde_json::from_slice(actual).expect("response body is not JSON");
        match self.mode {
            FixtureMode::Record => {
                let pretty = serde_json::to_string_pretty(&actual).unwrap();
                fs::write(self.dir.join(name), pretty + "\n").unwrap();
            }
            FixtureMode::Verify => {
                assert_eq!(actual, self.json(name), "output differs from fixture {name}");
            }
        }
    }

    pub fn assert_differs(&self, name: &str, actual: &[u8]) {
        let actual: Value = serde_json::from_slice(actual).expect("response body is not JSON");
        assert_ne!(actual, self.json(name), "output should differ from fixture {name}");
    }
}

/// A record covering every column kind.
#[derive(Debug, Default, Clone, PartialEq, Record)]
pub struct MainTestRecord {
    #[airtable(id)]
    pub id: String,
    #[airtable(created_time)]
    pub created_time: Option<DateTime<Utc>>,
    #[airtable(rename = "When?")]
    pub when: Date,
    #[airtable(rename = "Rating")]
    pub rating: Rating,
    #[airtable(rename = "Name")]
    pub name: Text,
    #[airtable(rename = "Notes")]
    pub notes: LongText,
    #[airtable(rename = "Attachments")]
    pub attachments: Attachment,
    #[airtable(rename = "Check")]
    pub check: Checkbox,
    #[airtable(rename = "Animals")]
    pub animals: MultipleSelect,
    #[airtable(rename = "Cats")]
    pub cats: RecordLink,
    #[airtable(rename = "Formula")]
    pub formula: FormulaResult,
    #[airtable(skip)]
    pub seen_locally: bool,
}

pub fn client_for(server: &MockServer) -> Client {
    Client::builder(API_KEY, BASE_ID)
        .endpoint(format!("{}/v0", server.uri()))
        .build()
        .unwrap()
}

pub fn table_path(table: &str) -> String {
    format!("/v0/{BASE_ID}/{table}")
}
