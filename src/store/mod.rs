use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

pub mod memory;
pub mod query;
pub mod remote;
pub mod seed;

pub use memory::MemoryStore;
pub use query::{Condition, ConditionGroup, QueryParams};
pub use remote::RemoteStore;

pub mod collections {
    pub const JOBS: &str = "jobs";
    pub const APPLICATIONS: &str = "applications";
    pub const JOB_ALERTS: &str = "job_alerts";
    pub const RESUMES: &str = "resumes";
    pub const INTERVIEW_QUESTIONS: &str = "interview_questions";
}

/// A stored record: an identifier plus a flat bag of named fields. The store
/// owns the schema; everything beyond the id is carried as loose JSON and
/// shaped by the entity normalizers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Id", default)]
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.fields.get(field).and_then(Value::as_i64)
    }

    pub fn boolean(&self, field: &str) -> Option<bool> {
        self.fields.get(field).and_then(Value::as_bool)
    }
}

/// A partial update: only the named fields are merged into the stored record;
/// the identifier itself is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RecordPatch {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    pub fn set(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }
}

/// The record-store boundary. One implementation talks to the hosted record
/// API, the other is the in-memory fallback; services only ever see this
/// trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Field-filtered, sorted, paginated query over a collection.
    async fn fetch(&self, collection: &str, params: QueryParams) -> Result<Vec<Record>>;

    async fn get_by_id(&self, collection: &str, id: i64) -> Result<Option<Record>>;

    /// Creates the given records, assigning identifiers; returns them in
    /// input order with ids filled in.
    async fn create(&self, collection: &str, records: Vec<Record>) -> Result<Vec<Record>>;

    /// Applies a batch of partial updates as one unit; no patch is applied
    /// unless every target record exists.
    async fn update(&self, collection: &str, patches: Vec<RecordPatch>) -> Result<Vec<Record>>;

    async fn delete(&self, collection: &str, ids: Vec<i64>) -> Result<()>;
}
