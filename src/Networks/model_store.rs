//! # Model Store
//!
//! Narrow interface to the store of model records: `query(criteria)` returns matching
//! records, `update(id, fields)` sets fields of one record. Criteria are a JSON object
//! matched by field equality, `{}` or `null` match everything:
//! ```json
//! { "num_nodes": 3, "reactionsCounted": false }
//! ```
//! `JsonModelStore` keeps the records as a JSON array in a file and rewrites the file
//! after every update. `InMemoryStore` is the same without a file.
use super::errors::NetworkError;
use crate::Utils::load_from_file::load_and_validate_records;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// one stored model: its id, its text and whatever else was recorded about it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(rename = "ID", deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub model: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// stores fill "ID" with strings or with integers
fn id_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "ID must be a string or a number, got {}",
            other
        ))),
    }
}

impl ModelRecord {
    pub fn new(id: &str, model: &str) -> Self {
        Self {
            id: id.to_string(),
            model: model.to_string(),
            fields: Map::new(),
        }
    }
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "ID" => Some(Value::String(self.id.clone())),
            "model" => Some(Value::String(self.model.clone())),
            _ => self.fields.get(name).cloned(),
        }
    }
    pub fn matches(&self, criteria: &Value) -> bool {
        match criteria {
            Value::Null => true,
            Value::Object(conditions) => conditions
                .iter()
                .all(|(name, expected)| match (name.as_str(), expected) {
                    ("ID", Value::Number(id)) => self.id == id.to_string(),
                    _ => self.field(name).as_ref() == Some(expected),
                }),
            _ => false,
        }
    }
    fn set_fields(&mut self, fields: Map<String, Value>) {
        for (name, value) in fields {
            if name == "model" {
                if let Value::String(text) = &value {
                    self.model = text.clone();
                    continue;
                }
            }
            self.fields.insert(name, value);
        }
    }
}

pub trait ModelStore {
    fn query(&self, criteria: &Value) -> Result<Vec<ModelRecord>, NetworkError>;
    fn update(&mut self, id: &str, fields: Map<String, Value>) -> Result<(), NetworkError>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<ModelRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_records(records: Vec<ModelRecord>) -> Self {
        Self { records }
    }
    pub fn insert(&mut self, record: ModelRecord) {
        self.records.push(record);
    }
    pub fn get(&self, id: &str) -> Option<&ModelRecord> {
        self.records.iter().find(|r| r.id == id)
    }
    pub fn records(&self) -> &[ModelRecord] {
        &self.records
    }
}

impl ModelStore for InMemoryStore {
    fn query(&self, criteria: &Value) -> Result<Vec<ModelRecord>, NetworkError> {
        if !(criteria.is_null() || criteria.is_object()) {
            return Err(NetworkError::Store(format!(
                "query criteria must be a JSON object, got {}",
                criteria
            )));
        }
        let found: Vec<ModelRecord> = self
            .records
            .iter()
            .filter(|r| r.matches(criteria))
            .cloned()
            .collect();
        debug!("{} of {} records match {}", found.len(), self.records.len(), criteria);
        Ok(found)
    }
    fn update(&mut self, id: &str, fields: Map<String, Value>) -> Result<(), NetworkError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| NetworkError::Store(format!("no model with ID '{}'", id)))?;
        record.set_fields(fields);
        Ok(())
    }
}

/// records kept as a JSON array in one file
#[derive(Debug, Clone)]
pub struct JsonModelStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl JsonModelStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, NetworkError> {
        let path = path.as_ref().to_path_buf();
        let records = load_and_validate_records(&path.to_string_lossy())?;
        Ok(Self {
            path,
            inner: InMemoryStore::from_records(records),
        })
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn records(&self) -> &[ModelRecord] {
        self.inner.records()
    }
    pub fn save(&self) -> Result<(), NetworkError> {
        let content = serde_json::to_string_pretty(self.inner.records())?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ModelStore for JsonModelStore {
    fn query(&self, criteria: &Value) -> Result<Vec<ModelRecord>, NetworkError> {
        self.inner.query(criteria)
    }
    fn update(&mut self, id: &str, fields: Map<String, Value>) -> Result<(), NetworkError> {
        self.inner.update(id, fields)?;
        self.save()
    }
}
