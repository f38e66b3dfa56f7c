//! Create-or-edit form state for one ordered collection.

use std::sync::Arc;

use models::Collection;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use super::domain::{OrderedRecord, RecordPatch};
use super::repository::OrderedRepository;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

pub struct FormController {
    repo: Arc<dyn OrderedRepository>,
    collection: Collection,
    mode: FormMode,
    values: Map<String, Value>,
    alert: Option<String>,
}

impl FormController {
    pub fn new(repo: Arc<dyn OrderedRepository>, collection: Collection) -> Self {
        Self { repo, collection, mode: FormMode::Create, values: Map::new(), alert: None }
    }

    pub fn mode(&self) -> FormMode { self.mode }

    pub fn values(&self) -> &Map<String, Value> { &self.values }

    /// Message for the last failed submission, if any.
    pub fn alert(&self) -> Option<&str> { self.alert.as_deref() }

    pub fn set(&mut self, field: &str, value: Value) {
        self.values.insert(field.to_string(), value);
    }

    /// Replace all values, e.g. from a submitted JSON body.
    pub fn fill(&mut self, values: Map<String, Value>) {
        self.values = values;
    }

    /// Switch to editing `record`, pre-populating its payload.
    pub fn begin_edit(&mut self, record: &OrderedRecord) {
        self.mode = FormMode::Edit(record.id);
        self.values = record.payload.clone();
        self.alert = None;
    }

    pub fn reset(&mut self) {
        self.mode = FormMode::Create;
        self.values.clear();
        self.alert = None;
    }

    fn missing_required(&self) -> Vec<&'static str> {
        self.collection
            .fields()
            .iter()
            .filter(|f| f.required)
            .filter(|f| match self.values.get(f.name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(|f| f.name)
            .collect()
    }

    /// Create or update depending on the mode. On success the form is cleared
    /// and returns to `Create`; on failure the values stay and an alert is set.
    pub async fn submit(&mut self) -> Result<OrderedRecord, ServiceError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            let msg = format!("Please fill in: {}", missing.join(", "));
            self.alert = Some(msg.clone());
            return Err(ServiceError::Validation(msg));
        }
        let result = match self.mode {
            FormMode::Create => self.repo.create(self.collection, Value::Object(self.values.clone())).await,
            FormMode::Edit(id) => {
                let patch = RecordPatch { fields: self.values.clone(), display_order: None };
                self.repo.update(self.collection, id, patch).await
            }
        };
        match result {
            Ok(rec) => {
                debug!(collection = %self.collection, id = %rec.id, "form_submitted");
                self.reset();
                Ok(rec)
            }
            Err(e) => {
                warn!(collection = %self.collection, error = %e, "form_submit_failed");
                self.alert = Some(format!("Error saving {}: {}", self.collection, e));
                Err(e)
            }
        }
    }
}
