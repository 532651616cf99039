//! Cluster events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::object::ObjectRef;
use crate::sort::RowAccess;
use crate::utils::format_age;

/// A cluster event involving a GitOps object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Event {
    /// `Normal` or `Warning`.
    pub event_type: String,
    pub reason: String,
    pub message: String,
    pub component: String,
    pub involved_object: ObjectRef,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Event {
    pub fn is_warning(&self) -> bool {
        self.event_type == "Warning"
    }
}

impl RowAccess for Event {
    fn attr(&self, key: &str) -> Option<String> {
        match key {
            "type" => Some(self.event_type.clone()),
            "reason" => Some(self.reason.clone()),
            "message" => (!self.message.is_empty()).then(|| self.message.clone()),
            "component" => (!self.component.is_empty()).then(|| self.component.clone()),
            "object" => Some(self.involved_object.to_string()),
            "age" => self.timestamp.map(format_age),
            _ => None,
        }
    }
}
