//! Shared cluster-object metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a cluster object by kind, name and namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub kind: String,
    pub name: String,
    pub namespace: String,
}

impl ObjectRef {
    pub fn new(kind: &str, name: &str, namespace: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}/{}", self.kind, self.name)
        } else {
            write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
        }
    }
}

/// Status condition reported on a cluster object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    pub reason: String,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Condition {
    pub fn is_ready(&self) -> bool {
        self.condition_type == "Ready" && self.status == "True"
    }
}

/// Display status derived from an object's conditions and suspend flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyStatus {
    Ready,
    Reconciling,
    NotReady,
    Suspended,
    Unknown,
}

impl fmt::Display for ReadyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "Ready"),
            Self::Reconciling => write!(f, "Reconciling"),
            Self::NotReady => write!(f, "Not Ready"),
            Self::Suspended => write!(f, "Suspended"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Suspension wins over everything; otherwise the `Ready` condition
/// decides, with a `Progressing` reason shown as reconciling.
pub fn ready_status(conditions: &[Condition], suspended: bool) -> ReadyStatus {
    if suspended {
        return ReadyStatus::Suspended;
    }
    match conditions
        .iter()
        .find(|condition| condition.condition_type == "Ready")
    {
        Some(condition) if condition.status == "True" => ReadyStatus::Ready,
        Some(condition) if condition.reason == "Progressing" => ReadyStatus::Reconciling,
        Some(_) => ReadyStatus::NotReady,
        None => ReadyStatus::Unknown,
    }
}

/// Message of the `Ready` condition, used as the row's status detail.
pub fn ready_message(conditions: &[Condition]) -> Option<String> {
    conditions
        .iter()
        .find(|condition| condition.condition_type == "Ready")
        .map(|condition| condition.message.clone())
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(status: &str, reason: &str) -> Condition {
        Condition {
            condition_type: "Ready".to_string(),
            status: status.to_string(),
            reason: reason.to_string(),
            message: "stored artifact".to_string(),
            timestamp: None,
        }
    }

    #[test]
    fn ready_condition_drives_status() {
        assert_eq!(
            ready_status(&[ready("True", "Succeeded")], false),
            ReadyStatus::Ready
        );
        assert_eq!(
            ready_status(&[ready("False", "Progressing")], false),
            ReadyStatus::Reconciling
        );
        assert_eq!(
            ready_status(&[ready("False", "FetchFailed")], false),
            ReadyStatus::NotReady
        );
        assert_eq!(ready_status(&[], false), ReadyStatus::Unknown);
    }

    #[test]
    fn suspension_overrides_conditions() {
        assert_eq!(
            ready_status(&[ready("True", "Succeeded")], true),
            ReadyStatus::Suspended
        );
    }

    #[test]
    fn ready_message_skips_empty() {
        assert_eq!(
            ready_message(&[ready("True", "Succeeded")]).as_deref(),
            Some("stored artifact")
        );
        let mut blank = ready("True", "Succeeded");
        blank.message.clear();
        assert_eq!(ready_message(&[blank]), None);
    }
}
