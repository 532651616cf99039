//! Source objects (repositories, charts, buckets)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::object::{ready_message, ready_status, Condition, ObjectRef, ReadyStatus};
use crate::sort::RowAccess;
use crate::utils::{format_age, format_interval};

/// Source kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    GitRepository,
    HelmRepository,
    HelmChart,
    Bucket,
    OciRepository,
}

impl Default for SourceKind {
    fn default() -> Self {
        Self::GitRepository
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitRepository => write!(f, "GitRepository"),
            Self::HelmRepository => write!(f, "HelmRepository"),
            Self::HelmChart => write!(f, "HelmChart"),
            Self::Bucket => write!(f, "Bucket"),
            Self::OciRepository => write!(f, "OCIRepository"),
        }
    }
}

impl From<&str> for SourceKind {
    fn from(s: &str) -> Self {
        match s {
            "HelmRepository" => Self::HelmRepository,
            "HelmChart" => Self::HelmChart,
            "Bucket" => Self::Bucket,
            "OCIRepository" => Self::OciRepository,
            _ => Self::GitRepository,
        }
    }
}

/// A source object fetched from the cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub namespace: String,
    pub cluster_name: String,
    pub kind: SourceKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub revision: String,
    /// Reconciliation interval in seconds, when known.
    #[serde(default)]
    pub interval: Option<u64>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Source {
    pub fn status(&self) -> ReadyStatus {
        ready_status(&self.conditions, self.suspended)
    }

    pub fn message(&self) -> Option<String> {
        ready_message(&self.conditions)
    }

    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef::new(&self.kind.to_string(), &self.name, &self.namespace)
    }
}

impl RowAccess for Source {
    fn attr(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "namespace" => Some(self.namespace.clone()),
            "cluster" => Some(self.cluster_name.clone()),
            "kind" => Some(self.kind.to_string()),
            "status" => Some(self.status().to_string()),
            "message" => self.message(),
            "url" => (!self.url.is_empty()).then(|| self.url.clone()),
            "revision" => (!self.revision.is_empty()).then(|| self.revision.clone()),
            "interval" => self.interval.map(format_interval),
            "age" => self.last_updated.map(format_age),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_display() {
        for kind in [
            SourceKind::GitRepository,
            SourceKind::HelmRepository,
            SourceKind::HelmChart,
            SourceKind::Bucket,
            SourceKind::OciRepository,
        ] {
            assert_eq!(SourceKind::from(kind.to_string().as_str()), kind);
        }
    }

    #[test]
    fn attrs_hide_empty_values() {
        let source = Source {
            name: "podinfo".to_string(),
            namespace: "flux-system".to_string(),
            ..Default::default()
        };
        assert_eq!(source.attr("name").as_deref(), Some("podinfo"));
        assert_eq!(source.attr("url"), None);
        assert_eq!(source.attr("revision"), None);
        assert_eq!(source.attr("interval"), None);
        assert_eq!(source.attr("age"), None);
        assert_eq!(source.attr("bogus"), None);
    }

    #[test]
    fn interval_renders_compactly() {
        let source = Source {
            interval: Some(300),
            ..Default::default()
        };
        assert_eq!(source.attr("interval").as_deref(), Some("5m"));
    }
}
