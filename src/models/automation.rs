//! Automation objects (Kustomizations, HelmReleases)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::object::{ready_message, ready_status, Condition, ObjectRef, ReadyStatus};
use super::source::{Source, SourceKind};
use crate::sort::RowAccess;
use crate::utils::format_age;

/// Automation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutomationKind {
    Kustomization,
    HelmRelease,
}

impl Default for AutomationKind {
    fn default() -> Self {
        Self::Kustomization
    }
}

impl fmt::Display for AutomationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kustomization => write!(f, "Kustomization"),
            Self::HelmRelease => write!(f, "HelmRelease"),
        }
    }
}

impl From<&str> for AutomationKind {
    fn from(s: &str) -> Self {
        match s {
            "HelmRelease" => Self::HelmRelease,
            _ => Self::Kustomization,
        }
    }
}

/// Chart reference carried by HelmReleases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelmChartRef {
    pub name: String,
    pub source_ref: Option<ObjectRef>,
}

/// An automation object fetched from the cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Automation {
    pub name: String,
    pub namespace: String,
    pub cluster_name: String,
    pub kind: AutomationKind,
    pub source_ref: Option<ObjectRef>,
    pub helm_chart: Option<HelmChartRef>,
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub last_applied_revision: String,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Automation {
    pub fn status(&self) -> ReadyStatus {
        ready_status(&self.conditions, self.suspended)
    }

    pub fn message(&self) -> Option<String> {
        ready_message(&self.conditions)
    }

    /// Display name of the source this automation pulls from.
    pub fn source_name(&self) -> Option<String> {
        if let Some(source_ref) = &self.source_ref {
            return Some(source_ref.name.clone());
        }
        self.helm_chart.as_ref().map(|chart| {
            chart
                .source_ref
                .as_ref()
                .map(|source_ref| source_ref.name.clone())
                .unwrap_or_else(|| chart.name.clone())
        })
    }

    /// Whether this automation consumes the given source.
    ///
    /// Cluster names must match. A HelmChart source is matched by chart
    /// name; otherwise the automation's source ref, or its chart's source
    /// ref, must match the source's kind and name.
    pub fn uses_source(&self, source: &Source) -> bool {
        if self.cluster_name != source.cluster_name {
            return false;
        }

        if source.kind == SourceKind::HelmChart {
            if let Some(chart) = &self.helm_chart {
                if chart.name == source.name {
                    return true;
                }
            }
        }

        let kind = source.kind.to_string();
        let matches =
            |object_ref: &ObjectRef| object_ref.kind == kind && object_ref.name == source.name;

        self.source_ref.as_ref().is_some_and(matches)
            || self
                .helm_chart
                .as_ref()
                .and_then(|chart| chart.source_ref.as_ref())
                .is_some_and(matches)
    }
}

impl RowAccess for Automation {
    fn attr(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "namespace" => Some(self.namespace.clone()),
            "cluster" => Some(self.cluster_name.clone()),
            "kind" => Some(self.kind.to_string()),
            "status" => Some(self.status().to_string()),
            "message" => self.message(),
            "source" => self.source_name(),
            "revision" => {
                (!self.last_applied_revision.is_empty()).then(|| self.last_applied_revision.clone())
            }
            "age" => self.last_updated.map(format_age),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(kind: SourceKind, name: &str, cluster: &str) -> Source {
        Source {
            name: name.to_string(),
            namespace: "flux-system".to_string(),
            cluster_name: cluster.to_string(),
            kind,
            ..Default::default()
        }
    }

    fn kustomization(cluster: &str, source_ref: Option<ObjectRef>) -> Automation {
        Automation {
            name: "apps".to_string(),
            namespace: "flux-system".to_string(),
            cluster_name: cluster.to_string(),
            kind: AutomationKind::Kustomization,
            source_ref,
            ..Default::default()
        }
    }

    #[test]
    fn matches_on_source_ref_kind_and_name() {
        let src = source(SourceKind::GitRepository, "podinfo", "Default");
        let automation = kustomization(
            "Default",
            Some(ObjectRef::new("GitRepository", "podinfo", "flux-system")),
        );
        assert!(automation.uses_source(&src));

        let other = kustomization(
            "Default",
            Some(ObjectRef::new("GitRepository", "other", "flux-system")),
        );
        assert!(!other.uses_source(&src));
    }

    #[test]
    fn different_cluster_never_matches() {
        let src = source(SourceKind::GitRepository, "podinfo", "Default");
        let automation = kustomization(
            "staging",
            Some(ObjectRef::new("GitRepository", "podinfo", "flux-system")),
        );
        assert!(!automation.uses_source(&src));
    }

    #[test]
    fn helm_chart_source_matches_by_chart_name() {
        let src = source(SourceKind::HelmChart, "podinfo", "Default");
        let mut release = kustomization("Default", None);
        release.kind = AutomationKind::HelmRelease;
        release.helm_chart = Some(HelmChartRef {
            name: "podinfo".to_string(),
            source_ref: None,
        });
        assert!(release.uses_source(&src));
    }

    #[test]
    fn chart_source_ref_matches_repository_source() {
        let src = source(SourceKind::HelmRepository, "bitnami", "Default");
        let mut release = kustomization("Default", None);
        release.kind = AutomationKind::HelmRelease;
        release.helm_chart = Some(HelmChartRef {
            name: "redis".to_string(),
            source_ref: Some(ObjectRef::new("HelmRepository", "bitnami", "flux-system")),
        });
        assert!(release.uses_source(&src));
    }

    #[test]
    fn source_name_prefers_direct_ref() {
        let automation = kustomization(
            "Default",
            Some(ObjectRef::new("GitRepository", "podinfo", "flux-system")),
        );
        assert_eq!(automation.source_name().as_deref(), Some("podinfo"));

        let mut release = kustomization("Default", None);
        release.helm_chart = Some(HelmChartRef {
            name: "redis".to_string(),
            source_ref: None,
        });
        assert_eq!(release.source_name().as_deref(), Some("redis"));
    }
}
