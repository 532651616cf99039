//! Type conversions between protobuf and domain models

use chrono::{DateTime, Utc};

use crate::grpc::proto;
use crate::models;

fn timestamp(epoch_secs: i64) -> Option<DateTime<Utc>> {
    if epoch_secs == 0 {
        return None;
    }
    DateTime::from_timestamp(epoch_secs, 0)
}

impl From<proto::ObjectRef> for models::ObjectRef {
    fn from(r: proto::ObjectRef) -> Self {
        Self {
            kind: r.kind,
            name: r.name,
            namespace: r.namespace,
        }
    }
}

impl From<models::ObjectRef> for proto::ObjectRef {
    fn from(r: models::ObjectRef) -> Self {
        Self {
            kind: r.kind,
            name: r.name,
            namespace: r.namespace,
        }
    }
}

impl From<proto::Condition> for models::Condition {
    fn from(c: proto::Condition) -> Self {
        Self {
            condition_type: c.r#type,
            status: c.status,
            reason: c.reason,
            message: c.message,
            timestamp: timestamp(c.timestamp),
        }
    }
}

impl From<proto::Source> for models::Source {
    fn from(s: proto::Source) -> Self {
        Self {
            name: s.name,
            namespace: s.namespace,
            cluster_name: s.cluster_name,
            kind: models::SourceKind::from(s.kind.as_str()),
            url: s.url,
            suspended: s.suspended,
            conditions: s.conditions.into_iter().map(Into::into).collect(),
            revision: s.revision,
            interval: (s.interval_seconds > 0).then_some(s.interval_seconds as u64),
            last_updated: timestamp(s.last_updated),
        }
    }
}

impl From<proto::HelmChartRef> for models::HelmChartRef {
    fn from(c: proto::HelmChartRef) -> Self {
        Self {
            name: c.name,
            source_ref: c.source_ref.map(Into::into),
        }
    }
}

impl From<proto::Automation> for models::Automation {
    fn from(a: proto::Automation) -> Self {
        Self {
            name: a.name,
            namespace: a.namespace,
            cluster_name: a.cluster_name,
            kind: models::AutomationKind::from(a.kind.as_str()),
            source_ref: a.source_ref.map(Into::into),
            helm_chart: a.helm_chart.map(Into::into),
            suspended: a.suspended,
            conditions: a.conditions.into_iter().map(Into::into).collect(),
            last_applied_revision: a.last_applied_revision,
            last_updated: timestamp(a.last_updated),
        }
    }
}

impl From<proto::Event> for models::Event {
    fn from(e: proto::Event) -> Self {
        Self {
            event_type: e.r#type,
            reason: e.reason,
            message: e.message,
            component: e.component,
            involved_object: e.involved_object.map(Into::into).unwrap_or_default(),
            timestamp: timestamp(e.timestamp),
        }
    }
}
