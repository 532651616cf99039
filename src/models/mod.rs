pub mod automation;
pub mod event;
pub mod object;
pub mod source;

pub use automation::{Automation, AutomationKind, HelmChartRef};
pub use event::Event;
pub use object::{ready_message, ready_status, Condition, ObjectRef, ReadyStatus};
pub use source::{Source, SourceKind};
