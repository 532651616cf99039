pub mod automations;
pub mod events;
pub mod sources;
