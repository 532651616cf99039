pub mod confirm;

pub use confirm::ConfirmDialog;
