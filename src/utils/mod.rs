pub mod age;

pub use age::{format_age, format_interval};
