pub mod client;
pub mod types;

pub use client::{ClientCommand, ClientError, CoreClient};

// Re-export generated protobuf types
pub mod proto {
    tonic::include_proto!("gitops");
}
