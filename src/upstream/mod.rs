pub mod client;

pub use client::{HttpUpstreamClient, UpstreamClient};
