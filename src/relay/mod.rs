mod handler;
mod types;

pub use handler::Relay;
pub use types::*;
