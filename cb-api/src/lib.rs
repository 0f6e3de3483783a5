pub mod resources;
pub mod health;

pub use resources::ResourcePayload;
pub use health::Health;

#[cfg(feature = "client")]
pub mod client;
