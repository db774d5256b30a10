pub mod capability;
mod config;
mod engine;
mod error;
mod signaling_client;
pub mod webrtc;

pub use capability::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use signaling_client::*;
