mod media;
mod peer_connection;
mod peer_event;
mod renderer;

pub use media::*;
pub use peer_connection::*;
pub use peer_event::*;
pub use renderer::*;
