mod room;
mod session_registry;

pub use room::*;
pub use session_registry::*;
