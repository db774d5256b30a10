mod client_session;
mod session_handle;

pub use client_session::*;
pub use session_handle::*;
