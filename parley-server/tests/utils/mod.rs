pub mod test_server;

pub use signal_helpers::*;
pub use test_client::*;
pub use test_server::*;
