mod error;
mod io;
mod rpc;
mod setup;
mod state;
mod transport;

pub use error::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, RESOURCE_NOT_FOUND};
pub use io::run_with_io;
pub use rpc::{PROTOCOL_VERSION, SERVER_NAME};
pub use setup::build_state;
pub use state::AppState;
pub use transport::{build_server, build_server_with_state, run, run_with_server};
