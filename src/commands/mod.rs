pub mod registry;
pub mod state;

pub use registry::{dispatch, handle_line, CommandEnvelope, CommandResponse, COMMANDS};
pub use state::AppState;
