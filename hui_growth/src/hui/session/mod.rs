pub mod processor;
pub mod state;

pub use state::{HuiSession, SessionPhase, SessionStats};
