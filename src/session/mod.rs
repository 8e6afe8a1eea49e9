/// Script command grammar
pub mod command;
/// Owned session state and command application
pub mod state;

pub use command::{Command, parse_script};
pub use state::{Outcome, Session};
