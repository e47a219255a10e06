pub mod command;
pub mod session;
pub mod types;

pub use command::CommandGate;
pub use session::{SessionGate, StopFinding};
pub use types::Verdict;
