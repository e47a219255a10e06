pub mod check;
pub mod install;
pub mod rules;
pub mod stop_check;

/// How a CLI command wants the process to exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// The gate said no. Exit 1 so `gitguard check ... && ...` composes.
    Blocked,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Blocked => 1,
        }
    }
}
