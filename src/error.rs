use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::io;
use std::path::PathBuf;

/// Errors the demos recognize. Anything else is left to the host's default
/// behavior.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("cannot open '{}': {}", path.display(), source)]
    Open { path: PathBuf, source: io::Error },
    #[error("fork error: {0}")]
    Fork(#[source] nix::Error),
    #[error("wait error: {0}")]
    Wait(#[source] nix::Error),
    #[error("child {pid} did not exit cleanly: {status:?}")]
    ChildFailed { pid: Pid, status: WaitStatus },
    #[error("parent copy changed across fork: expected {expected}, found {found}")]
    CopyChanged { expected: i32, found: i32 },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DemoError {
    /// Process exit status used when this error terminates a demo.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Open { .. } => 2,
            Self::Fork(_)
            | Self::Wait(_)
            | Self::ChildFailed { .. }
            | Self::CopyChanged { .. }
            | Self::Io(_) => 1,
        }
    }
}
