use crate::error::DemoError;
use crate::handle::SourceFile;
use log::{debug, info};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, getpid, ForkResult, Pid};
use std::io::{self, Write};
use std::process;

/// How an already-open handle reaches a spawned child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inheritance {
    /// The child uses the parent's open file; both move one cursor.
    Shared,
    /// The child opens the path again and gets a cursor of its own.
    #[default]
    Independent,
}

/// The parent's view of a spawned child process.
#[derive(Debug)]
pub struct Child {
    pid: Pid,
}

impl Child {
    pub fn id(&self) -> Pid {
        self.pid
    }

    /// Reaps the child. Anything other than a zero exit is an error.
    pub fn wait(self) -> Result<(), DemoError> {
        let status = waitpid(self.pid, None).map_err(DemoError::Wait)?;
        debug!("reaped child {}: {:?}", self.pid, status);
        match status {
            WaitStatus::Exited(_, 0) => Ok(()),
            status => Err(DemoError::ChildFailed {
                pid: self.pid,
                status,
            }),
        }
    }
}

/// Forks and runs `entry` in the child, which then exits with the status
/// the result maps to. Only the parent returns from this function.
pub fn spawn_fn<F>(entry: F) -> Result<Child, DemoError>
where
    F: FnOnce() -> Result<(), DemoError>,
{
    match split()? {
        Some(child) => Ok(child),
        None => finish_child(entry()),
    }
}

/// Like [`spawn_fn`], but hands the child its own copy of `file`, either
/// sharing the parent's cursor or opened afresh according to `inheritance`.
pub fn spawn_with_handle<F>(
    file: &SourceFile,
    inheritance: Inheritance,
    entry: F,
) -> Result<Child, DemoError>
where
    F: FnOnce(SourceFile) -> Result<(), DemoError>,
{
    match split()? {
        Some(child) => Ok(child),
        None => {
            let handle = match inheritance {
                Inheritance::Shared => file.share(),
                Inheritance::Independent => file.reopen(),
            };
            finish_child(handle.and_then(entry))
        }
    }
}

/// Duplicates the process. Returns `Some(child)` in the parent and `None`
/// in the child.
fn split() -> Result<Option<Child>, DemoError> {
    // Anything still buffered would otherwise be written twice.
    io::stdout().flush()?;

    // SAFETY: the binaries are single-threaded when they fork, so the child
    // cannot inherit a lock held by another thread.
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => {
            info!("{} forked child {}", getpid(), child);
            Ok(Some(Child { pid: child }))
        }
        Ok(ForkResult::Child) => Ok(None),
        Err(err) => Err(DemoError::Fork(err)),
    }
}

fn finish_child(result: Result<(), DemoError>) -> ! {
    let result = result.and_then(|()| io::stdout().flush().map_err(DemoError::from));
    let code = match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", err);
            err.exit_code()
        }
    };
    process::exit(code);
}
