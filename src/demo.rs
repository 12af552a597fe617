//! The two demos, each written once and run on both sides of a fork.

use crate::error::DemoError;
use crate::handle::{Chunk, SourceFile};
use crate::process::{self, Inheritance};
use crate::role::Role;
use log::debug;
use std::io::{self, Write};
use std::path::Path;

/// Value held before the fork.
pub const INITIAL_VALUE: i32 = 100;
pub const CHILD_VALUE: i32 = 150;
pub const PARENT_VALUE: i32 = 200;

/// File the descriptor demo opens, relative to the working directory.
pub const COMPANION_PATH: &str = "src/bin/q1.rs";

/// Bytes each process reads through the inherited handle.
pub const READ_UNIT: usize = 16;

/// Overwrites this context's private copy of the value.
pub fn diverge(role: Role, value: &mut i32) {
    *value = match role {
        Role::Child => CHILD_VALUE,
        Role::Parent => PARENT_VALUE,
    };
}

pub fn value_report(role: Role, value: i32) -> String {
    format!("{} {}", role.label(), value)
}

pub fn read_report(role: Role, chunk: &Chunk) -> String {
    format!(
        "{} read {} (cursor now at {})",
        role.label(),
        chunk.escaped(),
        chunk.cursor
    )
}

fn emit(line: &str) -> Result<(), DemoError> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}

fn mutate_and_report(role: Role, value: &mut i32) -> Result<(), DemoError> {
    diverge(role, value);
    debug!("{} set its copy to {}", role, value);
    emit(&value_report(role, *value))
}

fn read_and_report(role: Role, file: &mut SourceFile) -> Result<(), DemoError> {
    let chunk = file.read_unit(READ_UNIT)?;
    debug!(
        "{} read {} bytes from {}",
        role,
        chunk.bytes.len(),
        file.path().display()
    );
    emit(&read_report(role, &chunk))
}

/// Confirms the parent's copy still holds what the parent wrote, whatever
/// the child did to its own.
pub fn check_parent_copy(value: i32) -> Result<(), DemoError> {
    if value == PARENT_VALUE {
        Ok(())
    } else {
        Err(DemoError::CopyChanged {
            expected: PARENT_VALUE,
            found: value,
        })
    }
}

/// Forks once; each side sets its own copy of the value and prints it.
///
/// The child writes through the same variable the parent later reads. The
/// write lands in the child's address space only, which the parent checks
/// once the child has exited. The two lines appear in whatever order the
/// scheduler runs the processes.
pub fn duplicate_value() -> Result<(), DemoError> {
    let mut value = INITIAL_VALUE;
    let child = process::spawn_fn(|| mutate_and_report(Role::Child, &mut value))?;
    mutate_and_report(Role::Parent, &mut value)?;
    debug!("waiting for child {}", child.id());
    child.wait()?;
    check_parent_copy(value)
}

/// Opens `path`, forks with the handle shared, and reads one unit on each
/// side.
///
/// Both reads race on the same kernel cursor: which process gets which
/// unit, and the cursor each one sees afterwards, depends on scheduling.
pub fn inherit_handle<P: AsRef<Path>>(path: P) -> Result<(), DemoError> {
    let mut file = SourceFile::open(path)?;
    let child = process::spawn_with_handle(&file, Inheritance::Shared, |mut inherited| {
        read_and_report(Role::Child, &mut inherited)
    })?;
    read_and_report(Role::Parent, &mut file)?;
    child.wait()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diverge_sets_role_value() {
        let mut value = INITIAL_VALUE;
        diverge(Role::Child, &mut value);
        assert_eq!(value, CHILD_VALUE);
        diverge(Role::Parent, &mut value);
        assert_eq!(value, PARENT_VALUE);
    }

    #[test]
    fn test_check_parent_copy() {
        assert!(check_parent_copy(PARENT_VALUE).is_ok());
        let err = check_parent_copy(CHILD_VALUE).unwrap_err();
        assert!(matches!(
            err,
            DemoError::CopyChanged {
                expected: PARENT_VALUE,
                found: CHILD_VALUE
            }
        ));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_value_report() {
        assert_eq!(value_report(Role::Child, CHILD_VALUE), "Child: 150");
        assert_eq!(value_report(Role::Parent, PARENT_VALUE), "Parent: 200");
    }

    #[test]
    fn test_read_report() {
        let chunk = Chunk {
            bytes: b"/*\n * q1.rs".to_vec(),
            cursor: 32,
        };
        assert_eq!(
            read_report(Role::Parent, &chunk),
            "Parent: read \"/*\\n * q1.rs\" (cursor now at 32)"
        );
    }

    #[test]
    fn test_inherit_handle_missing_file_never_forks() {
        // Fails at open, before any fork could happen in the test harness.
        let err = inherit_handle("/nonexistent/forkdemo/q1.rs").unwrap_err();
        assert!(matches!(err, DemoError::Open { .. }));
    }
}
