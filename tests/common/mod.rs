use nix::sys::resource::{setrlimit, Resource};
use nix::unistd::{geteuid, setgid, setgroups, setuid, Gid, Uid};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, Output};

const NOBODY: u32 = 65534;

/// Lets an unprivileged user enter `dir` and read what is in it.
#[allow(dead_code)]
pub fn open_to_all(dir: &Path) {
    fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Runs `bin` with RLIMIT_NPROC at zero so its first fork fails.
///
/// The real uid 0 is exempt from the limit, so under root the binary is
/// copied somewhere `nobody` can execute it and runs as `nobody`. The uid
/// changes before the limit drops: a `setuid` made while over the limit
/// would make the following `execve` fail instead.
pub fn run_without_fork(bin: &str, workdir: Option<&Path>) -> Output {
    let staging = tempfile::tempdir().unwrap();
    let as_root = geteuid().is_root();
    let program = if as_root {
        open_to_all(staging.path());
        let copy = staging.path().join(Path::new(bin).file_name().unwrap());
        fs::copy(bin, &copy).unwrap();
        fs::set_permissions(&copy, fs::Permissions::from_mode(0o755)).unwrap();
        copy
    } else {
        Path::new(bin).to_path_buf()
    };

    let mut cmd = Command::new(&program);
    if let Some(dir) = workdir {
        cmd.current_dir(dir);
    }
    unsafe {
        cmd.pre_exec(move || {
            if as_root {
                setgroups(&[])?;
                setgid(Gid::from_raw(NOBODY))?;
                setuid(Uid::from_raw(NOBODY))?;
            }
            setrlimit(Resource::RLIMIT_NPROC, 0, 0)?;
            Ok(())
        });
    }
    cmd.output().expect("Failed to execute demo binary")
}

pub fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}
