//! Stdout arrangement for external commands. Everything here runs inside a
//! freshly forked child, never in the interpreter process itself.

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::OwnedFd;
use std::os::unix::io::AsRawFd;
use std::path::Path;

use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{access, dup2, execvp, fork, pipe, AccessFlags, ForkResult};

use crate::error::{self, ShellError};

fn errno_io(errno: nix::errno::Errno) -> io::Error {
    io::Error::from_raw_os_error(errno as i32)
}

/// `>`: refuse an existing target, create it fresh, point stdout at it.
/// On success the caller goes on to exec; the spare descriptor is closed
/// here and only the dup'ed stdout survives.
pub fn apply_truncate(target: &str) -> Result<(), ShellError> {
    if access(Path::new(target), AccessFlags::F_OK).is_ok() {
        return Err(ShellError::TargetExists(target.to_string()));
    }
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;
    dup2(file.as_raw_fd(), libc::STDOUT_FILENO).map_err(|e| ShellError::Io(errno_io(e)))?;
    Ok(())
}

/// `>+`: run the program with stdout on a pipe, relay its fresh output into
/// the target, then append whatever the target held before. Never returns;
/// the calling child becomes the relay and exits with the program's status.
pub fn run_prepend_capture(argv: &[CString], target: &str) -> ! {
    match prepend_capture(argv, target) {
        Ok(status) => unsafe { libc::_exit(status) },
        Err(e) => {
            error::report(&e);
            unsafe { libc::_exit(1) }
        }
    }
}

fn prepend_capture(argv: &[CString], target: &str) -> Result<i32, ShellError> {
    // Phase 1: capture. The on-disk bytes are about to be truncated away.
    let old_content = capture_existing(target)?;

    let mut out = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(target)?;

    let (read_end, write_end) = pipe().map_err(|e| ShellError::PipeFailed(errno_io(e)))?;

    match unsafe { fork() }.map_err(|e| ShellError::SpawnFailed(errno_io(e)))? {
        ForkResult::Child => {
            // Inner child: stdout onto the pipe, then the program image.
            drop(read_end);
            drop(out);
            if dup2(write_end.as_raw_fd(), libc::STDOUT_FILENO).is_err() {
                error::report(&ShellError::Io(io::Error::last_os_error()));
                unsafe { libc::_exit(1) };
            }
            drop(write_end);
            let _ = execvp(&argv[0], argv);
            error::report(&ShellError::ExecFailed(
                argv[0].to_string_lossy().into_owned(),
                io::Error::last_os_error(),
            ));
            unsafe { libc::_exit(127) };
        }
        ForkResult::Parent { child } => {
            drop(write_end);

            // Phase 2: drain. Fresh output lands in the file first.
            drain_pipe(read_end, &mut out)?;

            // Phase 3: append the captured old bytes after it.
            if let Some(bytes) = old_content {
                out.write_all(&bytes).map_err(ShellError::RelayWrite)?;
            }
            out.flush().map_err(ShellError::RelayWrite)?;
            drop(out);

            let status = waitpid(child, None).map_err(|e| ShellError::Io(errno_io(e)))?;
            Ok(match status {
                WaitStatus::Exited(_, code) => code,
                _ => 1,
            })
        }
    }
}

/// Read the target's current bytes, or `None` if it does not exist yet.
/// The content is opaque; it is never reinterpreted as text.
fn capture_existing(target: &str) -> Result<Option<Vec<u8>>, ShellError> {
    match std::fs::read(target) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ShellError::Io(e)),
    }
}

fn drain_pipe(read_end: OwnedFd, out: &mut File) -> Result<(), ShellError> {
    let mut pipe_reader = File::from(read_end);
    let mut buf = [0u8; 4096];
    loop {
        let n = pipe_reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n]).map_err(ShellError::RelayWrite)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("seqsh_redirect_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_truncate_refuses_existing_target() {
        let path = scratch("existing");
        fs::write(&path, b"keep me").unwrap();

        let res = apply_truncate(path.to_str().unwrap());
        assert!(matches!(res, Err(ShellError::TargetExists(_))));
        // The refusal must leave the file untouched.
        assert_eq!(fs::read(&path).unwrap(), b"keep me");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_capture_existing_missing_file() {
        let path = scratch("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(capture_existing(path.to_str().unwrap()).unwrap(), None);
    }

    #[test]
    fn test_capture_existing_reads_all_bytes() {
        let path = scratch("capture");
        fs::write(&path, b"line one\n\x00binary\xff").unwrap();

        let got = capture_existing(path.to_str().unwrap()).unwrap();
        assert_eq!(got.as_deref(), Some(&b"line one\n\x00binary\xff"[..]));

        let _ = fs::remove_file(&path);
    }
}
