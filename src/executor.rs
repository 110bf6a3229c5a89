use std::ffi::CString;
use std::io;

use log::debug;
use nix::sys::wait::waitpid;
use nix::unistd::{chdir, execvp, fork, ForkResult};

use crate::builtins::BuiltinManager;
use crate::command::{Command, RedirectMode};
use crate::error::{self, ShellError};
use crate::redirect;
use crate::session::Session;

pub trait Executor {
    fn execute(&mut self, cmd: Command, session: &mut Session) -> Result<(), ShellError>;
}

/// Runs builtins in-process and everything else in a forked child that the
/// interpreter reaps before moving on. The child's exit status is never
/// surfaced; failures inside it report through the fixed error channel.
pub struct ProcessExecutor {
    builtins: BuiltinManager,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        ProcessExecutor {
            builtins: BuiltinManager::new(),
        }
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for ProcessExecutor {
    fn execute(&mut self, cmd: Command, session: &mut Session) -> Result<(), ShellError> {
        if cmd.is_empty() {
            return Ok(());
        }

        if self.builtins.is_builtin(&cmd.args[0]) {
            return self.builtins.execute(&cmd, session);
        }

        // Argv trouble surfaces here, before any process exists.
        let argv = cstring_argv(&cmd.args)?;

        debug!("spawning {:?} (cwd {})", cmd.args, session.cwd().display());
        match unsafe { fork() }
            .map_err(|e| ShellError::SpawnFailed(io::Error::from_raw_os_error(e as i32)))?
        {
            ForkResult::Child => run_child(&cmd, &argv, session),
            ForkResult::Parent { child } => {
                // Sequential by contract: reap before the next segment.
                let _ = waitpid(child, None);
                Ok(())
            }
        }
    }
}

/// Child side: adopt the session directory, arrange stdout per the redirect
/// mode, load the program image. Only ever exits, never returns.
fn run_child(cmd: &Command, argv: &[CString], session: &Session) -> ! {
    if let Err(e) = chdir(session.cwd()) {
        error::report(&ShellError::ChdirFailed(
            session.cwd().display().to_string(),
            io::Error::from_raw_os_error(e as i32),
        ));
        unsafe { libc::_exit(1) };
    }

    match &cmd.redirect {
        None => {}
        Some(r) => match r.mode {
            RedirectMode::Truncate => {
                if let Err(e) = redirect::apply_truncate(&r.target) {
                    error::report(&e);
                    unsafe { libc::_exit(1) };
                }
            }
            // The engine forks the program itself and exits with its
            // status once the relay has drained.
            RedirectMode::PrependCapture => redirect::run_prepend_capture(argv, &r.target),
        },
    }

    let _ = execvp(&argv[0], argv);
    error::report(&ShellError::ExecFailed(
        cmd.args[0].clone(),
        io::Error::last_os_error(),
    ));
    unsafe { libc::_exit(127) }
}

fn cstring_argv(args: &[String]) -> Result<Vec<CString>, ShellError> {
    args.iter()
        .map(|a| CString::new(a.as_str()).map_err(|_| ShellError::NulInArgument(a.clone())))
        .collect()
}
