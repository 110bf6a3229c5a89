use std::env;
use std::path::{Path, PathBuf};
use crate::error::ShellError;

/// Interpreter-wide state. The working directory lives here rather than in
/// the process-global one so the executor and redirection engine can be
/// exercised against an injected directory; children adopt it at spawn
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    cwd: PathBuf,
}

impl Session {
    pub fn new() -> Result<Self, ShellError> {
        let cwd = env::current_dir().map_err(ShellError::CwdQuery)?;
        Ok(Session { cwd })
    }

    pub fn with_cwd(cwd: PathBuf) -> Self {
        Session { cwd }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Change the session directory. Relative targets resolve against the
    /// current session directory; the result must exist and be a directory.
    pub fn chdir(&mut self, target: &str) -> Result<(), ShellError> {
        let path = Path::new(target);
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        };
        let resolved = joined
            .canonicalize()
            .map_err(|e| ShellError::ChdirFailed(target.to_string(), e))?;
        if !resolved.is_dir() {
            return Err(ShellError::ChdirFailed(
                target.to_string(),
                std::io::Error::from(std::io::ErrorKind::NotADirectory),
            ));
        }
        self.cwd = resolved;
        Ok(())
    }
}
