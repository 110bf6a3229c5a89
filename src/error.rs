use std::fmt;
use std::io::{self, Write};
use log::debug;
use crate::parser::ParseError;

/// Every failure the interpreter can hit. The user always sees the same
/// fixed line (see [`report`]); the variants exist for logging and tests.
#[derive(Debug)]
pub enum ShellError {
    Parse(ParseError),
    BuiltinUsage(String),
    HomeNotSet,
    ChdirFailed(String, io::Error),
    CwdQuery(io::Error),
    TargetExists(String),
    NulInArgument(String),
    SpawnFailed(io::Error),
    PipeFailed(io::Error),
    ExecFailed(String, io::Error),
    RelayWrite(io::Error),
    Io(io::Error),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Parse(e) => write!(f, "parse error: {}", e),
            ShellError::BuiltinUsage(name) => write!(f, "builtin misuse: {}", name),
            ShellError::HomeNotSet => write!(f, "HOME is not set"),
            ShellError::ChdirFailed(path, e) => write!(f, "cannot change to {}: {}", path, e),
            ShellError::CwdQuery(e) => write!(f, "cannot query working directory: {}", e),
            ShellError::TargetExists(path) => write!(f, "redirect target exists: {}", path),
            ShellError::NulInArgument(arg) => write!(f, "NUL byte in argument: {:?}", arg),
            ShellError::SpawnFailed(e) => write!(f, "cannot spawn child: {}", e),
            ShellError::PipeFailed(e) => write!(f, "cannot create pipe: {}", e),
            ShellError::ExecFailed(prog, e) => write!(f, "cannot exec {}: {}", prog, e),
            ShellError::RelayWrite(e) => write!(f, "relay write failed: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::ChdirFailed(_, e)
            | ShellError::CwdQuery(e)
            | ShellError::SpawnFailed(e)
            | ShellError::PipeFailed(e)
            | ShellError::ExecFailed(_, e)
            | ShellError::RelayWrite(e)
            | ShellError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        ShellError::Io(e)
    }
}

impl From<ParseError> for ShellError {
    fn from(e: ParseError) -> Self {
        ShellError::Parse(e)
    }
}

/// The one line users ever see, on stdout.
pub const ERROR_MESSAGE: &str = "An error has occurred";

/// Report a failure: fixed message to stdout, detail to the log only.
pub fn report(err: &ShellError) {
    debug!("{}", err);
    print_error();
}

/// Emit the fixed message without a `ShellError` in hand (startup paths,
/// line-length rejection).
pub fn print_error() {
    let mut out = io::stdout();
    let _ = writeln!(out, "{}", ERROR_MESSAGE);
    let _ = out.flush();
}
