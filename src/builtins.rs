use std::collections::HashMap;
use std::env;
use std::io::{self, Write};
use log::debug;

use crate::command::Command;
use crate::error::ShellError;
use crate::session::Session;

/// A command resolved inside the interpreter process instead of by loading
/// an external program. Builtins validate their own arity; none of them
/// accepts a redirect.
pub trait BuiltinCommand {
    fn name(&self) -> &'static str;
    fn run(&self, cmd: &Command, session: &mut Session) -> Result<(), ShellError>;
}

pub struct BuiltinManager {
    commands: HashMap<&'static str, Box<dyn BuiltinCommand>>,
}

impl BuiltinManager {
    pub fn new() -> Self {
        let mut mgr = BuiltinManager {
            commands: HashMap::new(),
        };
        mgr.register(Box::new(ExitCommand));
        mgr.register(Box::new(CdCommand));
        mgr.register(Box::new(PwdCommand));
        mgr
    }

    pub fn register(&mut self, cmd: Box<dyn BuiltinCommand>) {
        self.commands.insert(cmd.name(), cmd);
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn execute(&self, cmd: &Command, session: &mut Session) -> Result<(), ShellError> {
        let name = cmd.name().unwrap_or_default();
        match self.commands.get(name) {
            Some(builtin) => {
                debug!("builtin: {} {:?}", name, &cmd.args[1..]);
                builtin.run(cmd, session)
            }
            None => Err(ShellError::BuiltinUsage(name.to_string())),
        }
    }
}

impl Default for BuiltinManager {
    fn default() -> Self {
        Self::new()
    }
}

/// `exit` takes nothing and terminates the interpreter with status 0.
pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn run(&self, cmd: &Command, _session: &mut Session) -> Result<(), ShellError> {
        if cmd.args.len() != 1 || cmd.redirect.is_some() {
            return Err(ShellError::BuiltinUsage("exit".to_string()));
        }
        std::process::exit(0);
    }
}

/// `cd [path]` moves the session directory; no argument means `$HOME`.
pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, cmd: &Command, session: &mut Session) -> Result<(), ShellError> {
        if cmd.args.len() > 2 || cmd.redirect.is_some() {
            return Err(ShellError::BuiltinUsage("cd".to_string()));
        }
        let target = match cmd.args.get(1) {
            Some(path) => path.clone(),
            None => env::var("HOME").map_err(|_| ShellError::HomeNotSet)?,
        };
        session.chdir(&target)
    }
}

/// `pwd` prints the absolute session directory.
pub struct PwdCommand;

impl BuiltinCommand for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }
    fn run(&self, cmd: &Command, session: &mut Session) -> Result<(), ShellError> {
        if cmd.args.len() != 1 || cmd.redirect.is_some() {
            return Err(ShellError::BuiltinUsage("pwd".to_string()));
        }
        let mut out = io::stdout();
        writeln!(out, "{}", session.cwd().display())?;
        out.flush()?;
        Ok(())
    }
}
