/// One parsed segment: the word list plus an optional stdout redirection.
///
/// An empty `args` vector is the no-op sentinel a blank or operator-only
/// segment parses to; the sequencer skips it without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub args: Vec<String>,
    pub redirect: Option<Redirect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub mode: RedirectMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>`: create the target fresh; an existing target is an error.
    Truncate,
    /// `>+`: new output first, then the target's previous bytes.
    PrependCapture,
}

impl Command {
    pub fn empty() -> Self {
        Command {
            args: Vec::new(),
            redirect: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Program or builtin name, once the command is known to be non-empty.
    pub fn name(&self) -> Option<&str> {
        self.args.first().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        let cmd = Command::empty();
        assert!(cmd.is_empty());
        assert_eq!(cmd.name(), None);
        assert_eq!(cmd.redirect, None);
    }

    #[test]
    fn test_name_is_first_arg() {
        let cmd = Command {
            args: vec!["ls".to_string(), "-l".to_string()],
            redirect: None,
        };
        assert!(!cmd.is_empty());
        assert_eq!(cmd.name(), Some("ls"));
    }
}
