use std::fmt;
use crate::command::{Command, Redirect, RedirectMode};

/// Words past this point are dropped without complaint, matching the
/// interpreter's fixed argument table.
pub const ARG_LIMIT: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// More than one `>` in the segment.
    MultipleRedirects,
    /// `>` with nothing after it.
    EmptyTarget,
    /// Redirect target contains whitespace.
    MalformedTarget(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MultipleRedirects => write!(f, "more than one redirect operator"),
            ParseError::EmptyTarget => write!(f, "redirect operator without a target"),
            ParseError::MalformedTarget(t) => write!(f, "malformed redirect target: {:?}", t),
        }
    }
}

/// Turn one `;`-delimited segment into a [`Command`].
///
/// A segment with no words at all (only whitespace, or a redirect operator
/// with nothing before it) parses to the empty sentinel; a redirect hanging
/// off such a segment is dropped rather than rejected.
pub fn parse(segment: &str) -> Result<Command, ParseError> {
    let (text, redirect) = match segment.find('>') {
        Some(pos) => {
            let rest = &segment[pos + 1..];
            if rest.contains('>') {
                return Err(ParseError::MultipleRedirects);
            }
            let (mode, target_text) = match rest.strip_prefix('+') {
                Some(after) => (RedirectMode::PrependCapture, after),
                None => (RedirectMode::Truncate, rest),
            };
            let target = target_text.trim();
            if target.is_empty() {
                return Err(ParseError::EmptyTarget);
            }
            if target.chars().any(char::is_whitespace) {
                return Err(ParseError::MalformedTarget(target.to_string()));
            }
            (
                &segment[..pos],
                Some(Redirect {
                    target: target.to_string(),
                    mode,
                }),
            )
        }
        None => (segment, None),
    };

    let args: Vec<String> = text
        .split_whitespace()
        .take(ARG_LIMIT)
        .map(|s| s.to_string())
        .collect();

    if args.is_empty() {
        // No command to run; a present-but-unused target is not an error.
        return Ok(Command::empty());
    }

    Ok(Command { args, redirect })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_simple_command() {
        let cmd = parse("ls").unwrap();
        assert_eq!(cmd.args, words(&["ls"]));
        assert_eq!(cmd.redirect, None);
    }

    #[test]
    fn test_command_with_args() {
        let cmd = parse("grep foo bar").unwrap();
        assert_eq!(cmd.args, words(&["grep", "foo", "bar"]));
    }

    #[test]
    fn test_surrounding_whitespace_insignificant() {
        let cmd = parse("   echo\thello   ").unwrap();
        assert_eq!(cmd.args, words(&["echo", "hello"]));
    }

    #[test]
    fn test_truncate_redirect() {
        let cmd = parse("ls -l > out.txt").unwrap();
        assert_eq!(cmd.args, words(&["ls", "-l"]));
        assert_eq!(
            cmd.redirect,
            Some(Redirect {
                target: "out.txt".to_string(),
                mode: RedirectMode::Truncate,
            })
        );
    }

    #[test]
    fn test_prepend_redirect() {
        let cmd = parse("echo hi >+ log.txt").unwrap();
        assert_eq!(cmd.args, words(&["echo", "hi"]));
        assert_eq!(
            cmd.redirect,
            Some(Redirect {
                target: "log.txt".to_string(),
                mode: RedirectMode::PrependCapture,
            })
        );
    }

    #[test]
    fn test_operator_without_spaces() {
        let cmd = parse("echo hi>f").unwrap();
        assert_eq!(cmd.args, words(&["echo", "hi"]));
        assert_eq!(cmd.redirect.unwrap().target, "f");
    }

    #[test]
    fn test_prepend_marker_must_be_adjacent() {
        // "> +" is a truncate redirect whose target is "+".
        let cmd = parse("echo hi > +").unwrap();
        let redirect = cmd.redirect.unwrap();
        assert_eq!(redirect.mode, RedirectMode::Truncate);
        assert_eq!(redirect.target, "+");
    }

    #[test]
    fn test_multiple_redirects_rejected() {
        assert_eq!(parse("echo a > f > g"), Err(ParseError::MultipleRedirects));
        assert_eq!(parse("echo a >> f"), Err(ParseError::MultipleRedirects));
    }

    #[test]
    fn test_empty_target_rejected() {
        assert_eq!(parse("echo a >"), Err(ParseError::EmptyTarget));
        assert_eq!(parse("echo a >+   "), Err(ParseError::EmptyTarget));
    }

    #[test]
    fn test_target_with_whitespace_rejected() {
        assert_eq!(
            parse("echo a > two words"),
            Err(ParseError::MalformedTarget("two words".to_string()))
        );
    }

    #[test]
    fn test_blank_segment_is_empty_sentinel() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \t ").unwrap().is_empty());
    }

    #[test]
    fn test_redirect_without_command_is_empty_sentinel() {
        let cmd = parse(" > out.txt").unwrap();
        assert!(cmd.is_empty());
        assert_eq!(cmd.redirect, None);
    }

    #[test]
    fn test_arg_limit_truncates_silently() {
        let long = vec!["word"; ARG_LIMIT + 20].join(" ");
        let cmd = parse(&long).unwrap();
        assert_eq!(cmd.args.len(), ARG_LIMIT);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let src = "  cat  notes.txt  >+ archive  ";
        assert_eq!(parse(src).unwrap(), parse(src).unwrap());
    }
}
