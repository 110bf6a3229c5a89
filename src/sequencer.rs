use crate::error::{self, ShellError};
use crate::executor::Executor;
use crate::parser;
use crate::session::Session;

/// Run one input line: split on `;`, execute each segment left to right.
/// A failing segment is reported and abandoned; the ones after it still
/// run. Blank segments are skipped before parsing.
pub fn run_line<E: Executor>(line: &str, executor: &mut E, session: &mut Session) {
    for segment in line.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match parser::parse(segment) {
            Ok(cmd) => {
                if let Err(e) = executor.execute(cmd, session) {
                    error::report(&e);
                }
            }
            Err(e) => error::report(&ShellError::Parse(e)),
        }
    }
}
