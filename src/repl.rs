use log::debug;

use crate::config::Config;
use crate::error::{self, ShellError};
use crate::executor::Executor;
use crate::input::LineSource;
use crate::sequencer;
use crate::session::Session;

/// The read-eval loop. Runs until the source is exhausted or a builtin
/// `exit` terminates the process. Over-long lines are rejected and
/// discarded; a failed read is reported and the loop carries on.
pub fn run<E: Executor>(
    source: &mut LineSource,
    config: &Config,
    executor: &mut E,
    session: &mut Session,
) {
    loop {
        let line = match source.read_line(&config.prompt) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error::report(&ShellError::Io(e));
                continue;
            }
        };

        // Batch sources have already echoed the line at this point.
        if line.len() > config.line_limit {
            debug!("rejecting over-long line ({} bytes)", line.len());
            error::print_error();
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        sequencer::run_line(&line, executor, session);
    }
}
