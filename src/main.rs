use std::env;
use std::process;

use log::debug;

use seqsh::config::Config;
use seqsh::error;
use seqsh::executor::ProcessExecutor;
use seqsh::input::LineSource;
use seqsh::repl;
use seqsh::session::Session;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut source = match args.as_slice() {
        [] => LineSource::interactive(),
        [path] => match LineSource::batch(path) {
            Ok(source) => source,
            Err(e) => {
                debug!("cannot open batch file {}: {}", path, e);
                error::print_error();
                process::exit(1);
            }
        },
        _ => {
            error::print_error();
            process::exit(1);
        }
    };

    let mut session = match Session::new() {
        Ok(session) => session,
        Err(e) => {
            error::report(&e);
            process::exit(1);
        }
    };

    let config = Config::default();
    let mut executor = ProcessExecutor::new();
    debug!(
        "starting in {} mode",
        if source.is_interactive() { "interactive" } else { "batch" }
    );
    repl::run(&mut source, &config, &mut executor, &mut session);
}
