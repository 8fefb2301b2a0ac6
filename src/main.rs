#![allow(non_snake_case)]
use RustedTaylor::Examples::taylor_examples::taylor_examples;
use RustedTaylor::Utils::logger::init_logger;
use RustedTaylor::Utils::taylor_task::TaylorTask;
use log::error;
use std::process::ExitCode;

/// rusted_taylor [task-file]
/// with a task file the expansion described in it is computed, without one the bundled examples run
fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1) {
        Some(path) => {
            let task = match TaylorTask::from_file(path) {
                Ok(task) => task,
                Err(e) => {
                    eprintln!("cannot read task {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            };
            match task.run_with_logging() {
                Ok(series) => {
                    println!("{}", series.to_table());
                    println!("{}", series.total());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("{}", e);
                    eprintln!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            if let Err(e) = init_logger(Some("warn"), false) {
                eprintln!("{}", e);
            }
            let example = 0;
            taylor_examples(example);
            ExitCode::SUCCESS
        }
    }
}
