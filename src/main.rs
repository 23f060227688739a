use log::error;
use std::process::ExitCode;

use timetable_solver::config::log_filter_from_env;
use timetable_solver::{ServerConfig, sample, server};

const DEFAULT_EXPORT_PATH: &str = "timetable.xlsx";

fn run_demo(export_path: &str) -> ExitCode {
    match sample::run_demo(export_path) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter_from_env())).init();

    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("demo") {
        let path = args.next().unwrap_or_else(|| DEFAULT_EXPORT_PATH.to_string());
        return run_demo(&path);
    }

    // Only the server needs a bind address; a bad one must not break `demo`.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match server::run_server(config.bind_addr).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
