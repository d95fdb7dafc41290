//! ShengHang CLI - browse and manage the ShengHang music platform
//!
//! Parses the command line, builds a client from the environment and flags,
//! runs one command and prints its JSON payload. Failures are printed as
//! error notices on stderr with a non-zero exit status.

use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use shenghang::app;
use shenghang::cli::Cli;
use shenghang::notice::{Notice, NoticeSink, StderrSink};
use shenghang::ShengHangClient;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut sink = StderrSink {
        show_progress: cli.verbose,
    };

    let config = match cli.client_config() {
        Ok(config) => config,
        Err(e) => {
            sink.show("config", Notice::error(e.to_string()));
            return ExitCode::FAILURE;
        }
    };
    log::debug!("using backend {}", config.base_url);

    let mut client = match ShengHangClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            sink.show("config", app::failure_notice(&e));
            return ExitCode::FAILURE;
        }
    };

    match app::run(cli.command, &mut client, &mut sink).await {
        Ok(Some(payload)) => {
            let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            sink.show("results", app::failure_notice(&e));
            ExitCode::FAILURE
        }
    }
}
