use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use desk::{
    ConsoleNotifier, FormSettings, commands,
    config::{self, Args},
    error::Result,
};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            commands::report_error(&ConsoleNotifier, &err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<bool> {
    let settings = config::load(args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "glamp_desk={level},desk={level},client={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let api = Arc::new(client::Client::new(
        &settings.base_url,
        settings.request_timeout(),
    )?);
    tracing::debug!(base_url = %settings.base_url, "booking api configured");

    let form = FormSettings {
        debounce: settings.debounce(),
        default_max_guests: settings.default_max_guests,
        today: settings.today()?,
    };
    commands::run(api, ConsoleNotifier, &args.command, form, settings.add_on_catalog()?).await
}
