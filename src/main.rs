use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match neo_watch::app::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
