use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may set RUST_LOG / FILTER_PLOT_OUTPUT; a missing file is fine.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match filter_plot::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("exiting with {:?}", err.kind());
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
