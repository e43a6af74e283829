use goaltrack_core::{init_logging_from, open_data_dir, SystemClock};
use goaltrack_server::{router, AppState, ServerConfig};
use log::{error, info};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServerConfig::from_env();
    if let Err(err) = init_logging_from(&config.core) {
        eprintln!("goaltrack-server: logging disabled: {err}");
    }

    let store = match open_data_dir(&config.core.data_dir) {
        Ok(store) => store,
        Err(err) => {
            error!("event=server_start module=server status=error error={err}");
            eprintln!("goaltrack-server: cannot open data directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(&config.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(
                "event=server_start module=server status=error bind={} error={err}",
                config.bind
            );
            eprintln!("goaltrack-server: cannot bind {}: {err}", config.bind);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "event=server_start module=server status=ok bind={} data_dir={}",
        config.bind,
        config.core.data_dir.display()
    );
    println!("goaltrack-server listening on http://{}", config.bind);

    let app = router(AppState::new(store, SystemClock));
    if let Err(err) = axum::serve(listener, app).await {
        error!("event=server_stop module=server status=error error={err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
