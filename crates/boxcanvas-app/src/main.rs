//! Main application entry point.

use boxcanvas_app::{App, AppConfig, ShortcutRegistry};

fn main() {
    env_logger::init();
    log::info!("Starting BoxCanvas");
    ShortcutRegistry::log_all();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = App::run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
