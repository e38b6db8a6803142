use std::process::ExitCode;

use log::{error, LevelFilter};

use folio::app::App;
use folio::clients::api_client::ApiClient;
use folio::config::app_config::get_global_config;
use folio::storage::FileStorage;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match get_global_config() {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let storage = match FileStorage::open(&config.storage_path) {
        Ok(storage) => storage,
        Err(err) => {
            error!("can't open {}: {}", config.storage_path, err);
            return ExitCode::FAILURE;
        }
    };

    let api = ApiClient::new(reqwest::Client::new(), config.api_url.clone());
    let mut app = App::new(config.clone(), api, storage);
    app.load().await;

    print!("{}", app.page().to_html());
    ExitCode::SUCCESS
}
