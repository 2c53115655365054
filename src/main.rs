use std::sync::Arc;

use taskotron::config::{load_config, print_schema};
use taskotron::startup;
use taskotron::utils::logger::init_logging;

#[tokio::main]
async fn main() {
    // `--schema` prints the configuration JSON schema and exits, so
    // deployments can validate their config.yaml.
    if std::env::args().any(|arg| arg == "--schema") {
        print_schema();
        return;
    }

    let config = Arc::new(load_config());
    init_logging(&config.logging);

    if let Err(e) = startup::run(config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
