//! Server startup utilities.

use tally_config::ServerConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
  ______      ____
 /_  __/___ _/ / /_  __
  / / / __ `/ / / / / /
 / / / /_/ / / / /_/ /
/_/  \__,_/_/_/\__, /
              /____/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(server: &ServerConfig, instance_name: &str) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Instance:  {}", instance_name);
    info!("REST API:  http://{}", server.addr());
    info!("Health:    http://{}/health", server.addr());
    info!("API Docs:  http://{}/swagger-ui", server.addr());
    info!("{}", separator);
}
