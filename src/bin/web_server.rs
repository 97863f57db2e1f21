use netroute::web::server::{start_server_with_config, ServerConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let mut config = ServerConfig::from_env();

    // First argument overrides the port
    let args: Vec<String> = env::args().collect();
    if let Some(port) = args.get(1) {
        config.port = port.parse()?;
    }

    println!("Starting netroute web server...");
    println!("Configuration:");
    println!("   Address: {}", config.socket_addr());
    println!("   CORS enabled: {}", config.enable_cors);
    println!("   Max sessions: {}", config.max_sessions);
    println!("   Default tie-break: {}", config.default_tie_break);
    println!();

    start_server_with_config(config).await?;

    Ok(())
}
