//! Interactive network routing simulator

use log::info;
use svc_netroute::console::Console;
use svc_netroute::*;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Will use default config settings if no environment vars are found.
    let config = Config::try_from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration from environment: {}", e))?;

    // Try to load log configuration from the provided log file.
    // Will default to stdout debug logging if the file can not be loaded.
    if let Err(e) = load_logger_config_from_file(config.log_config.as_str()).await {
        log::error!("(main) {}", e);
    }

    info!("(main) Loading config.");
    info!("(main) Simulator startup.");

    let mut rng = rand::thread_rng();
    let mut console = Console::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        config.latency_alert_threshold_ms.into(),
    );

    let Some(mut network) = console
        .setup(config.demo_node_count as usize, &mut rng)
        .await?
    else {
        log::warn!("(main) no network was set up, exiting.");
        log::logger().flush();
        std::process::exit(1);
    };

    console.run(&mut network, &mut rng).await?;

    info!("(main) simulator shutdown.");

    // Make sure all log message are written/ displayed before shutdown
    log::logger().flush();

    Ok(())
}
