use anyhow::Result;

use skywatch::config::{MailCredentials, MonitorConfig};
use skywatch::module::monitor::Monitor;
use skywatch::module::notify::Mailer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = MonitorConfig::load("config.toml")?;

    let _logging_guard = skywatch::logging::init_logging("logs", "skywatch", &config.log_level);

    tracing::info!("Skywatch starting...");

    let mailer = match MailCredentials::from_env() {
        Some(credentials) => {
            tracing::info!(
                "Notifications will be sent from {} to {}",
                credentials.sender,
                credentials.receiver
            );
            Some(Mailer::new(&config.smtp, credentials)?)
        }
        None => {
            tracing::warn!(
                "SENDER_EMAIL, RECEIVER_EMAIL or EMAIL_PASSWORD is not set; \
                 notifications disabled, monitoring continues"
            );
            None
        }
    };

    let monitor = Monitor::new(&config, mailer)?;
    monitor.run().await
}
