//! main.rs

use roundtable_intake::configuration::get_configuration;
use roundtable_intake::startup::Application;
use roundtable_intake::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("roundtable_intake".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    // Panic if we can't read configuration
    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration).await?;
    if let Err(e) = application.run_until_stopped().await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Invitation intake failed"
        );
        return Err(e.into());
    }
    tracing::info!("Invitation intake has exited");
    Ok(())
}
