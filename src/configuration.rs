//! src/configuration.rs

use crate::email_client::EmailClient;
use crate::transport::{LoggingTransport, NotificationTransport, ProviderTransport};
use config::builder::{ConfigBuilder, DefaultState};
use secrecy::Secret;
use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub notification: NotificationSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Which transport relays accepted invitation requests.
#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Real call to the email provider API.
    Provider,
    /// Logs the notification and reports success without any network call.
    Logging,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct NotificationSettings {
    pub transport: TransportKind,
    pub sender_email: String,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub recipient_email: Option<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    pub provider: ProviderSettings,
    #[serde(default)]
    pub smtp: SmtpSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ProviderSettings {
    pub base_url: String,
    #[serde(default, deserialize_with = "non_empty_secret")]
    pub api_key: Option<Secret<String>>,
}

#[derive(serde::Deserialize, Clone, Debug, Default)]
pub struct SmtpSettings {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub port: Option<u16>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "non_empty_secret")]
    pub password: Option<Secret<String>>,
}

/// Empty strings count as absent, e.g. `APP_NOTIFICATION__RECIPIENT_EMAIL=`.
fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}

fn non_empty_secret<'de, D>(deserializer: D) -> Result<Option<Secret<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(non_empty_string(deserializer)?.map(Secret::new))
}

impl NotificationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    /// Build the provider client, if an API key has been configured.
    pub fn email_client(&self) -> Option<EmailClient> {
        self.provider.api_key.clone().map(|api_key| {
            EmailClient::new(
                self.provider.base_url.clone(),
                self.sender_email.clone(),
                api_key,
                self.timeout(),
            )
        })
    }

    /// Select the transport named by `transport`.
    pub fn transport(&self) -> Arc<dyn NotificationTransport> {
        match self.transport {
            TransportKind::Provider => Arc::new(ProviderTransport::new(
                self.email_client(),
                self.recipient_email.clone(),
            )),
            TransportKind::Logging => Arc::new(LoggingTransport::new(
                self.smtp.clone(),
                self.recipient_email.clone(),
            )),
        }
    }
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Apply the variable names of the hosted deployment on top of `builder`.
/// `lookup` reads a variable, empty values count as absent.
pub fn with_deployment_variables(
    builder: ConfigBuilder<DefaultState>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
    builder
        .set_override_option("notification.provider.api_key", var("RESEND_API_KEY"))?
        .set_override_option("notification.recipient_email", var("NOTIFICATION_EMAIL"))?
        .set_override_option("notification.smtp.host", var("SMTP_HOST"))?
        .set_override_option("notification.smtp.port", var("SMTP_PORT"))?
        .set_override_option("notification.smtp.user", var("SMTP_USER"))?
        .set_override_option("notification.smtp.password", var("SMTP_PASS"))
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let builder = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_APPLICATION__PORT=5001 would set `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );
    let settings = with_deployment_variables(builder, |name| std::env::var(name).ok())?.build()?;

    settings.try_deserialize::<Settings>()
}
