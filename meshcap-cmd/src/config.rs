use anyhow::{bail, Result};
use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// MQTT broker settings for the recorder.
///
/// Loaded from `MQTT_BROKER`, `MQTT_TOPIC`, `MQTT_USER` and `MQTT_PASSWORD`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BrokerConfig {
    /// `host`, `host:port`, or either prefixed with `mqtt://` or `tcp://`.
    #[serde(default = "default_broker")]
    pub broker: String,

    /// Topic filter to subscribe to; may use `+` and `#` wildcards.
    #[serde(default = "default_topic")]
    pub topic: String,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

fn default_broker() -> String {
    "mqtt.meshtastic.org:1883".to_string()
}

fn default_topic() -> String {
    "msh/#".to_string()
}

impl BrokerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix("MQTT"))
    }

    fn from_source(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Apply command line overrides.
    #[must_use]
    pub fn with_overrides(mut self, broker: Option<&str>, topic: Option<&str>) -> Self {
        if let Some(broker) = broker {
            self.broker = broker.to_string();
        }
        if let Some(topic) = topic {
            self.topic = topic.to_string();
        }
        self
    }

    /// Host and port of [BrokerConfig::broker].
    pub fn host_port(&self) -> Result<(&str, u16)> {
        parse_broker_url(&self.broker)
    }
}

/// Parse broker URL in format mqtt://host:port or tcp://host:port or host:port
fn parse_broker_url(url: &str) -> Result<(&str, u16)> {
    let url = url.trim_start_matches("mqtt://");
    let url = url.trim_start_matches("tcp://");

    let parts: Vec<&str> = url.split(':').collect();
    match parts[..] {
        [host] if !host.is_empty() => Ok((host, 1883)),
        [host, port] if !host.is_empty() => match port.parse::<u16>() {
            Ok(port) => Ok((host, port)),
            Err(_) => bail!("invalid port in broker URL: {port}"),
        },
        _ => bail!("invalid broker URL format: {url}"),
    }
}
