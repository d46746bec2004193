use std::{
    io::{stdout, Write},
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::Local;
use meshcap::capture::format_line;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use tracing::{debug, info, warn};

use crate::config::BrokerConfig;
use crate::show::Printer;

/// Capture line timestamp, e.g. `01.02.2025 10:11:12`.
pub const TIMESTAMP_FORMAT: &str = "%m.%d.%Y %H:%M:%S";

const MAX_RETRIES: u32 = 10;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Appends received messages as capture lines.
pub struct CaptureWriter<W: Write> {
    inner: W,
    count: usize,
}

impl<W: Write> CaptureWriter<W> {
    pub fn new(inner: W) -> Self {
        CaptureWriter { inner, count: 0 }
    }

    /// Write one line and flush so the file is readable while recording.
    pub fn append(&mut self, timestamp: &str, topic: &str, payload: &[u8]) -> Result<()> {
        writeln!(self.inner, "{}", format_line(timestamp, topic, payload))
            .and_then(|()| self.inner.flush())
            .context("writing capture line")?;
        self.count += 1;
        Ok(())
    }

    /// Number of lines written.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Append one received message and optionally echo it to `out`.
///
/// Failures are logged and the message skipped; recording continues. Returns whether
/// the message was written to the capture.
fn store<W: Write, O: Write>(
    capture: &mut CaptureWriter<W>,
    echo: Option<&Printer>,
    out: O,
    timestamp: &str,
    topic: &str,
    payload: &[u8],
) -> bool {
    if let Err(err) = capture.append(timestamp, topic, payload) {
        warn!(topic, error = format!("{err:#}"), "failed to store message");
        return false;
    }
    debug!(topic, size = payload.len(), "message");

    if let Some(printer) = echo {
        let record = meshcap::decode_message(capture.count(), timestamp, topic, payload);
        if let Err(err) = printer.print(out, &record) {
            warn!(error = format!("{err:#}"), "failed to echo message");
        }
    }
    true
}

/// Subscribe to the configured topic and append every message until Ctrl-C.
///
/// When `echo` is set, each message is also decoded and printed to stdout.
pub async fn record<W: Write>(
    config: &BrokerConfig,
    capture: &mut CaptureWriter<W>,
    echo: Option<&Printer>,
) -> Result<()> {
    let (host, port) = config.host_port()?;
    let client_id = format!("meshcap_{}", chrono::Utc::now().timestamp());

    let mut mqtt_options = MqttOptions::new(client_id, host, port);
    mqtt_options.set_keep_alive(Duration::from_secs(30));
    mqtt_options.set_clean_session(true);
    if let Some(user) = &config.user {
        mqtt_options.set_credentials(user, config.password.as_deref().unwrap_or_default());
    }

    let (client, mut eventloop) = AsyncClient::new(mqtt_options, 100);
    info!("connecting to {host}:{port}");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut failures = 0;

    loop {
        tokio::select! {
            zult = &mut shutdown => {
                zult.context("listening for ctrl-c")?;
                debug!("interrupt received");
                if let Err(err) = client.disconnect().await {
                    warn!(error = %err, "disconnect failed");
                }
                break;
            }
            event = eventloop.poll() => {
                match event {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        failures = 0;
                        client
                            .subscribe(&config.topic, QoS::AtLeastOnce)
                            .await
                            .context("subscribing")?;
                        info!(topic = %config.topic, "connected, subscribing");
                    }
                    Ok(Event::Incoming(Packet::SubAck(_))) => debug!("subscription acknowledged"),
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
                        store(capture, echo, stdout().lock(), &timestamp, &publish.topic, &publish.payload);
                    }
                    Ok(_) => {}
                    Err(err) => {
                        failures += 1;
                        if failures > MAX_RETRIES {
                            return Err(err).context("giving up after repeated connection errors");
                        }
                        warn!(error = %err, attempt = failures, max_attempts = MAX_RETRIES, "connection error, retrying");
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }
    }

    info!(messages = capture.count(), "recording stopped");
    Ok(())
}
