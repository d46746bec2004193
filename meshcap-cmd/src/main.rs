mod config;
mod decode;
mod record;
mod show;

use std::fs::OpenOptions;
use std::io::stderr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use meshcap::Decoder;
use regex::Regex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a capture file to CSV.
    ///
    /// Each non-blank line of the form `<timestamp> | <topic> | <hex>` produces one
    /// row. Encrypted packets are tried against the default channel key and its
    /// simple variants. Per-line failures are written to the Error column and
    /// processing continues.
    Decode {
        /// Delete output file if it already exists
        #[arg(long, action)]
        clobber: bool,

        /// Output file path.
        #[arg(short, long, default_value = "decoded_messages.csv", value_name = "path")]
        output: PathBuf,

        /// Only write records whose topic matches this regular expression.
        #[arg(short, long, value_name = "regex")]
        topic: Option<Regex>,

        /// Leave encrypted payloads as ciphertext.
        #[arg(long, action)]
        no_decrypt: bool,

        /// Input capture file.
        input: PathBuf,
    },
    /// Print the messages in a capture file, one per line.
    Show {
        /// Input capture file, or - for stdin.
        input: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: show::Format,
    },
    /// Record messages from an MQTT broker to a capture file.
    ///
    /// Broker settings are read from MQTT_BROKER, MQTT_TOPIC, MQTT_USER and
    /// MQTT_PASSWORD. Messages are appended to the output until interrupted with
    /// Ctrl-C.
    Record {
        /// Broker address, overriding MQTT_BROKER.
        #[arg(short, long, value_name = "host:port")]
        broker: Option<String>,

        /// Topic filter, overriding MQTT_TOPIC.
        #[arg(short, long)]
        topic: Option<String>,

        /// Capture file to append to.
        #[arg(short, long, default_value = "raw_messages.txt", value_name = "path")]
        output: PathBuf,

        /// Also decode and print each message.
        #[arg(short, long, action)]
        echo: bool,

        /// Format used with --echo.
        #[arg(short, long, default_value = "text")]
        format: show::Format,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("MESHCAP_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Decode {
            clobber,
            output,
            topic,
            no_decrypt,
            input,
        } => {
            if !clobber && output.exists() {
                bail!("{output:?} exists; use --clobber");
            }
            info!("decoding {input:?} to {output:?}");
            let decoder = Decoder::builder().decrypt(!no_decrypt).build();
            decode::decode_file(input, output, &decoder, topic.as_ref())
        }
        Commands::Show { input, format } => show::show(input, format.clone()),
        Commands::Record {
            broker,
            topic,
            output,
            echo,
            format,
        } => {
            let config = config::BrokerConfig::from_env()
                .context("loading broker config")?
                .with_overrides(broker.as_deref(), topic.as_deref());
            let printer = if *echo {
                Some(show::Printer::new(format.clone())?)
            } else {
                None
            };
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(output)
                .with_context(|| format!("failed to open output {output:?}"))?;
            let mut capture = record::CaptureWriter::new(file);
            info!("recording {} to {output:?}", config.topic);

            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("starting runtime")?
                .block_on(record::record(&config, &mut capture, printer.as_ref()))
        }
    }
}
