// ABOUTME: Long-running SMPP client example demonstrating keep-alive and periodic SMS sending
// ABOUTME: Drives a single bound session through a poll loop instead of spawning background tasks

//! # Long-Running SMPP Client with Keep-Alive
//!
//! This example demonstrates how to drive a long-running, transceiver-bound
//! session that:
//!
//! * Periodically sends `enquire_link` to keep the connection alive
//! * Optionally sends periodic SMS messages
//! * Drains inbound PDUs (auto-responding to `deliver_sm`/`enquire_link`)
//!   between keep-alive and SMS ticks
//! * Shuts down cleanly after a configured run duration
//!
//! ## Usage
//!
//! ```bash
//! # Basic keep-alive monitoring (no SMS sending)
//! cargo run --example long_running_client -- --system-id test --password secret
//!
//! # With periodic SMS sending
//! cargo run --example long_running_client -- \
//!   --system-id test --password secret \
//!   --to 123456789 --from 987654321 \
//!   --sms-interval 120
//! ```

use argh::FromArgs;
use smpp_esme::datatypes::BindCredentials;
use smpp_esme::session::SessionBuilder;
use std::error::Error;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Long-running SMPP client with keep-alive functionality
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the system id
    #[argh(option)]
    system_id: Option<String>,

    /// the password
    #[argh(option)]
    password: Option<String>,

    /// the hostname of IP address of the SMSC (default: localhost)
    #[argh(option)]
    host: Option<String>,

    /// the port to use when connecting to the SMSC (default: 2775)
    #[argh(option, short = 'p')]
    port: Option<u16>,

    /// keep-alive interval in seconds (default: 30)
    #[argh(option)]
    keep_alive_interval: Option<u64>,

    /// how long to run the client in seconds (default: 300, i.e., 5 minutes)
    #[argh(option)]
    run_duration: Option<u64>,

    /// interval between SMS sends in seconds (default: 60)
    #[argh(option)]
    sms_interval: Option<u64>,

    /// the recipient telephone number (optional - no SMS sent if not provided)
    #[argh(option, short = 't')]
    to: Option<String>,

    /// the telephone number that the message will be from (optional)
    #[argh(option, short = 'f')]
    from: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let host = cli_args.host.unwrap_or_else(|| "localhost".to_owned());
    let port = cli_args.port.unwrap_or(2775);
    let system_id = cli_args.system_id.unwrap_or_default();
    let password = cli_args.password.unwrap_or_default();
    let run_duration = Duration::from_secs(cli_args.run_duration.unwrap_or(300));
    let keep_alive_interval = Duration::from_secs(cli_args.keep_alive_interval.unwrap_or(30));
    let sms_interval = Duration::from_secs(cli_args.sms_interval.unwrap_or(60));

    info!("Starting long-running SMPP client");
    info!("Connecting to {host}:{port}");
    info!("Will run for {} seconds", run_duration.as_secs());

    let mut session = SessionBuilder::new(host, port).connect().await.map_err(|e| {
        error!("Connection failed: {e}");
        Box::<dyn Error>::from(e.to_string())
    })?;

    let credentials = BindCredentials::new(&system_id, &password);
    session.bind_transceiver(&credentials).await.map_err(|e| {
        error!("Bind failed: {e}");
        Box::<dyn Error>::from(e.to_string())
    })?;

    info!("Connected and bound successfully");

    let send_messages = cli_args.to.is_some() && cli_args.from.is_some();

    let start_time = Instant::now();
    let mut last_enquire = Instant::now();
    let mut last_sms = Instant::now();
    let mut message_count = 0u32;
    let mut enquire_count = 0u32;

    info!("Entering main loop");

    while start_time.elapsed() < run_duration {
        if last_enquire.elapsed() >= keep_alive_interval {
            match session.enquire_link(None).await {
                Ok(seq) => {
                    enquire_count += 1;
                    debug!("enquire_link sent, seq={seq}");
                }
                Err(e) => {
                    warn!("enquire_link failed: {e}");
                    break;
                }
            }
            last_enquire = Instant::now();
        }

        if send_messages && last_sms.elapsed() >= sms_interval {
            if let (Some(to), Some(from)) = (&cli_args.to, &cli_args.from) {
                message_count += 1;
                let text = format!("Test message #{message_count} from long-running client");
                match session.submit_sm_text(from, to, &text).await {
                    Ok(sequence_numbers) => {
                        info!("message {message_count} submitted, sequence_numbers={sequence_numbers:?}")
                    }
                    Err(e) => error!("failed to send message {message_count}: {e}"),
                }
            }
            last_sms = Instant::now();
        }

        // Drain at most one inbound PDU per loop iteration, but don't block
        // the keep-alive/SMS ticks if nothing arrives.
        match timeout(Duration::from_secs(1), session.read_one_pdu()).await {
            Ok(Ok(true)) => {}
            Ok(Ok(false)) => {
                info!("peer initiated unbind, shutting down");
                break;
            }
            Ok(Err(e)) => {
                error!("read failed: {e}");
                break;
            }
            Err(_) => {} // no PDU arrived within the poll window
        }
    }

    info!("Shutting down client");

    if let Err(e) = session.unbind().await {
        warn!("Unbind failed: {e}");
    }
    if let Err(e) = session.disconnect().await {
        warn!("Disconnect failed: {e}");
    }

    info!("Sent {enquire_count} keep-alive pings");
    info!("Sent {message_count} SMS messages");
    info!("Client ran for {:.1} seconds", start_time.elapsed().as_secs_f64());

    Ok(())
}
