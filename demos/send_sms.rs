// ABOUTME: Example application demonstrating SMS sending over a bound transmitter session
// ABOUTME: Shows SessionBuilder::connect -> bind_transmitter -> submit_sm_text -> unbind/disconnect

use argh::FromArgs;
use smpp_esme::datatypes::BindCredentials;
use smpp_esme::session::SessionBuilder;
use std::error::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Example application to show then simplest case of sending an SMS message
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

    /// the message to send
    #[argh(option, short = 'm')]
    message: String,

    /// the recipient telephone number
    #[argh(option, short = 't')]
    to: String,

    /// the telephone number that the message will be from
    #[argh(option, short = 'f')]
    from: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let debugging = cli_args.debugging;
    let host = cli_args.host.unwrap_or_else(|| "localhost".to_owned());
    let port = cli_args.port.unwrap_or(2775);
    let system_id = cli_args.system_id.unwrap_or_default();
    let password = cli_args.password.unwrap_or_default();

    if debugging {
        println!("Connecting to {host}:{port}");
    }

    let mut session = SessionBuilder::new(host, port).connect().await.map_err(|e| {
        eprintln!("Connection failed: {e}");
        Box::<dyn Error>::from(e.to_string())
    })?;

    let credentials = BindCredentials::new(&system_id, &password);
    session.bind_transceiver(&credentials).await.map_err(|e| {
        eprintln!("Bind failed: {e}");
        Box::<dyn Error>::from(e.to_string())
    })?;

    println!("Connected and bound successfully");

    match session
        .submit_sm_text(&cli_args.from, &cli_args.to, &cli_args.message)
        .await
    {
        Ok(sequence_numbers) => {
            println!("Message submitted in {} part(s), sequence numbers: {sequence_numbers:?}", sequence_numbers.len());

            if let Err(e) = session.unbind().await {
                eprintln!("Warning: Unbind failed: {e}");
            }
            session.disconnect().await?;

            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to send message: {e}");

            let _ = session.unbind().await;
            let _ = session.disconnect().await;

            Err(Box::<dyn Error>::from(e.to_string()))
        }
    }
}
