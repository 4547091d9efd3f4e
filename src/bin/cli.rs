//! sorictl CLI
//!
//! Sends one command to a SORI host, or follows its status.

use std::process;

use clap::Parser;
use sorictl::network::TcpConnector;
use sorictl::protocol::FrameVariant;
use sorictl::{runner, ClientConfig, ClientError, Generation, ResponseEncoding};
use tracing_subscriber::{fmt, EnvFilter};

/// sorictl
#[derive(Parser, Debug)]
#[command(name = "sorictl")]
#[command(about = "Client for the SORI neuroevolution host")]
#[command(version)]
#[command(after_help = "Options may appear before or after the operation. Put `--` before arguments that start with a hyphen (negative numbers are accepted as they are).")]
struct Args {
    /// Server host
    #[arg(long, default_value = sorictl::config::DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = sorictl::config::DEFAULT_PORT)]
    port: u16,

    /// Server generation (1: 2-byte frames, 2: 4-byte frames)
    #[arg(short, long, default_value_t = 1)]
    generation: u8,

    /// Request length prefix width in bytes (2 or 4), overriding the generation
    #[arg(long)]
    request_prefix: Option<u8>,

    /// Follow-mode poll interval in seconds
    #[arg(short, long, default_value_t = 5)]
    interval: u64,

    /// Connect timeout in milliseconds (0 = none)
    #[arg(long, default_value_t = 5000)]
    connect_timeout_ms: u64,

    /// Response timeout in milliseconds (0 = none)
    #[arg(long, default_value_t = 30000)]
    read_timeout_ms: u64,

    /// Request write timeout in milliseconds (0 = none)
    #[arg(long, default_value_t = 5000)]
    write_timeout_ms: u64,

    /// Decode responses made of space-separated character codes
    #[arg(long)]
    char_codes: bool,

    /// Operation name, or `follow`
    operation: String,

    /// Operation arguments
    #[arg(allow_negative_numbers = true)]
    args: Vec<String>,
}

fn main() {
    // Logs go to stderr; stdout carries only server responses
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sorictl=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!("Invalid configuration: {:?}", e);
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    tracing::debug!(
        "sorictl v{} -> {} (generation {})",
        sorictl::VERSION,
        config.addr(),
        config.generation
    );

    let connector = TcpConnector::new(&config);
    let mut stdout = std::io::stdout().lock();

    // Follow mode runs until the process is killed
    let result = runner::run(
        config,
        connector,
        &args.operation,
        &args.args,
        &mut stdout,
        None,
    );

    match result {
        Ok(()) => {}
        Err(ClientError::Usage(message)) => {
            println!("{}", message);
            process::exit(1);
        }
        Err(e) => {
            tracing::debug!("Request failed: {:?}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn build_config(args: &Args) -> sorictl::Result<ClientConfig> {
    let generation = Generation::try_from(args.generation)?;
    let encoding = if args.char_codes {
        ResponseEncoding::CharCodes
    } else {
        ResponseEncoding::Plain
    };

    let mut builder = ClientConfig::builder()
        .host(&args.host)
        .port(args.port)
        .generation(generation)
        .response_encoding(encoding)
        .poll_interval(std::time::Duration::from_secs(args.interval))
        .connect_timeout_ms(args.connect_timeout_ms)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms);

    if let Some(width) = args.request_prefix {
        builder = builder.request_frame(FrameVariant::from_width(width)?);
    }

    Ok(builder.build())
}
