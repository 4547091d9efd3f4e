//! Invocation runner
//!
//! Turns `<operation> [args...]` into either one exchange or follow mode.
//! Arguments are validated first; a usage error never opens a connection.

use std::io::Write;

use crossbeam::channel::Receiver;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::follow::Follower;
use crate::network::{Client, Connector};
use crate::protocol::{Command, Invocation};

/// Run one invocation, printing response text to `out`
///
/// In follow mode this only returns once `shutdown` fires (or disconnects)
/// or `out` fails. Without a `shutdown` receiver it follows until the
/// process is killed.
pub fn run<C: Connector, W: Write>(
    config: ClientConfig,
    connector: C,
    operation: &str,
    args: &[String],
    out: &mut W,
    shutdown: Option<&Receiver<()>>,
) -> Result<()> {
    let invocation = Invocation::parse(config.generation, operation, args)?;
    let client = Client::with_connector(config, connector);

    match invocation {
        Invocation::Send(command) => {
            let text = client.execute(&command)?;
            writeln!(out, "{}", text)?;
            out.flush()?;
        }
        Invocation::Follow => {
            let generation = client.config().generation;
            let interval = client.config().poll_interval;
            tracing::info!(
                "Following '{}' every {:?}",
                generation.status_operation(),
                interval
            );

            let follower = Follower::new(
                &client,
                move || Command::status(generation).to_message(),
                interval,
            );
            match shutdown {
                Some(shutdown) => follower.run_until(out, shutdown)?,
                None => follower.run_forever(out)?,
            };
        }
    }

    Ok(())
}
