//! Follow mode
//!
//! Polls a fixed status query on a fixed interval and prints every
//! response. No backoff, no jitter, no deduplication: cycle N+1 starts its
//! connection only after cycle N's session is closed and the interval has
//! passed.

use std::io::Write;
use std::time::Duration;

use crossbeam::channel::{never, Receiver};
use crossbeam::select;

use crate::error::Result;
use crate::network::{Client, Connector};
use crate::protocol::Message;

/// Repeats one exchange forever
pub struct Follower<'a, C: Connector, F: Fn() -> Message> {
    client: &'a Client<C>,
    build: F,
    interval: Duration,
}

impl<'a, C: Connector, F: Fn() -> Message> Follower<'a, C, F> {
    /// `build` produces the message for each cycle
    pub fn new(client: &'a Client<C>, build: F, interval: Duration) -> Self {
        Self {
            client,
            build,
            interval,
        }
    }

    /// Poll until the process is terminated
    ///
    /// Only returns if writing to `out` fails or a cycle hits an error that
    /// is not an exchange failure.
    pub fn run_forever<W: Write>(&self, out: &mut W) -> Result<u64> {
        self.run_until(out, &never())
    }

    /// Poll until `shutdown` receives a message or disconnects
    ///
    /// Returns the number of completed cycles. A failed exchange is logged
    /// and the loop carries on at the next interval; any other error ends
    /// the loop.
    pub fn run_until<W: Write>(&self, out: &mut W, shutdown: &Receiver<()>) -> Result<u64> {
        let mut cycles = 0u64;

        loop {
            let message = (self.build)();
            match self.client.exchange(&message) {
                Ok(text) => {
                    writeln!(out, "{}", text)?;
                    out.flush()?;
                }
                Err(e) if e.is_exchange_failure() => {
                    tracing::warn!("Poll '{}' failed: {}", message.operation(), e);
                }
                Err(e) => return Err(e),
            }
            cycles += 1;

            select! {
                recv(shutdown) -> _ => {
                    tracing::debug!("Follow stopped after {} cycles", cycles);
                    return Ok(cycles);
                }
                default(self.interval) => {}
            }
        }
    }
}
