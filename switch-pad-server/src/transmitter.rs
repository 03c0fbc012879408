//! The fixed-rate transmission loop.

use std::time::Duration;

use switch_pad_common::{compose, InputSymbol, WireCommand};
use tokio::select;
use tokio::sync::{oneshot, watch};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, trace};

use crate::sink::CommandSink;

/// How often a command frame is written to the board.
pub const TICK_PERIOD: Duration = Duration::from_millis(8);

/// Stream the composed command to the sink at a fixed cadence until told to
/// stop or until the sink fails.
///
/// A write failure is fatal: the loop returns the error instead of retrying,
/// so a dead link is never papered over.
pub async fn run(
    mut sink: impl CommandSink,
    held_inputs: watch::Receiver<Vec<InputSymbol>>,
    mut exit_receiver: oneshot::Receiver<()>,
) -> anyhow::Result<()> {
    let mut ticks = interval(TICK_PERIOD);
    // A slow serial write delays the next frame instead of causing a burst.
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        select! {
            // Regardless of the result (Ok or Err) we should exit.
            _ = &mut exit_receiver => {
                debug!("Transmitter exiting");
                return Ok(());
            }
            _ = ticks.tick() => {}
        }

        let code = compose(held_inputs.borrow().iter().copied());
        let frame = WireCommand::from_code(code);
        sink.write_command(&frame)?;
        trace!("Tx {}", frame.encode_line().trim_end());
    }
}
