//! The single task that owns the set of currently held inputs.

use std::collections::HashMap;
use std::future::poll_fn;

use switch_pad_common::InputSymbol;
use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio_util::time::delay_queue::{DelayQueue, Key};
use tracing::{debug, info, trace, warn};

/// The input tracker is the only task allowed to touch the held-input set.
///
/// Triggers arrive as messages; every held symbol carries its own release
/// timer, and re-triggering postpones the release instead of stacking a
/// second press. After every mutation the tracker publishes a snapshot of
/// the held symbols, ordered by trigger time with the oldest first, which is
/// exactly the order composition wants.
pub struct InputTracker {
    /// Held symbols in trigger order, oldest first.
    held: Vec<InputSymbol>,
    release_timers: DelayQueue<InputSymbol>,
    timer_keys: HashMap<InputSymbol, Key>,
    msg_sender: mpsc::Sender<InputTrackerMessage>,
    msg_receiver: mpsc::Receiver<InputTrackerMessage>,
    held_sender: watch::Sender<Vec<InputSymbol>>,
}

enum InputTrackerMessage {
    Trigger(InputSymbol),
    Shutdown,
}

/// A handle to the input tracker task. Every trigger source holds a clone of
/// this; nothing else can reach the held set.
#[derive(Clone)]
pub struct InputTrackerHandle {
    msg_sender: mpsc::Sender<InputTrackerMessage>,
}

impl InputTracker {
    pub fn new() -> Self {
        let (msg_sender, msg_receiver) = mpsc::channel(32);
        let (held_sender, _) = watch::channel(Vec::new());

        Self {
            held: Vec::new(),
            release_timers: DelayQueue::new(),
            timer_keys: HashMap::new(),
            msg_sender,
            msg_receiver,
            held_sender,
        }
    }

    /// Create a handle for posting triggers to the tracker.
    pub fn handle(&self) -> InputTrackerHandle {
        InputTrackerHandle {
            msg_sender: self.msg_sender.clone(),
        }
    }

    /// Subscribe to snapshots of the held-input list.
    pub fn held_inputs(&self) -> watch::Receiver<Vec<InputSymbol>> {
        self.held_sender.subscribe()
    }

    /// Run the tracker task. This will run until a shutdown message is
    /// received.
    pub async fn run(mut self) {
        loop {
            select! {
                // A fresh trigger always beats a pending release.
                biased;

                Some(msg) = self.msg_receiver.recv() => match msg {
                    InputTrackerMessage::Trigger(symbol) => self.trigger(symbol),
                    InputTrackerMessage::Shutdown => {
                        debug!("Input tracker task exiting");
                        break;
                    }
                },

                Some(expired) = poll_fn(|cx| self.release_timers.poll_expired(cx)),
                    if !self.timer_keys.is_empty() =>
                {
                    self.release(expired.into_inner());
                }

                else => break,
            }
        }

        info!("Input tracker task exited");
    }

    fn trigger(&mut self, symbol: InputSymbol) {
        let hold = symbol.hold_duration();

        if let Some(key) = self.timer_keys.get(&symbol) {
            // Re-arm: cancel the pending release and start a fresh hold.
            self.release_timers.reset(key, hold);

            // The newest trigger owns the stick fields, so move the symbol
            // to the back of the ordering.
            let position = self
                .held
                .iter()
                .position(|held| *held == symbol)
                .expect("timer key without held entry");
            self.held.remove(position);
            self.held.push(symbol);
            trace!("Re-armed {} for {hold:?}", symbol.name());
        } else {
            let key = self.release_timers.insert(symbol, hold);
            self.timer_keys.insert(symbol, key);
            self.held.push(symbol);
            debug!("Holding {} for {hold:?}", symbol.name());
        }

        self.publish();
    }

    fn release(&mut self, symbol: InputSymbol) {
        self.timer_keys.remove(&symbol);
        if let Some(position) = self.held.iter().position(|held| *held == symbol) {
            self.held.remove(position);
        }
        debug!("Released {}", symbol.name());

        self.publish();
    }

    fn publish(&self) {
        self.held_sender.send_replace(self.held.clone());
    }
}

impl InputTrackerHandle {
    /// Post a trigger for the given symbol.
    pub async fn trigger(&self, symbol: InputSymbol) {
        let message = InputTrackerMessage::Trigger(symbol);
        if let Err(e) = self.msg_sender.send(message).await {
            warn!("Input tracker is gone, dropping trigger: {e}");
        }
    }

    /// Send a shutdown message to the tracker task, causing it to exit.
    pub async fn shutdown(&self) {
        self.msg_sender
            .send(InputTrackerMessage::Shutdown)
            .await
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::{advance, Instant};

    async fn next_snapshot(held: &mut watch::Receiver<Vec<InputSymbol>>) -> Vec<InputSymbol> {
        held.changed().await.expect("tracker dropped its watch sender");
        held.borrow_and_update().clone()
    }

    fn spawn_tracker() -> (
        InputTrackerHandle,
        watch::Receiver<Vec<InputSymbol>>,
        tokio::task::JoinHandle<()>,
    ) {
        let tracker = InputTracker::new();
        let handle = tracker.handle();
        let held = tracker.held_inputs();
        let task = tokio::spawn(tracker.run());
        (handle, held, task)
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_holds_until_the_deadline() {
        let (handle, mut held, task) = spawn_tracker();
        let hold = InputSymbol::A.hold_duration();
        let start = Instant::now();

        handle.trigger(InputSymbol::A).await;
        assert_eq!(next_snapshot(&mut held).await, vec![InputSymbol::A]);

        // The release fires only once the hold duration has elapsed.
        assert_eq!(next_snapshot(&mut held).await, vec![]);
        assert!(start.elapsed() >= hold);
        assert!(start.elapsed() < hold + Duration::from_millis(5));

        handle.shutdown().await;
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_postpones_the_release() {
        let (handle, mut held, task) = spawn_tracker();
        let hold = InputSymbol::A.hold_duration();
        let start = Instant::now();

        handle.trigger(InputSymbol::A).await;
        assert_eq!(next_snapshot(&mut held).await, vec![InputSymbol::A]);

        advance(hold * 4 / 5).await;
        let rearm_time = Instant::now();
        handle.trigger(InputSymbol::A).await;
        assert_eq!(next_snapshot(&mut held).await, vec![InputSymbol::A]);

        // Step past the original deadline: the symbol must still be held.
        advance(hold * 4 / 5).await;
        tokio::task::yield_now().await;
        assert!(!held.has_changed().unwrap());
        assert_eq!(*held.borrow(), vec![InputSymbol::A]);

        // The release lands a full hold after the second trigger.
        assert_eq!(next_snapshot(&mut held).await, vec![]);
        assert!(rearm_time.elapsed() >= hold);
        assert!(start.elapsed() < hold * 2);

        handle.shutdown().await;
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn symbols_release_independently() {
        let (handle, mut held, task) = spawn_tracker();

        handle.trigger(InputSymbol::A).await;
        assert_eq!(next_snapshot(&mut held).await, vec![InputSymbol::A]);
        handle.trigger(InputSymbol::Zl).await;
        assert_eq!(
            next_snapshot(&mut held).await,
            vec![InputSymbol::A, InputSymbol::Zl]
        );

        // A's tap expires long before the shoulder button's hold.
        assert_eq!(next_snapshot(&mut held).await, vec![InputSymbol::Zl]);
        assert_eq!(next_snapshot(&mut held).await, vec![]);

        handle.shutdown().await;
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn retrigger_moves_the_symbol_to_the_back() {
        let (handle, mut held, task) = spawn_tracker();

        handle.trigger(InputSymbol::Up).await;
        assert_eq!(next_snapshot(&mut held).await, vec![InputSymbol::Up]);
        handle.trigger(InputSymbol::RunLeft).await;
        assert_eq!(
            next_snapshot(&mut held).await,
            vec![InputSymbol::Up, InputSymbol::RunLeft]
        );

        // Re-triggering makes the symbol the newest stick-field owner.
        handle.trigger(InputSymbol::Up).await;
        assert_eq!(
            next_snapshot(&mut held).await,
            vec![InputSymbol::RunLeft, InputSymbol::Up]
        );

        handle.shutdown().await;
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_task() {
        let (handle, _held, task) = spawn_tracker();
        handle.shutdown().await;
        task.await.unwrap();
    }
}
