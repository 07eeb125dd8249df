//! Signal handling for the live run loop.
//!
//! A helper thread turns process signals into [`SignalMessage`]s on a channel
//! the main loop drains between timer events. The config watcher feeds the
//! same channel, so the main loop has a single place to look.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR2},
    iterator::Signals,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::Arc;
use std::thread;

/// Messages delivered to the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalMessage {
    /// Configuration should be reloaded (SIGUSR2 or a file change)
    Reload,
    /// Stop the page and exit (SIGINT, SIGTERM, SIGHUP)
    Shutdown,
}

/// Signal handling state shared between threads
pub struct SignalState {
    /// Cleared once a shutdown signal arrives
    pub running: Arc<AtomicBool>,
    pub signal_receiver: Receiver<SignalMessage>,
    /// Sender handed to other producers such as the config watcher
    pub signal_sender: Sender<SignalMessage>,
}

impl SignalState {
    /// State with no signal thread attached, for driving the loop by hand
    pub fn detached() -> Self {
        let (signal_sender, signal_receiver) = channel();
        Self {
            running: Arc::new(AtomicBool::new(true)),
            signal_receiver,
            signal_sender,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Map a raw signal number to the message it stands for.
pub fn message_for_signal(signal: i32) -> Option<SignalMessage> {
    match signal {
        SIGINT | SIGTERM | SIGHUP => Some(SignalMessage::Shutdown),
        SIGUSR2 => Some(SignalMessage::Reload),
        _ => None,
    }
}

/// Set up signal handling for the application.
///
/// Spawns a background thread that waits for signals and forwards them as
/// messages. Shutdown signals also clear the `running` flag immediately.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let state = SignalState::detached();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running = Arc::clone(&state.running);
    let sender = state.signal_sender.clone();

    thread::spawn(move || {
        for signal in signals.forever() {
            let Some(message) = message_for_signal(signal) else {
                continue;
            };

            if debug_enabled {
                log_pipe!();
                log_debug!("Received signal {signal}, forwarding {message:?}");
            }

            if message == SignalMessage::Shutdown {
                running.store(false, Ordering::SeqCst);
            }
            if sender.send(message).is_err() {
                // Main loop is gone
                break;
            }
        }
    });

    Ok(state)
}
