//! Background dispatcher
//!
//! The single consumer of the delivery channel. It fans every buffer out to
//! the registered sinks in registration order and drives two maintenance
//! timers (flush and rotate). Each sink call is isolated: an error or panic
//! from one sink is reported through the fallback handler and delivery to
//! the remaining sinks continues.

use super::buffer::{BufferPool, EncoderBuffer};
use super::fallback::FallbackHandler;
use super::metrics::LoggerMetrics;
use super::sink::RegisteredSink;
use crossbeam_channel::{after, select, Receiver, Sender};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Lifecycle of the dispatcher thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Waiting for the first record; timers not yet armed
    Idle = 0,
    /// Delivering records and running maintenance
    Running = 1,
    /// Channel observed closed and empty
    Draining = 2,
    /// Completion signalled; no further sink calls
    Stopped = 3,
}

impl DispatcherState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => DispatcherState::Idle,
            1 => DispatcherState::Running,
            2 => DispatcherState::Draining,
            _ => DispatcherState::Stopped,
        }
    }
}

impl fmt::Display for DispatcherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatcherState::Idle => write!(f, "Idle"),
            DispatcherState::Running => write!(f, "Running"),
            DispatcherState::Draining => write!(f, "Draining"),
            DispatcherState::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Shared view of the dispatcher state
#[derive(Debug, Clone)]
pub(crate) struct StateCell(Arc<AtomicU8>);

impl StateCell {
    pub(crate) fn new() -> Self {
        Self(Arc::new(AtomicU8::new(DispatcherState::Idle as u8)))
    }

    pub(crate) fn get(&self) -> DispatcherState {
        DispatcherState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, state: DispatcherState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// Timer intervals driving sink maintenance
#[derive(Debug, Clone, Copy)]
pub(crate) struct MaintenanceSchedule {
    pub(crate) flush_initial_delay: Duration,
    pub(crate) flush_interval: Duration,
    pub(crate) rotate_interval: Duration,
}

pub(crate) type SharedSinks = Arc<Mutex<Vec<RegisteredSink>>>;

enum Event {
    Record(Option<EncoderBuffer>),
    FlushTick,
    RotateTick,
}

pub(crate) struct Dispatcher {
    pub(crate) receiver: Receiver<EncoderBuffer>,
    pub(crate) sinks: SharedSinks,
    pub(crate) pool: Arc<BufferPool>,
    pub(crate) metrics: Arc<LoggerMetrics>,
    pub(crate) fallback: FallbackHandler,
    pub(crate) state: StateCell,
    pub(crate) schedule: MaintenanceSchedule,
    pub(crate) done: Sender<()>,
}

impl Dispatcher {
    pub(crate) fn spawn(self) -> thread::JoinHandle<()> {
        thread::spawn(move || self.run())
    }

    fn run(self) {
        // Idle until the first record, or until the channel closes unused
        match self.receiver.recv() {
            Ok(buffer) => {
                self.state.set(DispatcherState::Running);
                self.deliver(buffer);
            }
            Err(_) => {
                self.finish();
                return;
            }
        }

        let mut flush_timer = after(self.schedule.flush_initial_delay);
        let mut rotate_timer = after(self.schedule.rotate_interval);

        loop {
            let event = select! {
                recv(self.receiver) -> msg => Event::Record(msg.ok()),
                recv(flush_timer) -> _ => Event::FlushTick,
                recv(rotate_timer) -> _ => Event::RotateTick,
            };

            match event {
                Event::Record(Some(buffer)) => self.deliver(buffer),
                Event::Record(None) => break,
                Event::FlushTick => {
                    self.flush_all();
                    flush_timer = after(self.schedule.flush_interval);
                }
                Event::RotateTick => {
                    self.rotate_all();
                    rotate_timer = after(self.schedule.rotate_interval);
                }
            }
        }

        self.finish();
    }

    fn finish(&self) {
        self.state.set(DispatcherState::Draining);
        self.state.set(DispatcherState::Stopped);
        let _ = self.done.send(());
    }

    /// Offer one buffer to every sink, then return it to the pool
    fn deliver(&self, buffer: EncoderBuffer) {
        {
            let mut sinks = self.sinks.lock();
            for sink in sinks.iter_mut() {
                if let Err(err) = sink.write(&buffer) {
                    self.metrics.record_write_error();
                    (self.fallback)(&err);
                }
            }
        }
        self.metrics.record_delivered();
        self.pool.release(buffer);
    }

    fn flush_all(&self) {
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            if let Err(err) = sink.flush() {
                self.metrics.record_maintenance_error();
                (self.fallback)(&err);
            }
        }
    }

    fn rotate_all(&self) {
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            if let Err(err) = sink.rotate() {
                self.metrics.record_maintenance_error();
                (self.fallback)(&err);
            }
        }
    }
}
