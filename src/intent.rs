//! Intent queue
//!
//! Signal transports and late configuration run in callback or interrupt
//! context; they enqueue intents here and the scheduler applies them on its
//! next tick. Built on `critical-section` and `heapless::Deque`, so senders
//! are safe from any context.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::color::Rgb;
use crate::error::StoreError;
use crate::store::SignalId;

/// Change requested from outside the scheduler
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatorIntent {
    /// A signal reported a new state
    SignalState { signal_id: SignalId, active: bool },
    /// Change the global brightness (0.0-1.0)
    Brightness(f32),
    /// Change the color of unlit LEDs
    OffColor(Rgb),
    /// Force every binding on
    Force(bool),
}

impl AggregatorIntent {
    /// Build a signal intent from a raw transport state string
    pub fn signal(signal_id: &str, state: &str) -> Result<Self, StoreError> {
        let signal_id = SignalId::try_from(signal_id).map_err(|()| StoreError::SignalIdTooLong)?;
        Ok(Self::SignalState {
            signal_id,
            active: is_active_state(state),
        })
    }
}

/// Normalise a transport state string
///
/// Only `on` and `ON` count as active; `off`, `unavailable`, `unknown` and
/// everything else are inactive.
pub fn is_active_state(state: &str) -> bool {
    matches!(state, "on" | "ON")
}

/// Returned when the queue has no room; carries the rejected intent
#[derive(Debug, Clone, PartialEq)]
pub struct QueueFull(pub AggregatorIntent);

/// Bounded intent queue
pub struct IntentQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<AggregatorIntent, SIZE>>>,
}

impl<const SIZE: usize> IntentQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> IntentSender<'_, SIZE> {
        IntentSender { queue: self }
    }

    pub const fn receiver(&self) -> IntentReceiver<'_, SIZE> {
        IntentReceiver { queue: self }
    }

    /// Enqueue an intent
    pub fn push(&self, intent: AggregatorIntent) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.push_back(intent).map_err(QueueFull)
        })
    }

    /// Dequeue the oldest intent
    pub fn pop(&self) -> Option<AggregatorIntent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued intents
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for IntentQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half, handed to transports and configuration callbacks
#[derive(Clone, Copy)]
pub struct IntentSender<'a, const SIZE: usize> {
    queue: &'a IntentQueue<SIZE>,
}

impl<const SIZE: usize> IntentSender<'_, SIZE> {
    pub fn send(&self, intent: AggregatorIntent) -> Result<(), QueueFull> {
        self.queue.push(intent)
    }

    /// Enqueue a raw signal state update
    ///
    /// An overlong signal id is dropped, since no binding could match it.
    pub fn send_state(&self, signal_id: &str, state: &str) -> Result<(), QueueFull> {
        match AggregatorIntent::signal(signal_id, state) {
            Ok(intent) => self.send(intent),
            Err(_) => Ok(()),
        }
    }
}

/// Receiving half, drained by the scheduler
#[derive(Clone, Copy)]
pub struct IntentReceiver<'a, const SIZE: usize> {
    queue: &'a IntentQueue<SIZE>,
}

impl<const SIZE: usize> IntentReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<AggregatorIntent> {
        self.queue.pop()
    }
}
