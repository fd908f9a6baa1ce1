//! Tick scheduling
//!
//! Drives the aggregator from a single cooperative loop without async or
//! platform timers. Each tick applies queued intents, runs the heartbeat
//! when due and flushes the strip. The caller sleeps between ticks.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::aggregator::Aggregator;
use crate::heartbeat::DEFAULT_INTERVAL;
use crate::intent::IntentReceiver;
use crate::{Connectivity, PixelDriver};

/// Result of a tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule)
    pub sleep_duration: Duration,
    /// Number of intents applied during this tick
    pub applied: usize,
}

/// Portable tick scheduler
///
/// ```ignore
/// static INTENTS: IntentQueue<16> = IntentQueue::new();
/// let mut scheduler = Scheduler::new(aggregator, INTENTS.receiver());
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct Scheduler<'a, D, P, const LEDS: usize, const BINDINGS: usize, const SIZE: usize> {
    aggregator: Aggregator<D, P, LEDS, BINDINGS>,
    intents: IntentReceiver<'a, SIZE>,
    next_tick: Instant,
    interval: Duration,
}

impl<'a, D, P, const LEDS: usize, const BINDINGS: usize, const SIZE: usize>
    Scheduler<'a, D, P, LEDS, BINDINGS, SIZE>
where
    D: PixelDriver,
    P: Connectivity,
{
    /// Create a scheduler ticking at the heartbeat interval
    pub fn new(aggregator: Aggregator<D, P, LEDS, BINDINGS>, intents: IntentReceiver<'a, SIZE>) -> Self {
        let interval = aggregator
            .heartbeat()
            .map_or(DEFAULT_INTERVAL, |heartbeat| heartbeat.interval());
        Self::with_interval(aggregator, intents, interval)
    }

    /// Create a scheduler with a custom tick interval
    pub fn with_interval(
        aggregator: Aggregator<D, P, LEDS, BINDINGS>,
        intents: IntentReceiver<'a, SIZE>,
        interval: Duration,
    ) -> Self {
        Self {
            aggregator,
            intents,
            next_tick: Instant::from_millis(0),
            interval,
        }
    }

    /// Run one tick and return timing information
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after a long stall instead of bursting
        let max_drift = self.interval.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift {
            self.next_tick = now;
        }

        let applied = self.apply_pending();
        self.aggregator.heartbeat_tick(now);
        if let Some(driver) = self.aggregator.compositor_mut().driver_mut() {
            driver.flush();
        }

        self.next_tick += self.interval;
        let sleep_duration = if self.next_tick > now {
            self.next_tick - now
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
            applied,
        }
    }

    /// Drain the intent queue into the aggregator
    fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(intent) = self.intents.try_receive() {
            match self.aggregator.apply_intent(intent) {
                Ok(()) => applied += 1,
                Err(_err) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[Scheduler.apply_pending] intent rejected: {}", _err);
                }
            }
        }
        applied
    }

    pub fn aggregator(&self) -> &Aggregator<D, P, LEDS, BINDINGS> {
        &self.aggregator
    }

    pub fn aggregator_mut(&mut self) -> &mut Aggregator<D, P, LEDS, BINDINGS> {
        &mut self.aggregator
    }
}
