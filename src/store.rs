//! LED state store
//!
//! Maps each configured LED index to the ordered list of signals bound to
//! it. Keys are only ever added; bindings are unique per signal id within an
//! LED and are updated in place.

use heapless::{String, Vec};

use crate::color::Rgb;
use crate::error::StoreError;

/// Maximum signal id length in bytes
pub const SIGNAL_ID_LEN: usize = 64;

/// Signal identifier, e.g. `light.kitchen`
pub type SignalId = String<SIGNAL_ID_LEN>;

/// One signal bound to an LED
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalBinding {
    /// Signal identifier
    pub signal_id: SignalId,
    /// Color shown while the signal is active
    pub color: Rgb,
    /// Last observed state
    pub active: bool,
}

impl SignalBinding {
    /// Create a new binding
    pub fn new(signal_id: &str, color: Rgb, active: bool) -> Result<Self, StoreError> {
        let signal_id = SignalId::try_from(signal_id).map_err(|()| StoreError::SignalIdTooLong)?;
        Ok(Self {
            signal_id,
            color,
            active,
        })
    }

    /// Whether this binding contributes its color
    const fn is_lit(&self, force_all_on: bool) -> bool {
        force_all_on || self.active
    }
}

/// Ordered bindings of a single LED
#[derive(Debug, Clone, Default)]
pub struct LedEntry<const BINDINGS: usize> {
    bindings: Vec<SignalBinding, BINDINGS>,
}

impl<const BINDINGS: usize> LedEntry<BINDINGS> {
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bindings in registration order
    pub fn bindings(&self) -> &[SignalBinding] {
        &self.bindings
    }

    /// Find the binding for a signal id
    pub fn find(&self, signal_id: &str) -> Option<&SignalBinding> {
        self.bindings.iter().find(|b| b.signal_id.as_str() == signal_id)
    }

    /// Replace the binding with the same signal id in place, or append it
    ///
    /// Returns the binding back if the entry is full.
    pub fn upsert(&mut self, binding: SignalBinding) -> Result<(), SignalBinding> {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.signal_id.as_str() == binding.signal_id.as_str())
        {
            Some(existing) => {
                existing.color = binding.color;
                existing.active = binding.active;
                Ok(())
            }
            None => self.bindings.push(binding),
        }
    }

    /// Resolve the displayed color
    ///
    /// Starts from `off_color`; every active binding (or every binding when
    /// `force_all_on` is set) overwrites it, so the last one in order wins.
    pub fn resolve(&self, off_color: Rgb, force_all_on: bool) -> Rgb {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.is_lit(force_all_on))
            .map_or(off_color, |b| b.color)
    }

    /// Resolve using the first binding only
    ///
    /// Returns `None` for an entry without bindings.
    pub fn resolve_first(&self, off_color: Rgb, force_all_on: bool) -> Option<Rgb> {
        let first = self.bindings.first()?;
        if first.is_lit(force_all_on) {
            Some(first.color)
        } else {
            Some(off_color)
        }
    }
}

/// LED index to bindings mapping, kept sorted by index
#[derive(Debug, Default)]
pub struct LedStateStore<const LEDS: usize, const BINDINGS: usize> {
    entries: Vec<(usize, LedEntry<BINDINGS>), LEDS>,
}

impl<const LEDS: usize, const BINDINGS: usize> LedStateStore<LEDS, BINDINGS> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of configured LED indices
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for an LED index
    pub fn entry(&self, led: usize) -> Option<&LedEntry<BINDINGS>> {
        self.entries
            .binary_search_by_key(&led, |(index, _)| *index)
            .ok()
            .map(|pos| &self.entries[pos].1)
    }

    /// Entry for an LED index, created empty on first use
    fn entry_mut(&mut self, led: usize) -> Result<&mut LedEntry<BINDINGS>, StoreError> {
        let pos = match self.entries.binary_search_by_key(&led, |(index, _)| *index) {
            Ok(pos) => pos,
            Err(pos) => {
                self.entries
                    .insert(pos, (led, LedEntry::new()))
                    .map_err(|_| StoreError::LedTableFull)?;
                pos
            }
        };
        Ok(&mut self.entries[pos].1)
    }

    /// Insert or update the binding of `signal_id` on `led`
    pub fn upsert(
        &mut self,
        led: usize,
        signal_id: &str,
        color: Rgb,
        active: bool,
    ) -> Result<(), StoreError> {
        let binding = SignalBinding::new(signal_id, color, active)?;
        self.entry_mut(led)?
            .upsert(binding)
            .map_err(|_| StoreError::BindingsFull(led))
    }

    /// Resolve the displayed color of an LED
    ///
    /// Unknown LEDs resolve to `off_color`.
    pub fn resolve(&self, led: usize, off_color: Rgb, force_all_on: bool) -> Rgb {
        self.entry(led)
            .map_or(off_color, |entry| entry.resolve(off_color, force_all_on))
    }

    /// Iterate entries in ascending LED order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LedEntry<BINDINGS>)> {
        self.entries.iter().map(|(led, entry)| (*led, entry))
    }

    /// Every `(led, binding)` pair bound to `signal_id`
    pub fn bindings_for<'a>(
        &'a self,
        signal_id: &'a str,
    ) -> impl Iterator<Item = (usize, &'a SignalBinding)> + 'a {
        self.iter()
            .filter_map(move |(led, entry)| entry.find(signal_id).map(|b| (led, b)))
    }

    /// Distinct signal ids, in first-seen order
    pub fn signal_ids(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .flat_map(|(_, entry)| entry.bindings().iter())
            .enumerate()
            .filter(|(pos, binding)| !self.seen_before(*pos, &binding.signal_id))
            .map(|(_, binding)| binding.signal_id.as_str())
    }

    fn seen_before(&self, pos: usize, signal_id: &str) -> bool {
        self.iter()
            .flat_map(|(_, entry)| entry.bindings().iter())
            .take(pos)
            .any(|b| b.signal_id.as_str() == signal_id)
    }
}
