//! Shared frame scheduler
//!
//! One [`Ticker`] drives every registered countdown from a single frame
//! source. The source is started on the first registration and stopped as
//! soon as the registry is empty again, so an idle ticker costs nothing.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use countdown_types::CountdownConfig;

use super::registration::Registration;
use crate::clock::{Clock, SystemClock};
use crate::countdown::{Countdown, CountdownHandle, CountdownId, EventSender};
use crate::frame_source::{FrameSource, IntervalFrameSource};

thread_local! {
    static SHARED: RefCell<Option<Ticker>> = const { RefCell::new(None) };
}

struct Entry {
    id: CountdownId,
    countdown: Weak<RefCell<Countdown>>,
}

struct Inner {
    registry: RefCell<Vec<Entry>>,
    source: RefCell<Box<dyn FrameSource>>,
    clock: Rc<dyn Clock>,
    running: Cell<bool>,
}

/// Handle to a shared scheduler. Clones refer to the same registry.
#[derive(Clone)]
pub struct Ticker {
    inner: Rc<Inner>,
}

impl Ticker {
    pub fn new(source: impl FrameSource + 'static, clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(Inner {
                registry: RefCell::new(Vec::new()),
                source: RefCell::new(Box::new(source)),
                clock,
                running: Cell::new(false),
            }),
        }
    }

    /// The thread's default ticker
    ///
    /// Built on first use with an [`IntervalFrameSource`] at the default
    /// frame interval and the system clock. Its frame subscription follows the
    /// registry: acquired on the first registration, released when the last
    /// countdown leaves. Install a ticker with [`Ticker::install_shared`] to
    /// use another source or clock.
    ///
    /// # Panics
    ///
    /// The returned ticker does not panic here, but its first
    /// [`register`](Ticker::register) or [`mount`](Ticker::mount) spawns the
    /// interval task with `tokio::task::spawn_local` and panics when called
    /// outside a `tokio::task::LocalSet`.
    pub fn shared() -> Ticker {
        SHARED.with(|slot| {
            slot.borrow_mut()
                .get_or_insert_with(|| {
                    tracing::debug!("Creating shared ticker");
                    Ticker::new(IntervalFrameSource::default(), Rc::new(SystemClock))
                })
                .clone()
        })
    }

    /// Replace the thread's default ticker, returning the previous one
    ///
    /// Countdowns registered with the previous ticker stay with it.
    pub fn install_shared(ticker: Ticker) -> Option<Ticker> {
        SHARED.with(|slot| slot.borrow_mut().replace(ticker))
    }

    pub fn clock(&self) -> Rc<dyn Clock> {
        Rc::clone(&self.inner.clock)
    }

    /// Build a countdown on this ticker's clock (not yet registered)
    pub fn create(&self, config: &CountdownConfig, events: Option<EventSender>) -> CountdownHandle {
        let countdown = match events {
            Some(events) => Countdown::with_events(config, self.clock(), events),
            None => Countdown::new(config, self.clock()),
        };
        countdown.into_handle()
    }

    /// Add a countdown to the sweep
    ///
    /// Returns false if it was already registered. Starts the frame source
    /// when this is the first live countdown.
    ///
    /// # Panics
    ///
    /// Starting an [`IntervalFrameSource`] (the [`Ticker::shared`] default)
    /// panics outside a `tokio::task::LocalSet`.
    pub fn register(&self, countdown: &CountdownHandle) -> bool {
        let id = countdown.borrow().id();
        let count = {
            let mut registry = self.inner.registry.borrow_mut();
            if registry.iter().any(|e| e.countdown.as_ptr() == Rc::as_ptr(countdown)) {
                tracing::debug!(countdown = %id, "Countdown already registered");
                return false;
            }
            registry.push(Entry {
                id,
                countdown: Rc::downgrade(countdown),
            });
            registry.len()
        };

        tracing::debug!(countdown = %id, instances = count, "Countdown registered");
        self.inner.acquire();
        true
    }

    /// Remove a countdown from the sweep
    ///
    /// Returns false if it was not registered. Stops the frame source when
    /// the registry becomes empty.
    pub fn unregister(&self, countdown: &CountdownHandle) -> bool {
        self.inner.remove(Rc::as_ptr(countdown))
    }

    /// Register and return a guard that unregisters (and pauses) on drop
    ///
    /// # Panics
    ///
    /// Same as [`Ticker::register`]: an [`IntervalFrameSource`] must be
    /// started inside a `tokio::task::LocalSet`.
    pub fn mount(&self, countdown: &CountdownHandle) -> Registration {
        self.register(countdown);
        Registration::new(self.clone(), countdown)
    }

    pub(super) fn remove_weak(&self, countdown: &Weak<RefCell<Countdown>>) -> bool {
        self.inner.remove(countdown.as_ptr())
    }

    /// Number of registered countdowns, including any dropped since the last frame
    pub fn len(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_registered(&self, countdown: &CountdownHandle) -> bool {
        let ptr = Rc::as_ptr(countdown);
        self.inner
            .registry
            .borrow()
            .iter()
            .any(|e| e.countdown.as_ptr() == ptr)
    }

    /// True while the frame source is subscribed
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Ids of registered countdowns in registration order
    pub fn ids(&self) -> Vec<CountdownId> {
        self.inner.registry.borrow().iter().map(|e| e.id).collect()
    }

    pub fn ptr_eq(&self, other: &Ticker) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Inner {
    fn acquire(self: &Rc<Self>) {
        if self.running.replace(true) {
            return;
        }

        let ticker = Rc::downgrade(self);
        self.source.borrow_mut().start(Box::new(move || {
            if let Some(inner) = ticker.upgrade() {
                inner.sweep();
            }
        }));
        tracing::debug!("Ticker acquired frame source");
    }

    fn release(&self) {
        if !self.running.replace(false) {
            return;
        }

        self.source.borrow_mut().stop();
        tracing::debug!("Ticker released frame source");
    }

    fn remove(&self, ptr: *const RefCell<Countdown>) -> bool {
        let (removed, remaining) = {
            let mut registry = self.registry.borrow_mut();
            match registry.iter().position(|e| e.countdown.as_ptr() == ptr) {
                Some(index) => (Some(registry.remove(index).id), registry.len()),
                None => (None, registry.len()),
            }
        };

        let Some(id) = removed else {
            return false;
        };
        tracing::debug!(countdown = %id, instances = remaining, "Countdown unregistered");

        if remaining == 0 {
            self.release();
        }
        true
    }

    /// One frame: advance every live countdown
    fn sweep(&self) {
        let live: Vec<CountdownHandle> = {
            let mut registry = self.registry.borrow_mut();
            let before = registry.len();
            registry.retain(|e| e.countdown.strong_count() > 0);
            if registry.len() != before {
                tracing::debug!(pruned = before - registry.len(), "Pruned dropped countdowns");
            }
            registry.iter().filter_map(|e| e.countdown.upgrade()).collect()
        };

        if live.is_empty() {
            self.release();
            return;
        }

        let now = self.clock.now_ms();
        for countdown in &live {
            match countdown.try_borrow_mut() {
                Ok(mut countdown) => countdown.advance(now),
                Err(_) => tracing::trace!("Countdown borrowed elsewhere, skipping frame"),
            }
        }
        tracing::trace!(instances = live.len(), now, "Sweep complete");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.release();
    }
}
