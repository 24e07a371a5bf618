use countdown_core::{
    AppConfig, CountdownConfig, CountdownHandle, CountdownId, EventSender, Registration, Ticker,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

/// A countdown mounted by the host, kept alive until removed.
pub struct Mounted {
    // Declared first so it drops (pausing and unregistering) before the handle
    _registration: Registration,
    pub label: String,
    pub countdown: CountdownHandle,
}

/// Holds all shared state for the CLI application.
/// Everything lives on the single runtime thread, so plain RefCells suffice.
pub struct CliContext {
    pub config: RefCell<AppConfig>,
    pub ticker: Ticker,
    events: EventSender,
    mounted: RefCell<BTreeMap<CountdownId, Mounted>>,
    followed: RefCell<HashSet<CountdownId>>,
}

impl CliContext {
    pub fn new(config: AppConfig, ticker: Ticker, events: EventSender) -> Self {
        Self {
            config: RefCell::new(config),
            ticker,
            events,
            mounted: RefCell::new(BTreeMap::new()),
            followed: RefCell::new(HashSet::new()),
        }
    }

    /// Mount every countdown listed in the configuration.
    pub fn mount_configured(&self) -> usize {
        let configs = self.config.borrow().countdowns.clone();
        for config in &configs {
            self.mount(config);
        }
        configs.len()
    }

    /// Create, register and keep a countdown. Returns its id.
    pub fn mount(&self, config: &CountdownConfig) -> CountdownId {
        let countdown = self.ticker.create(config, Some(self.events.clone()));
        let id = countdown.borrow().id();
        let registration = self.ticker.mount(&countdown);
        let label = config
            .label
            .clone()
            .unwrap_or_else(|| format!("Countdown {}", id.get()));

        tracing::info!(countdown = %id, %label, time_ms = config.time_ms, "Mounted countdown");
        self.mounted.borrow_mut().insert(
            id,
            Mounted {
                _registration: registration,
                label,
                countdown,
            },
        );
        id
    }

    /// Unmount a countdown. Returns its label if it existed.
    pub fn unmount(&self, id: u64) -> Option<String> {
        let key = self.key(id)?;
        self.followed.borrow_mut().remove(&key);
        let mounted = self.mounted.borrow_mut().remove(&key)?;
        tracing::info!(countdown = %key, "Unmounted countdown");
        Some(mounted.label)
    }

    /// Look up a mounted countdown by its numeric id.
    pub fn get(&self, id: u64) -> Option<(String, CountdownHandle)> {
        let key = self.key(id)?;
        self.mounted
            .borrow()
            .get(&key)
            .map(|m| (m.label.clone(), m.countdown.clone()))
    }

    pub fn label(&self, id: CountdownId) -> Option<String> {
        self.mounted.borrow().get(&id).map(|m| m.label.clone())
    }

    /// All mounted countdowns in id order.
    pub fn entries(&self) -> Vec<(CountdownId, String, CountdownHandle)> {
        self.mounted
            .borrow()
            .iter()
            .map(|(id, m)| (*id, m.label.clone(), m.countdown.clone()))
            .collect()
    }

    /// Toggle tick printing for a countdown. Returns the new state.
    pub fn toggle_follow(&self, id: u64) -> Option<bool> {
        let key = self.key(id)?;
        let mut followed = self.followed.borrow_mut();
        if followed.remove(&key) {
            Some(false)
        } else {
            followed.insert(key);
            Some(true)
        }
    }

    pub fn is_followed(&self, id: CountdownId) -> bool {
        self.followed.borrow().contains(&id)
    }

    fn key(&self, id: u64) -> Option<CountdownId> {
        self.mounted.borrow().keys().find(|k| k.get() == id).copied()
    }
}
