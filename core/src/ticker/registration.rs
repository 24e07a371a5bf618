//! Mount guard for a registered countdown

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::Ticker;
use crate::countdown::{Countdown, CountdownHandle, CountdownId};

/// Keeps a countdown in its ticker's sweep until dropped
///
/// Dropping the guard pauses the countdown and unregisters it, releasing the
/// frame source if it was the last one.
#[must_use = "dropping a Registration unmounts the countdown immediately"]
pub struct Registration {
    ticker: Ticker,
    countdown: Weak<RefCell<Countdown>>,
    id: CountdownId,
}

impl Registration {
    pub(super) fn new(ticker: Ticker, countdown: &CountdownHandle) -> Self {
        let id = countdown.borrow().id();
        Self {
            ticker,
            countdown: Rc::downgrade(countdown),
            id,
        }
    }

    pub fn id(&self) -> CountdownId {
        self.id
    }

    /// The mounted countdown, if its owner still holds it
    pub fn countdown(&self) -> Option<CountdownHandle> {
        self.countdown.upgrade()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(countdown) = self.countdown.upgrade()
            && let Ok(mut countdown) = countdown.try_borrow_mut()
        {
            countdown.pause();
        }
        self.ticker.remove_weak(&self.countdown);
    }
}
