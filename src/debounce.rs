//! Keyed debounce channel.
//!
//! At most one pending timer per logical key; scheduling cancels and
//! replaces any pending action for that key, so only the action supplied
//! with the last call before a quiescent window ever fires. Intermediate
//! actions are dropped, never queued.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static PENDING: RefCell<HashMap<String, Timeout>> = RefCell::new(HashMap::new());
}

/// Run `action` once `window_ms` elapses without another `schedule` for
/// the same key.
pub fn schedule(key: &str, window_ms: u32, action: impl FnOnce() + 'static) {
    let key = key.to_string();
    PENDING.with(|pending| {
        let mut map = pending.borrow_mut();
        if let Some(previous) = map.remove(&key) {
            previous.cancel();
        }
        let cleanup_key = key.clone();
        let timeout = Timeout::new(window_ms, move || {
            PENDING.with(|pending| {
                pending.borrow_mut().remove(&cleanup_key);
            });
            action();
        });
        map.insert(key, timeout);
    });
}
