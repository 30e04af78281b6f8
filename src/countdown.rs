//! Expiry countdowns.
//!
//! Each `[data-compte-a-rebours]` element starts from its `data-secondes`
//! attribute and ticks down once per second, rendered as minutes:seconds.
//! When a tick reaches zero the page reloads once: the expired entry must
//! disappear from the server-rendered list.

use gloo_timers::callback::Interval;
use std::cell::Cell;
use std::rc::Rc;
use web_sys::Element;

use crate::dom;

const TICK_MS: u32 = 1_000;

pub fn init() {
    for el in dom::query_all("[data-compte-a-rebours]") {
        let remaining = el
            .get_attribute("data-secondes")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(0);
        start(el, remaining);
    }
}

fn start(el: Element, remaining: i64) {
    el.set_text_content(Some(&format_remaining(remaining.max(0))));
    // Already expired when the page rendered: display 0:00 and leave the
    // reload to whoever rendered it, otherwise every load would reload.
    if remaining <= 0 {
        return;
    }

    let left = Rc::new(Cell::new(remaining));
    let fired = Rc::new(Cell::new(false));
    let interval = Interval::new(TICK_MS, move || {
        if fired.get() {
            return;
        }
        let (next, expired) = tick(left.get());
        left.set(next);
        el.set_text_content(Some(&format_remaining(next)));
        if expired {
            fired.set(true);
            dom::reload();
        }
    });
    interval.forget();
}

/// One second elapses. Returns the new remainder and whether this tick is
/// the one that hit zero.
pub(crate) fn tick(remaining: i64) -> (i64, bool) {
    let next = (remaining - 1).max(0);
    (next, remaining > 0 && next == 0)
}

pub fn format_remaining(secs: i64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_minutes_and_padded_seconds() {
        assert_eq!(format_remaining(300), "5:00");
        assert_eq!(format_remaining(59), "0:59");
        assert_eq!(format_remaining(61), "1:01");
        assert_eq!(format_remaining(0), "0:00");
    }

    #[test]
    fn five_ticks_from_five_expire_exactly_once() {
        let mut remaining = 5;
        let mut expirations = 0;
        for _ in 0..8 {
            let (next, expired) = tick(remaining);
            remaining = next;
            if expired {
                expirations += 1;
            }
        }
        assert_eq!(remaining, 0);
        assert_eq!(expirations, 1, "reload must trigger once, at zero");
    }

    #[test]
    fn tick_does_not_fire_before_zero() {
        let (next, expired) = tick(2);
        assert_eq!(next, 1);
        assert!(!expired);
    }
}
