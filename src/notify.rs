//! Transient notification surface.
//!
//! One toast at a time: showing a new one removes the current toast and
//! cancels its dismiss timer. Auto-dismisses after three seconds, or
//! immediately via the close button. Severity maps to styling only.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;

use crate::dom;

const DISMISS_AFTER_MS: u32 = 3_000;
const TOAST_ID: &str = "notification-extranet";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Succes,
    Attention,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Succes => "notification-succes",
            Severity::Attention => "notification-attention",
            Severity::Danger => "notification-danger",
        }
    }
}

thread_local! {
    static DISMISS_TIMER: RefCell<Option<Timeout>> = RefCell::new(None);
}

pub fn show(severity: Severity, message: &str) {
    dismiss();

    let toast = dom::create_element("div");
    toast.set_id(TOAST_ID);
    let _ = toast.set_attribute("class", &format!("notification {}", severity.css_class()));

    let text = dom::create_element("span");
    text.set_text_content(Some(message));
    let _ = toast.append_child(&text);

    let close = dom::create_element("button");
    let _ = close.set_attribute("type", "button");
    let _ = close.set_attribute("class", "notification-fermer");
    close.set_text_content(Some("×"));
    dom::listen(&close, "click", |_| dismiss());
    let _ = toast.append_child(&close);

    if let Some(body) = dom::document().body() {
        let _ = body.append_child(&toast);
    }

    DISMISS_TIMER.with(|slot| {
        *slot.borrow_mut() = Some(Timeout::new(DISMISS_AFTER_MS, dismiss));
    });
}

pub fn dismiss() {
    DISMISS_TIMER.with(|slot| {
        if let Some(timer) = slot.borrow_mut().take() {
            timer.cancel();
        }
    });
    if let Some(toast) = dom::by_id(TOAST_ID) {
        toast.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_maps_to_css_only() {
        assert_eq!(Severity::Succes.css_class(), "notification-succes");
        assert_eq!(Severity::Attention.css_class(), "notification-attention");
        assert_eq!(Severity::Danger.css_class(), "notification-danger");
    }
}
