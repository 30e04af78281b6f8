//! DOM helpers.
//!
//! Thin wrappers over `web-sys` lookups and event wiring. Widgets resolve
//! their elements once at startup and keep the handles; nothing here
//! re-queries the document per event.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlInputElement, Window};

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn query_typed<T: JsCast>(selector: &str) -> Option<T> {
    query(selector).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let nl = document().query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

/// Trimmed value of the first `<input>` matching `selector` under `parent`.
pub fn input_value_in(parent: &Element, selector: &str) -> Option<String> {
    let el = parent.query_selector(selector).ok().flatten()?;
    let input = el.dyn_into::<HtmlInputElement>().ok()?;
    Some(input.value().trim().to_string())
}

pub fn create_element(tag: &str) -> Element {
    document().create_element(tag).unwrap()
}

/// Attach an event listener for the lifetime of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

pub fn reload() {
    let _ = window().location().reload();
}

/// Escape text destined for an HTML fragment (content or attribute value).
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralises_markup() {
        assert_eq!(
            escape_html(r#"Biscuits <Choc> & "Noir" d'été"#),
            "Biscuits &lt;Choc&gt; &amp; &quot;Noir&quot; d&#39;été"
        );
    }

    #[test]
    fn escape_html_passes_plain_text_through() {
        assert_eq!(escape_html("Farine T55 1kg"), "Farine T55 1kg");
    }
}
