//! Extranet browser enhancements
//!
//! Rust + WASM replacement for the page scripts of the Extranet ordering
//! application. The backend renders every page; this crate binds the
//! interactive behaviour the templates expect: cart synchronisation,
//! client autocomplete, and a handful of small widgets.
//!
//! The module is loaded on every page. Each widget checks for its own DOM
//! anchors at startup and stays inert when they are absent, so one build
//! serves the catalogue, cart, and administration pages alike.

pub mod api;
pub mod cart;
pub mod cart_view;
pub mod countdown;
pub mod date_offset;
pub mod debounce;
pub mod dom;
pub mod listing;
pub mod notify;
pub mod password;
pub mod search;
pub mod state;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init();
}

/// Bind every widget whose anchors exist on the current page.
fn init() {
    cart::init();
    search::init();
    date_offset::init();
    countdown::init();
    listing::init();
    password::init();
}
