//! Cart synchronisation.
//!
//! One async operation per server endpoint, wired to the add-to-cart
//! forms, the quantity inputs of the cart table, the per-line remove
//! buttons, the clear button, and the recap panel. Quantity edits are
//! debounced per product reference; every mutation goes through the
//! per-key sequencer so a stale response is dropped instead of applied.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};

use crate::api;
use crate::cart_view;
use crate::debounce;
use crate::dom;
use crate::notify::{self, Severity};
use crate::state::{self, PanierResponse};

const QUANTITY_WINDOW_MS: u32 = 450;
const CLEAR_KEY: &str = "panier";
const GENERIC_FAILURE: &str = "Une erreur est survenue. Veuillez réessayer.";

pub fn init() {
    bind_add_forms();
    bind_quantity_inputs();
    bind_remove_buttons();
    bind_clear_button();
    bind_recap_panel();
}

// ── Event wiring ──

fn bind_add_forms() {
    for form in dom::query_all("form.ajout-panier-form") {
        let form2 = form.clone();
        dom::listen(&form, "submit", move |e| {
            e.prevent_default();
            let Some(reference) = dom::input_value_in(&form2, "input[name=reference]") else {
                return;
            };
            let quantite = dom::input_value_in(&form2, "input[name=quantite]")
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| "1".to_string());

            // Optimistic UI: hold the button down until the server answers.
            let bouton = form2
                .query_selector("button[type=submit]")
                .ok()
                .flatten()
                .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());
            if let Some(b) = &bouton {
                b.set_disabled(true);
            }

            spawn_local(add_item(reference, quantite, bouton));
        });
    }
}

fn bind_quantity_inputs() {
    for el in dom::query_all("input.quantite-input[data-reference]") {
        let Some(reference) = el.get_attribute("data-reference") else {
            continue;
        };
        let Ok(input) = el.dyn_into::<HtmlInputElement>() else {
            continue;
        };

        let input2 = input.clone();
        dom::listen(&input, "input", move |_| {
            let input3 = input2.clone();
            let reference2 = reference.clone();
            debounce::schedule(
                &format!("quantite:{reference}"),
                QUANTITY_WINDOW_MS,
                move || spawn_local(set_quantity(reference2, input3)),
            );
        });
    }
}

fn bind_remove_buttons() {
    for btn in dom::query_all(".supprimer-ligne[data-reference]") {
        let Some(reference) = btn.get_attribute("data-reference") else {
            continue;
        };
        dom::listen(&btn, "click", move |e| {
            e.prevent_default();
            request_removal(reference.clone());
        });
    }
}

fn bind_clear_button() {
    let Some(btn) = dom::by_id("vider-panier") else {
        return;
    };
    dom::listen(&btn, "click", |e| {
        e.prevent_default();
        if !confirmed("Vider entièrement le panier ?") {
            return;
        }
        spawn_local(clear_cart());
    });
}

/// The recap panel is regenerated wholesale on every update, so its remove
/// buttons are handled by one delegated listener on the stable ancestor.
fn bind_recap_panel() {
    let Some(panel) = dom::by_id("recap-panier") else {
        return;
    };
    dom::listen(&panel, "click", |e| {
        let Some(target) = e.target() else { return };
        let Ok(el) = target.dyn_into::<Element>() else {
            return;
        };
        let Some(btn) = el.closest(".recap-supprimer").ok().flatten() else {
            return;
        };
        let Some(reference) = btn.get_attribute("data-reference") else {
            return;
        };
        request_removal(reference);
    });
}

/// Interactive gate shared by the row buttons and the recap panel.
fn request_removal(reference: String) {
    if !confirmed("Retirer cet article du panier ?") {
        return;
    }
    spawn_local(remove_line(reference));
}

fn confirmed(question: &str) -> bool {
    dom::window()
        .confirm_with_message(question)
        .unwrap_or(false)
}

// ── Operations ──

async fn add_item(reference: String, quantite: String, bouton: Option<HtmlButtonElement>) {
    let seq = state::issue_seq(&reference);
    let result = api::post_form::<PanierResponse>(
        api::PANIER_AJOUTER,
        &[
            ("reference", reference.clone()),
            ("quantite", quantite),
        ],
    )
    .await;

    if let Some(b) = &bouton {
        b.set_disabled(false);
    }
    if !state::seq_is_current(&reference, seq) {
        gloo_console::debug!("réponse périmée ignorée:", reference);
        return;
    }

    apply_outcome(result, "Article ajouté au panier.");
}

async fn set_quantity(reference: String, input: HtmlInputElement) {
    // Read the value when the quiescence window elapses, not when the
    // first keystroke arrived.
    let quantite: i64 = input.value().trim().parse().unwrap_or(0);

    let seq = state::issue_seq(&reference);
    let result = api::post_form::<PanierResponse>(
        api::PANIER_MODIFIER,
        &[
            ("reference", reference.clone()),
            ("quantite", quantite.to_string()),
        ],
    )
    .await;

    if !state::seq_is_current(&reference, seq) {
        gloo_console::debug!("réponse périmée ignorée:", reference);
        return;
    }

    let Some(resp) = apply_outcome(result, "Quantité mise à jour.") else {
        return;
    };

    if quantite <= 0 {
        // The server already dropped the line; mirror it.
        cart_view::remove_row(&reference);
    } else if let Some(total) = resp.total_ligne {
        cart_view::set_line_total(&reference, total);
    }
}

async fn remove_line(reference: String) {
    let seq = state::issue_seq(&reference);
    let result = api::post_form::<PanierResponse>(
        api::PANIER_SUPPRIMER,
        &[("reference", reference.clone())],
    )
    .await;

    if !state::seq_is_current(&reference, seq) {
        gloo_console::debug!("réponse périmée ignorée:", reference);
        return;
    }

    if apply_outcome(result, "Article supprimé du panier.").is_some() {
        cart_view::remove_row(&reference);
    }
}

async fn clear_cart() {
    let seq = state::issue_seq(CLEAR_KEY);
    let result = api::post_form::<PanierResponse>(api::PANIER_VIDER, &[]).await;

    if !state::seq_is_current(CLEAR_KEY, seq) {
        return;
    }

    match result {
        // The empty-cart page is server-rendered; reload instead of
        // rebuilding it client-side.
        Ok(resp) if resp.success => dom::reload(),
        Ok(resp) => notify::show(
            Severity::Attention,
            resp.message.as_deref().unwrap_or(GENERIC_FAILURE),
        ),
        Err(err) => {
            gloo_console::error!(err);
            notify::show(Severity::Danger, GENERIC_FAILURE);
        }
    }
}

/// Shared response boundary: fold a confirmed response into the cart view
/// and project it, or report the failure without touching the page.
fn apply_outcome(result: Result<PanierResponse, String>, default_msg: &str) -> Option<PanierResponse> {
    match result {
        Ok(resp) if resp.success => {
            let view = state::update_cart(&resp);
            cart_view::render(&view);
            notify::show(
                Severity::Succes,
                resp.message.as_deref().unwrap_or(default_msg),
            );
            Some(resp)
        }
        Ok(resp) => {
            notify::show(
                Severity::Attention,
                resp.message.as_deref().unwrap_or(GENERIC_FAILURE),
            );
            None
        }
        Err(err) => {
            gloo_console::error!(err);
            notify::show(Severity::Danger, GENERIC_FAILURE);
            None
        }
    }
}
