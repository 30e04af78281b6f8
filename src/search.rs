//! Client search autocomplete.
//!
//! Idle → (≥ 2 chars, debounce elapsed) → searching → results / empty /
//! error → idle. A selection commits the client name into the search box
//! and the tier code into the hidden form field, then clears the results.
//! Clicking outside the box and the results also clears them; a committed
//! selection is retained.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use crate::api;
use crate::debounce;
use crate::dom;
use crate::state::{self, Client, ClientsResponse};

const SEARCH_WINDOW_MS: u32 = 300;
const MIN_QUERY_CHARS: usize = 2;
const SEQ_KEY: &str = "recherche-client";

#[derive(Clone)]
struct SearchBox {
    input: HtmlInputElement,
    results: Element,
    tiers_field: HtmlInputElement,
}

fn bind() -> Option<SearchBox> {
    Some(SearchBox {
        input: dom::by_id_typed("recherche-client")?,
        results: dom::by_id("resultats-clients")?,
        tiers_field: dom::by_id_typed("id_tiers")?,
    })
}

pub fn init() {
    let Some(els) = bind() else {
        gloo_console::debug!("recherche client inactive (éléments absents)");
        return;
    };

    // Typing: below the threshold clear immediately, otherwise debounce.
    {
        let els2 = els.clone();
        dom::listen(&els.input, "input", move |_| {
            if !query_ready(&els2.input.value()) {
                clear_results(&els2);
                return;
            }
            let els3 = els2.clone();
            debounce::schedule(SEQ_KEY, SEARCH_WINDOW_MS, move || {
                spawn_local(run_search(els3));
            });
        });
    }

    // Selection: delegated on the results container, which is regenerated
    // wholesale on every response.
    {
        let els2 = els.clone();
        dom::listen(&els.results, "click", move |e| {
            let Some(target) = e.target() else { return };
            let Ok(el) = target.dyn_into::<Element>() else {
                return;
            };
            let Some(hit) = el.closest(".resultat-client").ok().flatten() else {
                return;
            };
            let (Some(nom), Some(tiers)) =
                (hit.get_attribute("data-nom"), hit.get_attribute("data-tiers"))
            else {
                return;
            };
            els2.input.set_value(&nom);
            els2.tiers_field.set_value(&tiers);
            clear_results(&els2);
        });
    }

    // Clicking anywhere else returns to idle.
    {
        let els2 = els.clone();
        dom::listen(&dom::document(), "click", move |e| {
            if let Some(target) = e.target() {
                if let Ok(el) = target.dyn_into::<Element>() {
                    if el
                        .closest("#recherche-client, #resultats-clients")
                        .ok()
                        .flatten()
                        .is_some()
                    {
                        return;
                    }
                }
            }
            clear_results(&els2);
        });
    }
}

/// The server ignores queries under two characters; don't send them.
pub fn query_ready(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

async fn run_search(els: SearchBox) {
    let query = els.input.value().trim().to_string();
    if !query_ready(&query) {
        return;
    }

    let seq = state::issue_seq(SEQ_KEY);
    let path = format!(
        "{}?q={}",
        api::RECHERCHE_CLIENTS,
        js_sys::encode_uri_component(&query)
    );

    match api::get_json::<ClientsResponse>(&path).await {
        Ok(resp) => {
            if !state::seq_is_current(SEQ_KEY, seq) {
                return;
            }
            render_results(&els, &resp.clients);
        }
        Err(err) => {
            if !state::seq_is_current(SEQ_KEY, seq) {
                return;
            }
            // Search is advisory; degrade silently.
            gloo_console::debug!("recherche clients en échec:", err);
            clear_results(&els);
        }
    }
}

fn render_results(els: &SearchBox, clients: &[Client]) {
    if clients.is_empty() {
        els.results
            .set_inner_html(r#"<div class="resultat-vide">Aucun client trouvé.</div>"#);
        return;
    }

    let mut html = String::new();
    for client in clients {
        let complement = if client.complement.is_empty() {
            String::new()
        } else {
            format!(" <small>{}</small>", dom::escape_html(&client.complement))
        };
        html.push_str(&format!(
            r#"<div class="resultat-client" data-tiers="{tiers}" data-nom="{nom}">{nom}{complement}</div>"#,
            tiers = client.tiers,
            nom = dom::escape_html(&client.nom),
            complement = complement,
        ));
    }
    els.results.set_inner_html(&html);
}

fn clear_results(els: &SearchBox) {
    els.results.set_inner_html("");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_gate_requires_two_characters() {
        assert!(!query_ready(""));
        assert!(!query_ready("a"));
        assert!(!query_ready("  a  "));
        assert!(query_ready("ab"));
        assert!(query_ready("12"));
    }
}
