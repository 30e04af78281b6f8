//! Shared client state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Holds the serde models for server payloads, the last cart snapshot the
//! server confirmed, and the per-key response sequencer.

use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;

// ── Server payloads ──

/// One cart line as the server reports it. `total` is authoritative;
/// the client never recomputes it.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LignePanier {
    pub reference: String,
    pub nom: String,
    pub quantite: i64,
    pub prix: f64,
    pub total: f64,
}

/// Response body shared by every cart endpoint. Fields absent from a given
/// operation decode as `None`; a body without `success: true` is a logical
/// failure whatever else it carries.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PanierResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub panier_count: Option<i64>,
    #[serde(default)]
    pub total_panier: Option<f64>,
    #[serde(default)]
    pub total_ligne: Option<f64>,
    #[serde(default)]
    pub lignes_panier: Option<Vec<LignePanier>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Client {
    pub tiers: i64,
    pub nom: String,
    #[serde(default)]
    pub complement: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClientsResponse {
    #[serde(default)]
    pub clients: Vec<Client>,
}

// ── Cart view state ──

/// The client's mirror of the cart, folded from successive responses and
/// projected onto the page in one pass (`cart_view::render`).
#[derive(Clone, Debug, Default)]
pub struct CartView {
    pub count: i64,
    pub total: f64,
    /// Present only after an operation that returned the full line list.
    pub lines: Option<Vec<LignePanier>>,
}

impl CartView {
    /// Fold a response into the view. A response is authoritative only for
    /// the fields it carries; `lignes_panier` replaces the list wholesale.
    pub fn apply(&mut self, resp: &PanierResponse) {
        if let Some(count) = resp.panier_count {
            self.count = count;
        }
        if let Some(total) = resp.total_panier {
            self.total = total;
        }
        if let Some(lines) = &resp.lignes_panier {
            self.lines = Some(lines.clone());
        }
    }
}

thread_local! {
    static CART: RefCell<CartView> = RefCell::new(CartView::default());
}

/// Fold a confirmed response into the held snapshot, returning the result.
pub fn update_cart(resp: &PanierResponse) -> CartView {
    CART.with(|c| {
        let mut view = c.borrow_mut();
        view.apply(resp);
        view.clone()
    })
}

// ── Per-key response sequencing ──

/// Monotonic sequence per logical key (product reference, search box).
/// A response is applied only while its sequence is still the latest
/// issued for that key, so a slow early request can never overwrite the
/// effect of a later one.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: HashMap<String, u64>,
}

impl Sequencer {
    pub fn issue(&mut self, key: &str) -> u64 {
        let seq = self.latest.entry(key.to_string()).or_insert(0);
        *seq += 1;
        *seq
    }

    pub fn is_current(&self, key: &str, seq: u64) -> bool {
        self.latest.get(key).copied() == Some(seq)
    }
}

thread_local! {
    static SEQ: RefCell<Sequencer> = RefCell::new(Sequencer::default());
}

pub fn issue_seq(key: &str) -> u64 {
    SEQ.with(|s| s.borrow_mut().issue(key))
}

pub fn seq_is_current(key: &str, seq: u64) -> bool {
    SEQ.with(|s| s.borrow().is_current(key, seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_fields_the_response_omits() {
        let mut view = CartView {
            count: 3,
            total: 42.0,
            lines: Some(vec![LignePanier::default()]),
        };
        // A quantity-change response carries no line list.
        let resp = PanierResponse {
            success: true,
            panier_count: Some(5),
            total_panier: Some(50.5),
            total_ligne: Some(10.1),
            ..Default::default()
        };
        view.apply(&resp);
        assert_eq!(view.count, 5);
        assert_eq!(view.total, 50.5);
        assert!(view.lines.is_some(), "line list survives a partial response");
    }

    #[test]
    fn apply_replaces_line_list_wholesale() {
        let mut view = CartView::default();
        let resp: PanierResponse = serde_json::from_str(
            r#"{
                "success": true,
                "panier_count": 2,
                "total_panier": 19.8,
                "lignes_panier": [
                    {"reference": "F001", "nom": "Farine", "quantite": 2, "prix": 9.9, "total": 19.8}
                ]
            }"#,
        )
        .unwrap();
        view.apply(&resp);
        let lines = view.lines.as_ref().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].reference, "F001");

        // An empty list is still a replacement, not "no information".
        let emptied = PanierResponse {
            success: true,
            lignes_panier: Some(Vec::new()),
            ..Default::default()
        };
        view.apply(&emptied);
        assert!(view.lines.as_ref().unwrap().is_empty());
    }

    #[test]
    fn logical_failure_carries_its_message() {
        let resp: PanierResponse = serde_json::from_str(
            r#"{"success": false, "message": "Stock insuffisant. Vous avez déjà 4 en panier."}"#,
        )
        .unwrap();
        assert!(!resp.success);
        assert_eq!(
            resp.message.as_deref(),
            Some("Stock insuffisant. Vous avez déjà 4 en panier.")
        );
        assert!(resp.panier_count.is_none());
    }

    #[test]
    fn sequencer_rejects_stale_responses() {
        let mut seq = Sequencer::default();
        let first = seq.issue("F001");
        let second = seq.issue("F001");
        assert!(!seq.is_current("F001", first), "older request is stale");
        assert!(seq.is_current("F001", second));
    }

    #[test]
    fn sequencer_keys_are_independent() {
        let mut seq = Sequencer::default();
        let a = seq.issue("F001");
        let _b = seq.issue("F002");
        assert!(seq.is_current("F001", a));
        assert!(!seq.is_current("F003", 1), "unknown key has no current seq");
    }
}
