//! HTTP client for the Extranet backend.
//!
//! All mutating calls are form-encoded POSTs carrying the
//! `X-Requested-With: XMLHttpRequest` marker and the Django anti-forgery
//! token (hidden form field, else the `csrftoken` cookie). Responses are
//! decoded from text with `serde_json`; any transport or decode failure
//! surfaces as a `String` the caller reports without touching the page.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlInputElement};

use crate::dom;

// Server routes (same-origin unless a base override is present).
pub const PANIER_AJOUTER: &str = "/commandes/panier/ajouter/";
pub const PANIER_MODIFIER: &str = "/commandes/panier/modifier/";
pub const PANIER_SUPPRIMER: &str = "/commandes/panier/supprimer/";
pub const PANIER_VIDER: &str = "/commandes/panier/vider/";
pub const RECHERCHE_CLIENTS: &str = "/administration/api/recherche-clients/";

/// URL prefix for API calls.
///
/// Empty (same-origin) unless the page carries
/// `<meta name="extranet-api-base" content="…">`.
pub fn base_url() -> String {
    dom::query("meta[name=extranet-api-base]")
        .and_then(|m| m.get_attribute("content"))
        .map(|c| c.trim().trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// Form-encoded POST, decoded as JSON.
pub async fn post_form<T: DeserializeOwned>(
    path: &str,
    fields: &[(&str, String)],
) -> Result<T, String> {
    let url = format!("{}{}", base_url(), path);

    let mut builder = Request::post(&url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("X-Requested-With", "XMLHttpRequest");
    if let Some(token) = csrf_token() {
        builder = builder.header("X-CSRFToken", &token);
    }

    let request = builder
        .body(form_encode(fields))
        .map_err(|e| format!("requête invalide: {e}"))?;

    let resp = request
        .send()
        .await
        .map_err(|e| format!("erreur réseau: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {} {}", resp.status(), resp.status_text()));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| format!("lecture de la réponse: {e}"))?;
    decode(&text)
}

/// GET with the AJAX marker header, decoded as JSON.
pub async fn get_json<T: DeserializeOwned>(path_and_query: &str) -> Result<T, String> {
    let url = format!("{}{}", base_url(), path_and_query);

    let resp = Request::get(&url)
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await
        .map_err(|e| format!("erreur réseau: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {} {}", resp.status(), resp.status_text()));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| format!("lecture de la réponse: {e}"))?;
    decode(&text)
}

pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    serde_json::from_str(text).map_err(|e| format!("réponse illisible: {e}"))
}

fn form_encode(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, js_sys::encode_uri_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Anti-forgery token: hidden `csrfmiddlewaretoken` field if the page has
/// one, else the `csrftoken` cookie.
pub fn csrf_token() -> Option<String> {
    if let Some(input) = dom::query_typed::<HtmlInputElement>("input[name=csrfmiddlewaretoken]") {
        let v = input.value();
        if !v.is_empty() {
            return Some(v);
        }
    }

    let doc: HtmlDocument = dom::document().unchecked_into();
    let raw = doc.cookie().ok()?;
    cookie_value(&raw, "csrftoken")
}

fn cookie_value(raw: &str, name: &str) -> Option<String> {
    raw.split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(name).and_then(|r| r.strip_prefix('=')))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_finds_token_among_cookies() {
        let raw = "sessionid=abc123; csrftoken=tok-456; theme=dark";
        assert_eq!(cookie_value(raw, "csrftoken"), Some("tok-456".into()));
    }

    #[test]
    fn cookie_value_ignores_prefix_matches() {
        let raw = "csrftoken_old=nope; csrftoken=yes";
        assert_eq!(cookie_value(raw, "csrftoken"), Some("yes".into()));
    }

    #[test]
    fn cookie_value_missing() {
        assert_eq!(cookie_value("sessionid=abc", "csrftoken"), None);
    }

    #[test]
    fn decode_rejects_malformed_body() {
        let out: Result<serde_json::Value, String> = decode("<html>500</html>");
        assert!(out.is_err());
    }
}
