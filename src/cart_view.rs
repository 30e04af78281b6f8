//! Cart projection.
//!
//! Renders a `CartView` onto the page: nav badge, item count, grand total,
//! per-line totals, row removal, and the recap panel. Display only changes
//! here, and only after the server confirmed the state being shown.

use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom;
use crate::state::{CartView, LignePanier};

const BADGE_ID: &str = "panier-badge";
const NAV_LINK_ID: &str = "panier-link";
const RECAP_ID: &str = "recap-panier";

/// One render pass for everything a cart response can affect.
pub fn render(view: &CartView) {
    render_badge(view.count);
    if let Some(total) = dom::by_id("total-panier") {
        total.set_text_content(Some(&format_euros(view.total)));
    }
    if let Some(count) = dom::by_id("nombre-articles") {
        count.set_text_content(Some(&view.count.to_string()));
    }
    if let Some(lines) = &view.lines {
        render_recap(lines);
    }
}

/// Nav badge: absent while the cart is empty, created on demand otherwise.
/// Replays a short emphasis animation whenever the count changes.
pub fn render_badge(count: i64) {
    let Some(link) = dom::by_id(NAV_LINK_ID) else {
        return;
    };

    if count <= 0 {
        if let Some(badge) = dom::by_id(BADGE_ID) {
            badge.remove();
        }
        return;
    }

    let badge = match dom::by_id(BADGE_ID) {
        Some(b) => b,
        None => {
            let b = dom::create_element("span");
            b.set_id(BADGE_ID);
            let _ = b.set_attribute("class", "badge-panier");
            let _ = link.append_child(&b);
            b
        }
    };

    let text = count.to_string();
    let changed = badge.text_content().as_deref() != Some(text.as_str());
    badge.set_text_content(Some(&text));
    if changed {
        pulse(&badge);
    }
}

/// Restart the `badge-pulse` animation from the beginning.
fn pulse(badge: &Element) {
    let _ = badge.class_list().remove_1("badge-pulse");
    // Reading a layout property flushes pending style, so re-adding the
    // class restarts the animation instead of being coalesced away.
    let _ = badge.unchecked_ref::<web_sys::HtmlElement>().offset_width();
    let _ = badge.class_list().add_1("badge-pulse");
}

/// Update the total cell of one cart table row in place.
pub fn set_line_total(reference: &str, total: f64) {
    let selector = format!(r#"tr[data-reference="{}"] .total-ligne"#, reference);
    if let Some(cell) = dom::query(&selector) {
        cell.set_text_content(Some(&format_euros(total)));
    }
}

/// Remove a cart table row. Removing the last row reloads the page so the
/// server can render the empty-cart view.
pub fn remove_row(reference: &str) {
    let selector = format!(r#"tr[data-reference="{}"]"#, reference);
    let Some(row) = dom::query(&selector) else {
        return;
    };
    row.remove();

    if dom::query_all("tr[data-reference]").is_empty() {
        dom::reload();
    }
}

/// Regenerate the recap panel wholesale from the reported line list.
/// Remove buttons inside it carry `data-reference`; clicks are handled by
/// one delegated listener on the panel, so nothing is re-bound here.
pub fn render_recap(lines: &[LignePanier]) {
    let Some(panel) = dom::by_id(RECAP_ID) else {
        return;
    };

    if lines.is_empty() {
        panel.set_inner_html(r#"<p class="panier-vide">Votre panier est vide.</p>"#);
        return;
    }

    let mut html = String::from(r#"<ul class="recap-lignes">"#);
    for line in lines {
        html.push_str(&format!(
            r#"<li data-reference="{reference}"><span class="recap-nom">{nom}</span><span class="recap-quantite">× {quantite}</span><span class="recap-total">{total}</span><button type="button" class="recap-supprimer" data-reference="{reference}" title="Retirer du panier">×</button></li>"#,
            reference = dom::escape_html(&line.reference),
            nom = dom::escape_html(&line.nom),
            quantite = line.quantite,
            total = format_euros(line.total),
        ));
    }
    html.push_str("</ul>");
    panel.set_inner_html(&html);
}

/// French money rendering: two decimals, comma separator.
pub fn format_euros(amount: f64) -> String {
    format!("{amount:.2} €").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_euros_uses_comma_and_two_decimals() {
        assert_eq!(format_euros(12.5), "12,50 €");
        assert_eq!(format_euros(0.0), "0,00 €");
        assert_eq!(format_euros(1234.567), "1234,57 €");
    }
}
