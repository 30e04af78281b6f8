//! Product-list presentation.
//!
//! Long lists are capped per viewport width (20 below 768 px, 60 below
//! 1200 px, unbounded beyond) with an "Afficher plus" control revealing
//! the remainder; recomputed on every resize. Filter groups with a
//! pre-checked option open expanded.

use web_sys::Element;

use crate::dom;

const MOBILE_BREAKPOINT: i32 = 768;
const DESKTOP_BREAKPOINT: i32 = 1200;
const MOBILE_CAP: usize = 20;
const TABLET_CAP: usize = 60;

const REVEALED_ATTR: &str = "data-affichage-complet";
const MORE_CLASS: &str = "afficher-plus";

pub fn init() {
    expand_checked_groups();

    let containers = dom::query_all("[data-liste-tronquee]");
    if containers.is_empty() {
        return;
    }
    for container in &containers {
        apply(container);
    }

    let containers2 = containers.clone();
    dom::listen(&dom::window(), "resize", move |_| {
        for container in &containers2 {
            apply(container);
        }
    });
}

/// Visible-item cap for a viewport width; `None` means unbounded.
pub fn visible_cap(viewport_width: i32) -> Option<usize> {
    if viewport_width < MOBILE_BREAKPOINT {
        Some(MOBILE_CAP)
    } else if viewport_width < DESKTOP_BREAKPOINT {
        Some(TABLET_CAP)
    } else {
        None
    }
}

pub fn more_label(hidden: usize) -> String {
    format!("Afficher plus ({hidden} restants)")
}

/// Open every filter group that already has a checked option.
fn expand_checked_groups() {
    for group in dom::query_all("details.groupe-filtre") {
        if group.query_selector("input:checked").ok().flatten().is_some() {
            let _ = group.set_attribute("open", "");
        }
    }
}

fn apply(container: &Element) {
    if let Ok(Some(old)) = container.query_selector(&format!(".{MORE_CLASS}")) {
        old.remove();
    }

    let items = items_of(container);
    let cap = if container.has_attribute(REVEALED_ATTR) {
        // The user asked for everything once; resizes keep it that way.
        None
    } else {
        visible_cap(viewport_width())
    };

    let hidden = match cap {
        None => {
            for item in &items {
                let _ = item.remove_attribute("hidden");
            }
            0
        }
        Some(cap) => {
            let mut hidden = 0;
            for (i, item) in items.iter().enumerate() {
                if i < cap {
                    let _ = item.remove_attribute("hidden");
                } else {
                    let _ = item.set_attribute("hidden", "");
                    hidden += 1;
                }
            }
            hidden
        }
    };

    if hidden > 0 {
        let more = dom::create_element("button");
        let _ = more.set_attribute("type", "button");
        let _ = more.set_attribute("class", MORE_CLASS);
        more.set_text_content(Some(&more_label(hidden)));

        let container2 = container.clone();
        dom::listen(&more, "click", move |_| {
            let _ = container2.set_attribute(REVEALED_ATTR, "");
            apply(&container2);
        });
        let _ = container.append_child(&more);
    }
}

/// The container's direct children, minus the control itself.
fn items_of(container: &Element) -> Vec<Element> {
    let children = container.children();
    let mut items = Vec::new();
    for i in 0..children.length() {
        if let Some(child) = children.item(i) {
            if !child.class_list().contains(MORE_CLASS) {
                items.push(child);
            }
        }
    }
    items
}

fn viewport_width() -> i32 {
    dom::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_follow_the_breakpoints() {
        assert_eq!(visible_cap(700), Some(20));
        assert_eq!(visible_cap(1000), Some(60));
        assert_eq!(visible_cap(1300), None);
    }

    #[test]
    fn breakpoints_belong_to_the_wider_band() {
        assert_eq!(visible_cap(767), Some(20));
        assert_eq!(visible_cap(768), Some(60));
        assert_eq!(visible_cap(1199), Some(60));
        assert_eq!(visible_cap(1200), None);
    }

    #[test]
    fn more_label_counts_the_hidden_remainder() {
        // 45 items at width 700 → 20 visible, 25 behind the control.
        assert_eq!(more_label(45 - 20), "Afficher plus (25 restants)");
    }
}
