//! Password visibility toggles.
//!
//! Buttons carrying `data-bascule-mdp="<input id>"` flip the target field
//! between masked and plain rendering, swapping the eye icon with it.

use web_sys::HtmlInputElement;

use crate::dom;

pub fn init() {
    for btn in dom::query_all("[data-bascule-mdp]") {
        let Some(target_id) = btn.get_attribute("data-bascule-mdp") else {
            continue;
        };

        let btn2 = btn.clone();
        dom::listen(&btn, "click", move |e| {
            e.prevent_default();
            let Some(input) = dom::by_id_typed::<HtmlInputElement>(&target_id) else {
                return;
            };

            if input.type_() == "password" {
                input.set_type("text");
            } else {
                input.set_type("password");
            }

            // Icon on a child <i> when present, else on the button itself.
            let icon = btn2.query_selector("i").ok().flatten();
            let target = icon.as_ref().unwrap_or(&btn2);
            let classes = target.class_list();
            let _ = classes.toggle("icone-oeil");
            let _ = classes.toggle("icone-oeil-barre");
        });
    }
}
