#![forbid(unsafe_code)]

//! Checkbox controls and static note labels.

use strata_core::{AttributeTag, NoteDef, ToggleStyle};
use strata_runtime::ToggleView;
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

/// DOM nodes created under the controls container.
pub struct Controls {
    toggles: Vec<(AttributeTag, HtmlInputElement)>,
    nodes: Vec<Element>,
}

fn apply_style(input: &HtmlElement, style: &ToggleStyle) -> Result<(), JsValue> {
    let css = input.style();
    css.set_property("background-color", &style.background)?;
    css.set_property("border-color", &style.border)?;
    css.set_property("color", &style.check)
}

impl Controls {
    /// Append one labelled checkbox per view, then the notes.
    pub fn mount(
        document: &Document,
        container: &Element,
        views: &[ToggleView],
        notes: &[NoteDef],
    ) -> Result<Self, JsValue> {
        let mut toggles = Vec::with_capacity(views.len());
        let mut nodes = Vec::with_capacity(views.len() + notes.len());

        for (index, view) in views.iter().enumerate() {
            let input = document
                .create_element("input")?
                .dyn_into::<HtmlInputElement>()
                .map_err(JsValue::from)?;
            input.set_type("checkbox");
            input.set_id(&format!("img{}-checkbox", index + 1));
            input.set_checked(view.active);
            apply_style(&input, &view.style)?;

            let label = document.create_element("label")?;
            label.set_class_name("checkbox-label");
            label.append_child(&input)?;
            label.append_child(&document.create_text_node(&view.label))?;
            container.append_child(&label)?;

            toggles.push((view.tag.clone(), input));
            nodes.push(label);
        }

        for (index, note) in notes.iter().enumerate() {
            let div = document
                .create_element("div")?
                .dyn_into::<HtmlElement>()
                .map_err(JsValue::from)?;
            div.set_text_content(Some(&note.text));
            let css = div.style();
            css.set_property("padding", "5px 10px 5px")?;
            css.set_property("background-color", &note.background)?;
            css.set_property("border-radius", "5px")?;
            if index > 0 {
                css.set_property("margin-top", "10px")?;
            }
            container.append_child(&div)?;
            nodes.push(div.into());
        }

        debug!(toggles = toggles.len(), notes = notes.len(), "controls mounted");
        Ok(Self { toggles, nodes })
    }

    pub fn inputs(&self) -> &[(AttributeTag, HtmlInputElement)] {
        &self.toggles
    }

    /// Bring every checkbox in line with `views`.
    pub fn sync(&self, views: &[ToggleView]) -> Result<(), JsValue> {
        for view in views {
            let Some((_, input)) = self.toggles.iter().find(|(tag, _)| *tag == view.tag) else {
                continue;
            };
            if input.checked() != view.active {
                input.set_checked(view.active);
            }
            apply_style(input, &view.style)?;
        }
        Ok(())
    }

    /// Remove every node this instance created.
    pub fn unmount(&self) {
        for node in &self.nodes {
            node.remove();
        }
    }
}
