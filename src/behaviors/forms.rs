use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::dom::{self, Disposer, Listener};
use crate::validation::FieldKind;

pub const VALIDATE_ATTR: &str = "data-validate";
pub const INVALID_CLASS: &str = "invalid";

struct Field {
    input: HtmlInputElement,
    kind: FieldKind,
}

impl Field {
    fn from_element(element: Element) -> Option<Self> {
        let kind = FieldKind::parse(&element.get_attribute(VALIDATE_ATTR)?)?;
        let input = element.dyn_into::<HtmlInputElement>().ok()?;
        Some(Self { input, kind })
    }

    /// Marks the field and returns whether it is valid. Empty optional
    /// fields are left to the browser's `required` handling.
    fn check(&self) -> bool {
        let value = self.input.value();
        let value = value.trim();
        let valid = (value.is_empty() && !self.input.required()) || self.kind.accepts(value);
        dom::set_class(&self.input, INVALID_CLASS, !valid);
        valid
    }
}

pub fn bind(document: &Document) -> Disposer {
    let mut disposer = Disposer::new();
    let selector = format!("[{}]", VALIDATE_ATTR);

    for form in dom::select_all(document, "form") {
        let fields: Rc<Vec<Field>> = Rc::new(
            dom::select_all_within(&form, &selector)
                .into_iter()
                .filter_map(Field::from_element)
                .collect(),
        );
        if fields.is_empty() {
            continue;
        }

        for (index, field) in fields.iter().enumerate() {
            let fields = fields.clone();
            disposer.keep(
                "field blur",
                Listener::new(&field.input, "blur", move |_| {
                    fields[index].check();
                }),
            );
        }

        disposer.keep(
            "form submit",
            Listener::new(&form, "submit", move |event| {
                // Check every field so each invalid one gets marked.
                let failures = fields.iter().filter(|field| !field.check()).count();
                if failures > 0 {
                    event.prevent_default();
                }
            }),
        );
    }

    disposer
}
