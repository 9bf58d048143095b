/// Menu Controller: programmatic close transitions for the widget dropdowns
///
/// Opening is left to the native `<details>` toggle.

use super::{WIDGET_SELECTOR, closest, collect, query_one};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, FocusOptions, HtmlDetailsElement, HtmlElement, Node};

const MENU_SELECTOR: &str = ".masto-share__menu";
const DISCLOSURE_SELECTOR: &str = ".masto-share__menu details";
const OPEN_DISCLOSURES: &str = ".masto-share .masto-share__menu details[open]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

impl MenuState {
    pub fn of(details: &HtmlDetailsElement) -> Self {
        if details.open() {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }
}

/// Close the menu of the widget enclosing `el`, returning focus to its trigger
///
/// Returns `false` without touching focus when that menu was already closed.
pub fn close_from(el: &Element) -> bool {
    let Some(wrap) = closest(el, WIDGET_SELECTOR).or_else(|| closest(el, MENU_SELECTOR)) else {
        return false;
    };
    let Some(details) = query_one::<HtmlDetailsElement>(&wrap, DISCLOSURE_SELECTOR) else {
        return false;
    };

    close(&details, true)
}

/// Close every open menu that does not contain the click target
pub fn close_outside(document: &Document, target: Option<&Node>) -> usize {
    let open: Vec<HtmlDetailsElement> = collect(document.query_selector_all(OPEN_DISCLOSURES));

    let mut closed = 0;
    for details in &open {
        if !details.contains(target) && close(details, false) {
            closed += 1;
        }
    }
    closed
}

/// Escape: close the first open menu in document order
pub fn close_first_open(document: &Document) -> bool {
    let Some(details) = document
        .query_selector(OPEN_DISCLOSURES)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlDetailsElement>().ok())
    else {
        return false;
    };

    close(&details, true)
}

fn close(details: &HtmlDetailsElement, restore_focus: bool) -> bool {
    if MenuState::of(details) == MenuState::Closed {
        return false;
    }

    details.set_open(false);
    if restore_focus {
        focus_trigger(details);
    }
    true
}

fn focus_trigger(details: &HtmlDetailsElement) {
    let Some(summary) = query_one::<HtmlElement>(details, "summary") else {
        return;
    };

    let options = FocusOptions::new();
    options.set_prevent_scroll(true);
    if let Err(e) = summary.focus_with_options(&options) {
        log::warn!("Failed to focus menu trigger: {:?}", e);
    }
}
