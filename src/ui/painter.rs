/// Indicator Painter: keeps saved-host fragments in sync with the preference

use super::{WIDGET_SELECTOR, collect, query_one};
use web_sys::{Document, Element, HtmlElement};

/// Label text shown when nothing is saved
pub const PLACEHOLDER: &str = "none";

const CURRENT_LABEL: &str = "[data-masto-current]";
const SAVED_AFFORDANCES: &str =
    "[data-masto-action='use-saved'], [data-masto-action='clear-saved']";
const SAVED_SECTION: &str = ".masto-share__section--saved";
const DIVIDER: &str = ".masto-share__divider";

/// What every widget should show for a given preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator<'a> {
    pub label: &'a str,
    pub saved_visible: bool,
}

impl<'a> Indicator<'a> {
    pub fn for_preference(saved: Option<&'a str>) -> Self {
        match saved {
            Some(host) if !host.is_empty() => Indicator {
                label: host,
                saved_visible: true,
            },
            _ => Indicator {
                label: PLACEHOLDER,
                saved_visible: false,
            },
        }
    }
}

/// Repaint every widget on the page; safe to call any number of times
pub fn paint(document: &Document, saved: Option<&str>) {
    let indicator = Indicator::for_preference(saved);
    let roots: Vec<Element> = collect(document.query_selector_all(WIDGET_SELECTOR));

    for root in &roots {
        paint_widget(root, indicator);
    }

    log::debug!("Painted {} widget(s) with saved instance {}", roots.len(), indicator.label);
}

fn paint_widget(root: &Element, indicator: Indicator<'_>) {
    if let Some(label) = query_one::<Element>(root, CURRENT_LABEL) {
        label.set_text_content(Some(indicator.label));
    }

    let affordances: Vec<HtmlElement> = collect(root.query_selector_all(SAVED_AFFORDANCES));
    for el in &affordances {
        set_visible(el, indicator.saved_visible);
    }

    for selector in [SAVED_SECTION, DIVIDER] {
        if let Some(el) = query_one::<HtmlElement>(root, selector) {
            set_visible(&el, indicator.saved_visible);
        }
    }
}

fn set_visible(el: &HtmlElement, visible: bool) {
    let style = el.style();
    let result = if visible {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", "none")
    };

    if let Err(e) = result {
        log::warn!("Failed to update display: {:?}", e);
    }
}
