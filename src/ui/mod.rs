/// DOM-facing parts of the widget: painting, menus and markup

pub mod markup;
pub mod menu;
pub mod painter;

use wasm_bindgen::JsCast;
use web_sys::{Element, NodeList};

/// Root of one widget instance
pub const WIDGET_SELECTOR: &str = ".masto-share";

/// Elements of type `T` in a `querySelectorAll` result; other nodes are skipped
pub(crate) fn collect<T: JsCast>(list: Result<NodeList, wasm_bindgen::JsValue>) -> Vec<T> {
    let list = match list {
        Ok(list) => list,
        Err(e) => {
            log::warn!("Selector query failed: {:?}", e);
            return Vec::new();
        }
    };

    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

/// First match of `selector` under `parent`, cast to `T`
pub(crate) fn query_one<T: JsCast>(parent: &Element, selector: &str) -> Option<T> {
    parent
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Nearest inclusive ancestor matching `selector`
pub(crate) fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}
