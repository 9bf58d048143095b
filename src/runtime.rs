/// Event wiring: the three document listeners and the load-time paint

use crate::action::{Action, WidgetData};
use crate::dispatch::{Completion, Dispatcher};
use crate::error::WidgetError;
use crate::preference::PreferenceStore;
use crate::shell::Shell;
use crate::storage::{KeyValueStore, LocalStorage, MemoryStore};
use crate::ui::{self, menu, painter};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, KeyboardEvent, MouseEvent, Node, Window};

/// Window property marking an installed runtime, shared with any other copy on the page
const INIT_FLAG: &str = "__mastoInit";

const TAGGED_SELECTOR: &str = "[data-masto-action],[data-masto-host]";

/// Dispatcher as installed on a page: storage backend picked at runtime
pub type PageDispatcher<H> = Dispatcher<Box<dyn KeyValueStore>, H>;

/// Bind the widget runtime to the current document once
///
/// Returns `Ok(false)` when a runtime was already installed on this window.
pub fn install<H: Shell + 'static>(shell: H) -> Result<bool, WidgetError> {
    let window = web_sys::window().ok_or(WidgetError::NoWindow)?;
    let document = window.document().ok_or(WidgetError::NoDocument)?;

    if is_installed(&window) {
        log::debug!("Share widgets already installed");
        return Ok(false);
    }
    mark_installed(&window)?;

    let dispatcher = Rc::new(page_dispatcher(&document, shell));
    register_listeners(&document, dispatcher.clone())?;
    schedule_initial_paint(&document, dispatcher)?;

    log::info!("Share widgets installed");
    Ok(true)
}

/// Dispatcher over `localStorage`, or an in-page store when that is unavailable
pub fn page_dispatcher<H: Shell>(document: &Document, shell: H) -> PageDispatcher<H> {
    let backend: Box<dyn KeyValueStore> = match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("{}; saved instance will only last for this page", e);
            Box::new(MemoryStore::new())
        }
    };

    painted_dispatcher(document, backend, shell)
}

/// Dispatcher whose preference changes repaint every widget in `document`
pub fn painted_dispatcher<S: KeyValueStore, H: Shell>(document: &Document, backend: S, shell: H) -> Dispatcher<S, H> {
    let preference = PreferenceStore::new(backend);
    let document = document.clone();
    preference.subscribe(move |saved| painter::paint(&document, saved));

    Dispatcher::new(preference, shell)
}

/// Decode and run the action behind a click on `target`
///
/// Returns `true` when the click hit a recognized widget action, in which case
/// default navigation should be prevented.
pub fn handle_click<S: KeyValueStore, H: Shell>(target: &Element, dispatcher: &Dispatcher<S, H>) -> bool {
    let Some(el) = ui::closest(target, TAGGED_SELECTOR) else {
        return false;
    };
    let Some(root) = ui::closest(&el, ui::WIDGET_SELECTOR) else {
        return false;
    };

    let action = Action::from_attributes(
        el.get_attribute("data-masto-action").as_deref(),
        el.get_attribute("data-masto-host").as_deref(),
    );
    let Some(action) = action else {
        return false;
    };

    let widget = WidgetData::from_attributes(
        root.get_attribute("data-masto-query"),
        root.get_attribute("data-masto-fallback"),
    );

    if dispatcher.dispatch(&action, &widget) == Completion::CloseMenu {
        menu::close_from(&el);
    }
    true
}

// Dispatch listens in the capture phase and outside-close in the bubble phase,
// so for any one click the dispatcher always runs first.
fn register_listeners<H: Shell + 'static>(
    document: &Document,
    dispatcher: Rc<PageDispatcher<H>>,
) -> Result<(), WidgetError> {
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        on_dispatch_click(&ev, &*dispatcher);
    });
    document
        .add_event_listener_with_callback_and_bool("click", on_click.as_ref().unchecked_ref(), true)
        .map_err(listener_error)?;
    on_click.forget();

    let doc = document.clone();
    let on_outside = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
        on_outside_click(&ev, &doc);
    });
    document
        .add_event_listener_with_callback_and_bool("click", on_outside.as_ref().unchecked_ref(), false)
        .map_err(listener_error)?;
    on_outside.forget();

    let doc = document.clone();
    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
        on_escape_key(&ev, &doc);
    });
    document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
        .map_err(listener_error)?;
    on_key.forget();

    Ok(())
}

fn on_dispatch_click<S: KeyValueStore, H: Shell>(ev: &MouseEvent, dispatcher: &Dispatcher<S, H>) {
    let Some(target) = event_element(ev) else {
        return;
    };
    if handle_click(&target, dispatcher) {
        ev.prevent_default();
    }
}

fn on_outside_click(ev: &MouseEvent, document: &Document) {
    let target = ev.target().and_then(|t| t.dyn_into::<Node>().ok());
    let closed = menu::close_outside(document, target.as_ref());
    if closed > 0 {
        log::debug!("Closed {} menu(s) on outside click", closed);
    }
}

fn on_escape_key(ev: &KeyboardEvent, document: &Document) {
    if ev.key() != "Escape" {
        return;
    }
    menu::close_first_open(document);
}

/// Paint once the widgets exist; immediately when the document is already parsed
fn schedule_initial_paint<H: Shell + 'static>(
    document: &Document,
    dispatcher: Rc<PageDispatcher<H>>,
) -> Result<(), WidgetError> {
    let doc = document.clone();
    let paint = move || painter::paint(&doc, dispatcher.preference().get().as_deref());

    if !is_parsing(&document.ready_state()) {
        paint();
        return Ok(());
    }

    let on_ready = Closure::once_into_js(paint);
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .map_err(listener_error)
}

/// `document.readyState` before `DOMContentLoaded` has fired
fn is_parsing(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Element a click landed on; text-node targets resolve to their parent
fn event_element(ev: &Event) -> Option<Element> {
    let target = ev.target()?;
    match target.dyn_into::<Element>() {
        Ok(el) => Some(el),
        Err(target) => target.dyn_into::<Node>().ok()?.parent_element(),
    }
}

fn is_installed(window: &Window) -> bool {
    js_sys::Reflect::get(window, &JsValue::from_str(INIT_FLAG))
        .map(|flag| flag.is_truthy())
        .unwrap_or(false)
}

fn mark_installed(window: &Window) -> Result<(), WidgetError> {
    js_sys::Reflect::set(window, &JsValue::from_str(INIT_FLAG), &JsValue::TRUE)
        .map(|_| ())
        .map_err(listener_error)
}

fn listener_error(e: JsValue) -> WidgetError {
    WidgetError::Listener(format!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_parsing_only_while_loading() {
        assert!(is_parsing("loading"));
        assert!(!is_parsing("interactive"));
        assert!(!is_parsing("complete"));
    }
}
