//! Browser adapter: [`Page`] over the live DOM, plus the wasm entry points.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use storefront_cache::LocalStorage;
use storefront_commerce::catalog::{Product, ViewMode};
use storefront_commerce::product::ProductDetails;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlImageElement, HtmlInputElement,
    HtmlSelectElement, NodeList, StorageEvent, Window,
};

use crate::config::{StorefrontConfig, ToastConfig};
use crate::page::{
    Action, Anchor, Binding, CartAction, EventKind, Notice, Page, ProductContainer,
    ProductPageLayout, ProductPageView, UiEvent,
};
use crate::listeners::ListenerSet;
use crate::Storefront;

/// Id of an inline `<script type="application/json">` holding the config.
const CONFIG_ELEMENT_ID: &str = "storefront-config";
const CONTAINER_SELECTOR: &str =
    ".product-item, .product, .product-description-wrap, .shop_single";
const PRODUCT_WRAP: &str = ".product-description-wrap";
const GALLERY_FIRST_IMAGE: &str = "#gallery-main .gallery-cell:first-child img";
const GALLERY_MAIN_CELLS: &str = "#gallery-main .gallery-cell";
const GALLERY_THUMB_CELLS: &str = ".gallery-thumbs .gallery-cell";
const QUANTITY_INPUT: &str = r#".quantity input[type="number"]"#;
const COLOR_SWATCHES: &str = ".color-swatches a";
const SIZE_OPTIONS: &str = ".size-options a";
const CATALOGUE: &str = ".shop-catalogue";
const TOAST: &str = ".toast-notification";

type Sink = Rc<dyn Fn(UiEvent)>;

struct App {
    storefront: Storefront<LocalStorage>,
    page: BrowserPage,
}

impl App {
    /// Split borrow for one entry into the storefront. Listeners retired by
    /// the previous entry are released here.
    fn enter(&mut self) -> (&mut Storefront<LocalStorage>, &mut BrowserPage) {
        self.page.listeners.sweep();
        (&mut self.storefront, &mut self.page)
    }
}

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// The live document.
pub struct BrowserPage {
    document: Document,
    toast: ToastConfig,
    sink: Sink,
    listeners: ListenerSet<Listener>,
}

impl BrowserPage {
    fn new(document: Document, toast: ToastConfig, sink: Sink) -> Self {
        Self {
            document,
            toast,
            sink,
            listeners: ListenerSet::new(),
        }
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        self.document
            .query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn matches(&self, anchor: Anchor, selector: &str) -> Vec<Element> {
        if anchor.is_document_scoped() {
            return self.query_all(selector);
        }
        self.query(anchor.selector())
            .and_then(|region| region.query_selector_all(selector).ok())
            .map(elements)
            .unwrap_or_default()
    }

    fn listen(&self, element: Element, binding: &Binding) -> Option<Listener> {
        let sink = self.sink.clone();
        let document = self.document.clone();
        let source = element.clone();
        let fired_binding = binding.clone();

        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if fired_binding.event == EventKind::Click {
                event.prevent_default();
            }
            sink(fired(&document, &fired_binding, &source));
        });

        let kind = binding.event.as_str();
        element
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Listener {
            target: element.into(),
            kind,
            callback,
        })
    }
}

impl Page for BrowserPage {
    fn has_anchor(&self, anchor: Anchor) -> bool {
        anchor.is_document_scoped() || self.query(anchor.selector()).is_some()
    }

    fn set_html(&mut self, anchor: Anchor, html: &str) -> bool {
        match self.query(anchor.selector()) {
            Some(region) => {
                region.set_inner_html(html);
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, anchor: Anchor, text: &str) -> bool {
        match self.query(anchor.selector()) {
            Some(region) => {
                region.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn bind(&mut self, anchor: Anchor, bindings: Vec<Binding>) {
        let mut attached = Vec::new();
        for binding in &bindings {
            let found = self.matches(anchor, &binding.selector);
            let targets: Vec<Element> = match binding.nth {
                Some(n) => found.into_iter().nth(n).into_iter().collect(),
                None => found,
            };
            attached.extend(targets.into_iter().filter_map(|el| self.listen(el, binding)));
        }
        self.listeners.replace(anchor, attached, Listener::detach);
        tracing::trace!(
            anchor = ?anchor,
            listeners = self.listeners.active(anchor),
            retired = self.listeners.retired(),
            "bound"
        );
    }

    fn notify(&mut self, notice: Notice) {
        let Some(toast) = self.query(TOAST) else {
            tracing::warn!(message = %notice.message, "no toast element");
            return;
        };
        toast.set_class_name(&format!("toast-notification {}", notice.kind.as_str()));
        if let Ok(Some(message)) = toast.query_selector(".toast-message") {
            message.set_text_content(Some(&notice.message));
        }

        let shown = toast.clone();
        Timeout::new(self.toast.delay_ms, move || {
            let _ = shown.class_list().add_1("show");
        })
        .forget();
        Timeout::new(self.toast.duration_ms, move || {
            let _ = toast.class_list().remove_1("show");
        })
        .forget();
    }

    fn pulse_cart_icon(&mut self) {
        let Some(icon) = self.query(Anchor::CartCount.selector()) else {
            return;
        };
        let _ = icon.class_list().add_1("items-added");
        Timeout::new(self.toast.pulse_ms, move || {
            let _ = icon.class_list().remove_1("items-added");
        })
        .forget();
    }

    fn navigate(&mut self, url: &str) {
        let result = self
            .document
            .location()
            .map(|location| location.set_href(url));
        if !matches!(result, Some(Ok(()))) {
            tracing::error!(url, "navigation failed");
        }
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        let other = match mode {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        };
        let (Some(active), Some(inactive)) = (
            self.document.get_element_by_id(mode.switch_id()),
            self.document.get_element_by_id(other.switch_id()),
        ) else {
            return;
        };

        if let Some(container) = self.query(CATALOGUE) {
            let classes = container.class_list();
            let _ = classes.remove_1(other.container_class());
            let _ = classes.add_1(mode.container_class());
        }
        let _ = active.class_list().add_1(mode.active_class());
        let _ = inactive.class_list().remove_1(other.active_class());
    }

    fn price_inputs(&self) -> (String, String) {
        let value = |id: &str| {
            self.document
                .get_element_by_id(id)
                .as_ref()
                .and_then(control_value)
                .unwrap_or_default()
        };
        (value("price_min"), value("price_max"))
    }

    fn checked_categories(&self) -> Vec<String> {
        self.query_all(r#".widget_categories input[type="checkbox"]"#)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
            .filter(|input| input.checked())
            .map(|input| input.value())
            .collect()
    }

    fn product_layout(&self) -> Option<ProductPageLayout> {
        self.query(PRODUCT_WRAP)?;

        let swatches = self.query_all(COLOR_SWATCHES);
        let sizes = self.query_all(SIZE_OPTIONS);
        let selected = |els: &[Element]| {
            els.iter()
                .position(|el| el.class_list().contains("selected"))
        };

        Some(ProductPageLayout {
            colors: swatches
                .iter()
                .map(|el| el.get_attribute("data-color").unwrap_or_default())
                .collect(),
            selected_color: selected(&swatches),
            sizes: sizes.iter().map(trimmed_text).collect(),
            selected_size: selected(&sizes),
            main_images: self.query_all(GALLERY_MAIN_CELLS).len(),
            thumbs: self.query_all(GALLERY_THUMB_CELLS).len(),
            quantity: self.query(QUANTITY_INPUT).as_ref().and_then(control_value),
        })
    }

    fn product_details(&self) -> Option<ProductDetails> {
        let wrap = self.query(PRODUCT_WRAP)?;
        let amount = wrap.query_selector(".amount").ok().flatten();

        Some(ProductDetails {
            id: wrap.get_attribute("data-id"),
            name: wrap
                .query_selector(".product-title")
                .ok()
                .flatten()
                .map(|el| trimmed_text(&el)),
            amount_text: amount.as_ref().map(trimmed_text),
            base_price: amount.and_then(|el| el.get_attribute("data-base-price")),
            primary_image: self.query(GALLERY_FIRST_IMAGE).as_ref().and_then(image_src),
            has_quantity_input: self.query(QUANTITY_INPUT).is_some(),
        })
    }

    fn apply_product_view(&mut self, view: &ProductPageView) {
        if let Some(input) = self
            .query(QUANTITY_INPUT)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(&view.quantity.to_string());
        }

        if let Some(amount) = self
            .query(PRODUCT_WRAP)
            .and_then(|wrap| wrap.query_selector(".amount").ok().flatten())
        {
            if let Some(base) = &view.base_price {
                let _ = amount.set_attribute("data-base-price", base);
            }
            if let Some(text) = &view.price_text {
                amount.set_text_content(Some(text));
            }
        }

        for (i, el) in self.query_all(COLOR_SWATCHES).iter().enumerate() {
            let _ = el
                .class_list()
                .toggle_with_force("selected", view.selected_color == Some(i));
        }
        for (i, el) in self.query_all(SIZE_OPTIONS).iter().enumerate() {
            let _ = el
                .class_list()
                .toggle_with_force("selected", view.selected_size == Some(i));
        }

        if let Some(gallery) = &view.gallery {
            for (i, el) in self.query_all(GALLERY_THUMB_CELLS).iter().enumerate() {
                let _ = el
                    .class_list()
                    .toggle_with_force("is-selected", gallery.selected_thumb == i);
            }
            for (el, visible) in self.query_all(GALLERY_MAIN_CELLS).iter().zip(&gallery.main_visible) {
                if let Some(cell) = el.dyn_ref::<HtmlElement>() {
                    let display = if *visible { "block" } else { "none" };
                    let _ = cell.style().set_property("display", display);
                }
            }
        }
    }
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn trimmed_text(el: &Element) -> String {
    el.text_content().unwrap_or_default().trim().to_string()
}

fn control_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
}

fn image_src(el: &Element) -> Option<String> {
    match el.dyn_ref::<HtmlImageElement>() {
        Some(img) => Some(img.src()),
        None => el.get_attribute("src"),
    }
}

/// Build the event for a fired binding from the element it fired on.
fn fired(document: &Document, binding: &Binding, source: &Element) -> UiEvent {
    let mut event = UiEvent::new(binding.action.clone());

    event.value = match (binding.value_attr, binding.event) {
        (Some(attr), _) => source.get_attribute(attr),
        (None, EventKind::Change) => control_value(source),
        (None, EventKind::Click) => None,
    };

    if binding.action == Action::Cart(CartAction::AddFromContainer) {
        event.container = source
            .closest(CONTAINER_SELECTOR)
            .ok()
            .flatten()
            .map(|container| snapshot_container(document, &container));
    }
    event
}

fn snapshot_container(document: &Document, container: &Element) -> ProductContainer {
    let find = |selector: &str| container.query_selector(selector).ok().flatten();
    let text = |selector: &str| find(selector).and_then(|el| el.text_content());

    let image = find("img")
        .or_else(|| document.query_selector(GALLERY_FIRST_IMAGE).ok().flatten())
        .as_ref()
        .and_then(image_src);

    ProductContainer {
        id: container.get_attribute("data-id"),
        base_price: find(".amount[data-base-price]")
            .and_then(|el| el.get_attribute("data-base-price")),
        amount: text(".amount"),
        special_amount: text(".special-price .amount, .price .amount"),
        name: find(".product-title a, .product-name a, .product-title").map(|el| trimmed_text(&el)),
        image,
        quantity: find(QUANTITY_INPUT).as_ref().and_then(control_value),
    }
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn read_config(document: &Document) -> StorefrontConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return StorefrontConfig::default();
    };
    match StorefrontConfig::from_json_str(&text) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(&js_error(format!("invalid storefront config: {:#}", e)));
            StorefrontConfig::default()
        }
    }
}

fn ensure_toast(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(TOAST)?.is_some() {
        return Ok(());
    }
    let toast = document.create_element("div")?;
    toast.set_class_name("toast-notification");
    toast.set_inner_html(
        r#"<i class="fas fa-check-circle"></i><span class="toast-message"></span>"#,
    );
    document
        .body()
        .ok_or_else(|| js_error("document has no body"))?
        .append_child(&toast)?;
    Ok(())
}

/// Route fired bindings into the storefront.
fn dispatcher(app: Weak<RefCell<App>>) -> Sink {
    Rc::new(move |event: UiEvent| {
        let Some(app) = app.upgrade() else {
            return;
        };
        let Ok(mut app) = app.try_borrow_mut() else {
            tracing::warn!(action = ?event.action, "event dropped while busy");
            return;
        };
        let (storefront, page) = app.enter();
        storefront.dispatch(&event, page);
    })
}

fn subscribe_storage(window: &Window, app: Weak<RefCell<App>>) -> Result<(), JsValue> {
    let on_storage = Closure::<dyn FnMut(StorageEvent)>::new(move |event: StorageEvent| {
        let Some(app) = app.upgrade() else {
            return;
        };
        let Ok(mut app) = app.try_borrow_mut() else {
            return;
        };
        let (storefront, page) = app.enter();
        let key = event.key();
        if storefront.storage_changed(key.as_deref(), page) {
            tracing::debug!("cart updated from another tab");
        }
    });
    window.add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())?;
    on_storage.forget();
    Ok(())
}

fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;

    let config = read_config(&document);
    if let Err(e) = storefront_observability::init(&config.logging) {
        web_sys::console::warn_1(&js_error(e));
    }

    let store = LocalStorage::open().map_err(js_error)?;
    ensure_toast(&document)?;

    let toast = config.toast;
    let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
        RefCell::new(App {
            storefront: Storefront::new(store, config),
            page: BrowserPage::new(document, toast, dispatcher(weak.clone())),
        })
    });

    {
        let mut guard = app.borrow_mut();
        let (storefront, page) = guard.enter();
        storefront.mount(page);
    }
    subscribe_storage(&window, Rc::downgrade(&app))?;
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Entry point: mount once the document has been parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| js_error("no document"))?;
    if document.ready_state() != "loading" {
        return mount();
    }

    let on_ready = Closure::<dyn FnMut()>::new(|| {
        if let Err(e) = mount() {
            web_sys::console::error_1(&e);
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}

/// Populate the catalog from a JSON array of products and repaint the grid.
#[wasm_bindgen]
pub fn load_products(json: &str) -> Result<(), JsValue> {
    let products: Vec<Product> = serde_json::from_str(json).map_err(js_error)?;
    APP.with(|slot| {
        let slot = slot.borrow();
        let app = slot.as_ref().ok_or_else(|| js_error("storefront not mounted"))?;
        let mut guard = app
            .try_borrow_mut()
            .map_err(|_| js_error("storefront busy"))?;
        let (storefront, page) = guard.enter();
        storefront.load_products(products, page);
        Ok(())
    })
}
