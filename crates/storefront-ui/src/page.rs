//! The boundary between controllers and the live page.
//!
//! Controllers never touch the DOM. They hand markup, text and bindings to a
//! [`Page`], and read back the few page snapshots they need. Operations on
//! an anchor the page does not have are skipped.

use storefront_commerce::catalog::ViewMode;
use storefront_commerce::product::ProductDetails;
use storefront_commerce::{ItemId, PriceSources, ProductId};

/// A page region the controllers paint into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Whole document; holds bindings for static page controls.
    Document,
    /// Nav cart icon showing the item count.
    CartCount,
    /// Nav mini-cart item list.
    MiniCartItems,
    /// Nav mini-cart total.
    CartTotal,
    /// Body of the full cart table.
    CartTable,
    /// Order total under the cart table.
    CartTableTotal,
    /// Catalog product grid.
    ProductGrid,
    /// Catalog "Showing: N of M results" line.
    ResultCount,
    /// Single-product page controls, which span the gallery and the
    /// description.
    ProductPage,
}

impl Anchor {
    /// CSS selector of the region.
    pub fn selector(&self) -> &'static str {
        match self {
            Anchor::Document => "body",
            Anchor::CartCount => ".nav-cart-icon",
            Anchor::MiniCartItems => ".nav-cart-items",
            Anchor::CartTotal => ".total-price",
            Anchor::CartTable => ".shop_table.cart tbody",
            Anchor::CartTableTotal => ".cart_totals .order-total .amount",
            Anchor::ProductGrid => ".items-grid",
            Anchor::ResultCount => ".result-count",
            Anchor::ProductPage => "body",
        }
    }

    /// Whether binding selectors are resolved against the whole document
    /// rather than inside the region.
    pub fn is_document_scoped(&self) -> bool {
        matches!(self, Anchor::Document | Anchor::ProductPage)
    }
}

/// DOM event a binding listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Change => "change",
        }
    }
}

/// Cart manager actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add the product whose container holds the clicked button.
    AddFromContainer,
    Remove(ItemId),
    Increment(ItemId),
    Decrement(ItemId),
    /// Set quantity from the event value.
    SetQuantity(ItemId),
    Checkout,
}

/// Catalog actions.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// Event value is `"min,max"`.
    PriceRange,
    /// Read the min/max price inputs.
    PriceInputs,
    /// Event value is the category.
    Category,
    /// Read the checked category boxes.
    Categories,
    /// Event value is the sort key.
    Sort,
    ViewMode(ViewMode),
    AddToCart(ProductId),
}

/// Product page actions.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    Increment,
    Decrement,
    /// Event value is the typed quantity.
    SetQuantity,
    SelectColor(usize),
    SelectSize(usize),
    SelectImage(usize),
    AddToCart,
}

/// What a bound element does when its event fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Cart(CartAction),
    Catalog(CatalogAction),
    Product(ProductAction),
}

/// An event subscription for the elements matching `selector`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub selector: String,
    pub event: EventKind,
    pub action: Action,
    /// Bind only the n-th match.
    pub nth: Option<usize>,
    /// Attribute to read the event value from. Change events otherwise use
    /// the control's value.
    pub value_attr: Option<&'static str>,
}

impl Binding {
    pub fn click(selector: impl Into<String>, action: Action) -> Self {
        Self::new(selector, EventKind::Click, action)
    }

    pub fn change(selector: impl Into<String>, action: Action) -> Self {
        Self::new(selector, EventKind::Change, action)
    }

    fn new(selector: impl Into<String>, event: EventKind, action: Action) -> Self {
        Self {
            selector: selector.into(),
            event,
            action,
            nth: None,
            value_attr: None,
        }
    }

    pub fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    pub fn value_from(mut self, attribute: &'static str) -> Self {
        self.value_attr = Some(attribute);
        self
    }
}

/// Markup for a region plus the bindings for the elements it contains.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rendered {
    pub html: String,
    pub bindings: Vec<Binding>,
}

/// A fired binding.
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    pub action: Action,
    /// Control value or bound attribute.
    pub value: Option<String>,
    /// Snapshot of the product container around the event target.
    pub container: Option<ProductContainer>,
}

impl UiEvent {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            value: None,
            container: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_container(mut self, container: ProductContainer) -> Self {
        self.container = Some(container);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    /// Class added to the toast element.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// A transient toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// What a product card or description block exposes to add-to-cart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductContainer {
    /// `data-id` of the container.
    pub id: Option<String>,
    /// `data-base-price` of its amount element.
    pub base_price: Option<String>,
    /// Text of the first `.amount`.
    pub amount: Option<String>,
    /// Text of a sale or special-price amount.
    pub special_amount: Option<String>,
    /// Product title text.
    pub name: Option<String>,
    /// Image source.
    pub image: Option<String>,
    /// Value of the quantity input.
    pub quantity: Option<String>,
}

impl ProductContainer {
    /// Price locations in lookup order.
    pub fn price_sources(&self) -> PriceSources<'_> {
        PriceSources {
            base_price: self.base_price.as_deref(),
            amount: self.amount.as_deref(),
            special_amount: self.special_amount.as_deref(),
        }
    }
}

/// Static structure of a single-product page, read once at mount.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductPageLayout {
    /// `data-color` of each swatch.
    pub colors: Vec<String>,
    pub selected_color: Option<usize>,
    /// Text of each size option.
    pub sizes: Vec<String>,
    pub selected_size: Option<usize>,
    /// Number of main gallery images.
    pub main_images: usize,
    /// Number of gallery thumbnails.
    pub thumbs: usize,
    /// Initial quantity input value.
    pub quantity: Option<String>,
}

/// The product page as it should currently look.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductPageView {
    pub quantity: u32,
    /// Displayed price for the current quantity.
    pub price_text: Option<String>,
    /// `data-base-price` of the amount element.
    pub base_price: Option<String>,
    pub selected_color: Option<usize>,
    pub selected_size: Option<usize>,
    /// Chosen thumbnail and the visibility of each main image, once a
    /// thumbnail has been chosen.
    pub gallery: Option<GalleryView>,
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryView {
    pub selected_thumb: usize,
    pub main_visible: Vec<bool>,
}

/// A live page, or a stand-in for one.
pub trait Page {
    /// Whether the region exists on this page.
    fn has_anchor(&self, anchor: Anchor) -> bool;

    /// Replace the region's markup. Returns `false` if the region is absent.
    fn set_html(&mut self, anchor: Anchor, html: &str) -> bool;

    /// Replace the region's text. Returns `false` if the region is absent.
    fn set_text(&mut self, anchor: Anchor, text: &str) -> bool;

    /// Replace every subscription held for `anchor` with `bindings`.
    fn bind(&mut self, anchor: Anchor, bindings: Vec<Binding>);

    /// Raise a toast.
    fn notify(&mut self, notice: Notice);

    /// Briefly highlight the nav cart icon.
    fn pulse_cart_icon(&mut self);

    fn navigate(&mut self, url: &str);

    /// Switch the catalogue container and the grid/list switches.
    fn set_view_mode(&mut self, mode: ViewMode);

    /// Current min and max price input values.
    fn price_inputs(&self) -> (String, String);

    /// Values of the checked category boxes.
    fn checked_categories(&self) -> Vec<String>;

    /// Product page structure, if this is a product page.
    fn product_layout(&self) -> Option<ProductPageLayout>;

    /// Fresh snapshot of the product being viewed.
    fn product_details(&self) -> Option<ProductDetails>;

    fn apply_product_view(&mut self, view: &ProductPageView);

    /// Paint a region and subscribe its bindings.
    fn show(&mut self, anchor: Anchor, rendered: Rendered) -> bool {
        if !self.set_html(anchor, &rendered.html) {
            return false;
        }
        self.bind(anchor, rendered.bindings);
        true
    }
}
