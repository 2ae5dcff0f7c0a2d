//! In-memory page.

use std::collections::HashMap;

use storefront_commerce::catalog::ViewMode;
use storefront_commerce::product::ProductDetails;

use crate::page::{
    Anchor, Binding, EventKind, Notice, Page, ProductPageLayout, ProductPageView, UiEvent,
};

/// A [`Page`] that records everything applied to it.
///
/// Only the anchors it was created with exist; the document scopes always
/// exist.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    regions: HashMap<Anchor, String>,
    bindings: HashMap<Anchor, Vec<Binding>>,
    notices: Vec<Notice>,
    pulses: usize,
    navigations: Vec<String>,
    view_mode: Option<ViewMode>,
    price_inputs: (String, String),
    checked_categories: Vec<String>,
    layout: Option<ProductPageLayout>,
    details: Option<ProductDetails>,
    product_view: Option<ProductPageView>,
}

impl MemoryPage {
    /// A page with no regions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchors(anchors: &[Anchor]) -> Self {
        let mut page = Self::new();
        for anchor in anchors {
            page.regions.insert(*anchor, String::new());
        }
        page
    }

    /// Nav mini-cart plus the full cart table.
    pub fn cart_page() -> Self {
        Self::with_anchors(&[
            Anchor::CartCount,
            Anchor::MiniCartItems,
            Anchor::CartTotal,
            Anchor::CartTable,
            Anchor::CartTableTotal,
        ])
    }

    /// Nav mini-cart plus the product grid.
    pub fn catalog_page() -> Self {
        Self::with_anchors(&[
            Anchor::CartCount,
            Anchor::MiniCartItems,
            Anchor::CartTotal,
            Anchor::ProductGrid,
            Anchor::ResultCount,
        ])
    }

    /// Turn this into a product page.
    pub fn with_product(mut self, layout: ProductPageLayout, details: ProductDetails) -> Self {
        self.layout = Some(layout);
        self.details = Some(details);
        self
    }

    pub fn set_price_inputs(&mut self, min: impl Into<String>, max: impl Into<String>) {
        self.price_inputs = (min.into(), max.into());
    }

    pub fn set_checked_categories(&mut self, categories: Vec<String>) {
        self.checked_categories = categories;
    }

    /// Edit the product snapshot, e.g. to drop an element.
    pub fn product_details_mut(&mut self) -> Option<&mut ProductDetails> {
        self.details.as_mut()
    }

    /// Current markup or text of a region.
    pub fn content(&self, anchor: Anchor) -> Option<&str> {
        self.regions.get(&anchor).map(String::as_str)
    }

    pub fn bindings(&self, anchor: Anchor) -> &[Binding] {
        self.bindings.get(&anchor).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn pulses(&self) -> usize {
        self.pulses
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn view_mode(&self) -> Option<ViewMode> {
        self.view_mode
    }

    pub fn product_view(&self) -> Option<&ProductPageView> {
        self.product_view.as_ref()
    }

    /// Fire the first subscription matching `selector` and `event`, the way
    /// a user interaction would.
    pub fn fire(&self, selector: &str, event: EventKind, value: Option<&str>) -> Option<UiEvent> {
        let binding = self
            .bindings
            .values()
            .flatten()
            .find(|b| b.selector == selector && b.event == event)?;
        let mut fired = UiEvent::new(binding.action.clone());
        fired.value = value.map(str::to_string);
        Some(fired)
    }

    /// Like [`fire`](Self::fire) for the n-th match of a selector.
    pub fn fire_nth(&self, selector: &str, nth: usize) -> Option<UiEvent> {
        self.bindings
            .values()
            .flatten()
            .find(|b| b.selector == selector && b.nth == Some(nth))
            .map(|b| UiEvent::new(b.action.clone()))
    }
}

impl Page for MemoryPage {
    fn has_anchor(&self, anchor: Anchor) -> bool {
        anchor.is_document_scoped() || self.regions.contains_key(&anchor)
    }

    fn set_html(&mut self, anchor: Anchor, html: &str) -> bool {
        match self.regions.get_mut(&anchor) {
            Some(region) => {
                *region = html.to_string();
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, anchor: Anchor, text: &str) -> bool {
        self.set_html(anchor, text)
    }

    fn bind(&mut self, anchor: Anchor, bindings: Vec<Binding>) {
        if self.has_anchor(anchor) {
            self.bindings.insert(anchor, bindings);
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn pulse_cart_icon(&mut self) {
        if self.has_anchor(Anchor::CartCount) {
            self.pulses += 1;
        }
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = Some(mode);
    }

    fn price_inputs(&self) -> (String, String) {
        self.price_inputs.clone()
    }

    fn checked_categories(&self) -> Vec<String> {
        self.checked_categories.clone()
    }

    fn product_layout(&self) -> Option<ProductPageLayout> {
        self.layout.clone()
    }

    fn product_details(&self) -> Option<ProductDetails> {
        self.details.clone()
    }

    fn apply_product_view(&mut self, view: &ProductPageView) {
        if let Some(details) = self.details.as_mut() {
            if let Some(text) = &view.price_text {
                details.amount_text = Some(text.clone());
            }
            if let Some(base) = &view.base_price {
                details.base_price = Some(base.clone());
            }
        }
        self.product_view = Some(view.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Action, CartAction};

    #[test]
    fn test_absent_anchor_skipped() {
        let mut page = MemoryPage::with_anchors(&[Anchor::CartTotal]);
        assert!(page.set_text(Anchor::CartTotal, "x"));
        assert!(!page.set_text(Anchor::CartTable, "x"));
        page.bind(Anchor::CartTable, vec![Binding::click(".remove", Action::Cart(CartAction::Checkout))]);
        assert!(page.bindings(Anchor::CartTable).is_empty());
        assert_eq!(page.content(Anchor::CartTable), None);
    }

    #[test]
    fn test_rebind_replaces() {
        let mut page = MemoryPage::cart_page();
        let checkout = Action::Cart(CartAction::Checkout);
        page.bind(Anchor::Document, vec![Binding::click("a", checkout.clone())]);
        page.bind(Anchor::Document, vec![Binding::click("b", checkout)]);
        assert_eq!(page.bindings(Anchor::Document).len(), 1);
        assert!(page.fire("a", EventKind::Click, None).is_none());
        assert!(page.fire("b", EventKind::Click, None).is_some());
    }
}
