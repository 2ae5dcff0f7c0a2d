//! Single-product page controller.

use storefront_cache::KeyValueStore;
use storefront_commerce::product::{Gallery, ProductPageState};

use crate::cart_view::CartHandle;
use crate::page::{Anchor, Page, ProductAction, UiEvent};
use crate::sections::render_product_page;

/// Quantity, variant and gallery state of the product being viewed.
#[derive(Debug)]
pub struct ProductPageController<S> {
    state: ProductPageState,
    cart: CartHandle<S>,
}

impl<S: KeyValueStore> ProductPageController<S> {
    /// Take over the product page, if the page is one.
    ///
    /// Establishes the base price of the amount element and paints the
    /// initial view.
    pub fn mount(cart: CartHandle<S>, page: &mut dyn Page) -> Option<Self> {
        let layout = page.product_layout()?;

        let mut state = ProductPageState::new(
            layout.colors,
            layout.sizes,
            Gallery::new(layout.main_images, layout.thumbs),
        );
        if let Some(i) = layout.selected_color {
            state.color.select(i);
        }
        if let Some(i) = layout.selected_size {
            state.size.select(i);
        }
        if let Some(quantity) = layout.quantity.as_deref() {
            state.quantity.set_input(quantity);
        }

        let mut controller = Self { state, cart };
        controller.establish_price(page);
        controller.render(page);
        Some(controller)
    }

    pub fn state(&self) -> &ProductPageState {
        &self.state
    }

    pub fn handle(&mut self, action: &ProductAction, event: &UiEvent, page: &mut dyn Page) {
        match action {
            ProductAction::Increment => self.state.quantity.increment(),
            ProductAction::Decrement => {
                if !self.state.quantity.decrement() {
                    return;
                }
            }
            ProductAction::SetQuantity => {
                self.state
                    .quantity
                    .set_input(event.value.as_deref().unwrap_or_default());
            }
            ProductAction::SelectColor(i) => {
                self.state.color.select(*i);
            }
            ProductAction::SelectSize(i) => {
                self.state.size.select(*i);
            }
            ProductAction::SelectImage(i) => {
                self.state.gallery.select(*i);
            }
            ProductAction::AddToCart => {
                self.add_to_cart(page);
                return;
            }
        }
        self.render(page);
    }

    /// Add the product with the chosen quantity and options.
    ///
    /// Does nothing when the page lacks the amount, image or quantity input.
    pub fn add_to_cart(&mut self, page: &mut dyn Page) {
        let Some(details) = page.product_details() else {
            return;
        };
        let format = self.cart.borrow().format().clone();
        if let Some(item) = self.state.line_item(&details, &format) {
            self.cart.borrow_mut().add_with_notice(item, page);
        }
    }

    pub fn render(&self, page: &mut dyn Page) {
        let format = self.cart.borrow().format().clone();
        let view = render_product_page(&self.state, &format);
        page.apply_product_view(&view);
        page.bind(Anchor::ProductPage, view.bindings);
    }

    fn establish_price(&mut self, page: &dyn Page) {
        let Some(details) = page.product_details() else {
            return;
        };
        let format = self.cart.borrow().format().clone();
        if self.state.establish_base_price(&details, Some(&format)).is_none() {
            tracing::warn!(amount = ?details.amount_text, "product base price unavailable");
        }
    }
}
