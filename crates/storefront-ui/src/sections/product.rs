//! Single-product page view.

use storefront_commerce::product::ProductPageState;
use storefront_commerce::PriceFormat;

use crate::page::{Action, Binding, GalleryView, ProductAction, ProductPageView};

/// Compute how the product page should look for `state`.
///
/// The page markup is authored statically, so the view carries the values
/// to apply (quantity, price, selections) instead of markup.
pub fn render_product_page(state: &ProductPageState, format: &PriceFormat) -> ProductPageView {
    let gallery = state.gallery.selected().map(|selected| GalleryView {
        selected_thumb: selected,
        main_visible: (0..state.gallery.main_len())
            .map(|i| state.gallery.is_main_visible(i))
            .collect(),
    });

    ProductPageView {
        quantity: state.quantity.value(),
        price_text: state.price_display(Some(format)),
        base_price: state.base_price().map(|base| base.attribute()),
        selected_color: state.color.selected(),
        selected_size: state.size.selected(),
        gallery,
        bindings: product_bindings(state),
    }
}

fn product_bindings(state: &ProductPageState) -> Vec<Binding> {
    let mut bindings = vec![
        Binding::click(".quantity .plus", Action::Product(ProductAction::Increment)),
        Binding::click(".quantity .minus", Action::Product(ProductAction::Decrement)),
        Binding::change(
            r#".quantity input[type="number"]"#,
            Action::Product(ProductAction::SetQuantity),
        ),
        Binding::click(
            ".product-description-wrap .add_to_cart_button",
            Action::Product(ProductAction::AddToCart),
        ),
    ];

    bindings.extend((0..state.color.choices().len()).map(|i| {
        Binding::click(".color-swatches a", Action::Product(ProductAction::SelectColor(i))).nth(i)
    }));
    bindings.extend((0..state.size.choices().len()).map(|i| {
        Binding::click(".size-options a", Action::Product(ProductAction::SelectSize(i))).nth(i)
    }));
    bindings.extend((0..state.gallery.thumbs_len()).map(|i| {
        Binding::click(
            ".gallery-thumbs .gallery-cell",
            Action::Product(ProductAction::SelectImage(i)),
        )
        .nth(i)
    }));

    bindings
}
