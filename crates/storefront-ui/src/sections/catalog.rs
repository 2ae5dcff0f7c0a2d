//! Catalog regions - product grid and result count.

use storefront_commerce::catalog::Product;
use storefront_commerce::PriceFormat;

use super::{html_escape, with_data_id};
use crate::page::{Action, Binding, CatalogAction, Rendered};

/// Render the product grid for the current view.
pub fn render_product_grid(products: &[Product], format: &PriceFormat) -> Rendered {
    let html = products
        .iter()
        .map(|p| render_product_card(p, format))
        .collect();

    let bindings = products
        .iter()
        .map(|p| {
            Binding::click(
                format!("{} .add_to_cart_button", with_data_id(".product-item", p.id.as_str())),
                Action::Catalog(CatalogAction::AddToCart(p.id.clone())),
            )
        })
        .collect();

    Rendered { html, bindings }
}

fn render_product_card(product: &Product, format: &PriceFormat) -> String {
    let id = html_escape(product.id.as_str());
    let name = html_escape(&product.name);

    let sale_label = if product.on_sale {
        r#"<div class="product-label"><span class="sale">sale</span></div>"#
    } else {
        ""
    };
    let old_price = product
        .old_price
        .map(|old| format!("<del><span>{}</span></del>", plain_amount(old, format)))
        .unwrap_or_default();

    format!(
        r##"<div class="col-md-4 col-xs-6 product product-grid">
    <div class="product-item" data-id="{id}">
        <div class="product-img">
            <a href="shop-single.html?id={id}">
                <img src="{image}" alt="{name}">
            </a>
            {sale_label}
            <div class="product-actions">
                <a href="#" class="product-add-to-compare" data-toggle="tooltip" data-placement="bottom" title="Add to compare">
                    <i class="fa fa-exchange"></i>
                </a>
                <a href="#" class="product-add-to-wishlist" data-toggle="tooltip" data-placement="bottom" title="Add to wishlist">
                    <i class="fa fa-heart"></i>
                </a>
                <a href="#" class="add_to_cart_button" data-toggle="tooltip" data-placement="bottom" title="Add to cart">
                    <i class="fa fa-shopping-cart"></i>
                </a>
            </div>
        </div>
        <div class="product-details">
            <h3 class="product-title">
                <a href="shop-single.html?id={id}">{name}</a>
            </h3>
            <span class="category">
                <a href="#">{category}</a>
            </span>
        </div>
        <span class="price">
            {old_price}
            <ins>
                <span class="amount">{price}</span>
            </ins>
        </span>
    </div>
</div>"##,
        id = id,
        image = html_escape(&product.image),
        name = name,
        sale_label = sale_label,
        category = html_escape(&product.category),
        old_price = old_price,
        price = plain_amount(product.price, format),
    )
}

// Listing cards show the bare amount without digit grouping.
fn plain_amount(value: f64, format: &PriceFormat) -> String {
    format!("{}{:.*}", format.symbol, format.decimals, value)
}

/// Result count line, e.g. `Showing: 3 of 10 results`.
pub fn render_result_count(shown: usize, total: usize) -> String {
    format!("Showing: {} of {} results", shown, total)
}
