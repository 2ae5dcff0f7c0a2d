//! Cart regions - nav mini-cart and the full cart table.

use storefront_commerce::cart::CartItem;
use storefront_commerce::PriceFormat;

use super::{html_escape, with_data_id};
use crate::page::{Action, Binding, CartAction, Rendered};

/// Render the nav mini-cart item list.
pub fn render_mini_cart(items: &[CartItem], format: &PriceFormat) -> Rendered {
    let html = items
        .iter()
        .map(|item| render_mini_cart_item(item, format))
        .collect();

    let bindings = items
        .iter()
        .map(|item| {
            let row = with_data_id(".nav-cart-item", item.id.as_str());
            Binding::click(
                format!("{} .remove", row),
                Action::Cart(CartAction::Remove(item.id.clone())),
            )
        })
        .collect();

    Rendered { html, bindings }
}

fn render_mini_cart_item(item: &CartItem, format: &PriceFormat) -> String {
    let id = html_escape(item.id.as_str());
    let name = html_escape(&item.name);
    format!(
        r##"<div class="nav-cart-item clearfix" data-id="{id}">
    <div class="nav-cart-img">
        <a href="#">
            <img src="{image}" alt="{name}">
        </a>
    </div>
    <div class="nav-cart-title">
        <a href="#">{name}</a>
        <div class="nav-cart-price">
            <span>{quantity} x</span>
            <span>{price}</span>
        </div>
    </div>
    <div class="nav-cart-remove">
        <a href="#" class="remove" data-id="{id}"><i class="ui-close"></i></a>
    </div>
</div>"##,
        id = id,
        image = html_escape(&item.image),
        name = name,
        quantity = item.quantity,
        price = format.format(item.price),
    )
}

/// Render the cart table body, one row per line item with quantity
/// controls, subtotal and a remove link.
pub fn render_cart_table(items: &[CartItem], format: &PriceFormat) -> Rendered {
    let html = items
        .iter()
        .map(|item| render_cart_row(item, format))
        .collect();

    let bindings = items
        .iter()
        .flat_map(|item| {
            let row = with_data_id("tr.cart_item", item.id.as_str());
            let id = &item.id;
            [
                Binding::click(
                    format!("{} .remove", row),
                    Action::Cart(CartAction::Remove(id.clone())),
                ),
                Binding::click(
                    format!("{} .plus", row),
                    Action::Cart(CartAction::Increment(id.clone())),
                ),
                Binding::click(
                    format!("{} .minus", row),
                    Action::Cart(CartAction::Decrement(id.clone())),
                ),
                Binding::change(
                    format!("{} .qty", row),
                    Action::Cart(CartAction::SetQuantity(id.clone())),
                ),
            ]
        })
        .collect();

    Rendered { html, bindings }
}

fn render_cart_row(item: &CartItem, format: &PriceFormat) -> String {
    let id = html_escape(item.id.as_str());
    let name = html_escape(&item.name);
    format!(
        r##"<tr class="cart_item" data-id="{id}">
    <td class="product-thumbnail">
        <a href="#">
            <img src="{image}" alt="{name}">
        </a>
    </td>
    <td class="product-name">
        <a href="#">{name}</a>
        {options}
    </td>
    <td class="product-price">
        <span class="amount">{price}</span>
    </td>
    <td class="product-quantity">
        <div class="quantity buttons_added">
            <input type="number" step="1" min="1" value="{quantity}" title="Qty" class="input-text qty text" data-id="{id}">
            <div class="quantity-adjust">
                <a href="#" class="plus" data-id="{id}">
                    <i class="fa fa-angle-up"></i>
                </a>
                <a href="#" class="minus" data-id="{id}">
                    <i class="fa fa-angle-down"></i>
                </a>
            </div>
        </div>
    </td>
    <td class="product-subtotal">
        <span class="amount">{subtotal}</span>
    </td>
    <td class="product-remove">
        <a href="#" class="remove" title="Remove this item" data-id="{id}">
            <i class="ui-close"></i>
        </a>
    </td>
</tr>"##,
        id = id,
        image = html_escape(&item.image),
        name = name,
        options = render_options(item),
        price = format.format(item.price),
        quantity = item.quantity,
        subtotal = format.format(item.subtotal()),
    )
}

fn render_options(item: &CartItem) -> String {
    let Some(options) = item.options.as_ref().filter(|o| !o.is_empty()) else {
        return String::new();
    };

    let entries: String = options
        .iter()
        .map(|(key, value)| format!("<li>{}: {}</li>", html_escape(key), html_escape(value)))
        .collect();
    format!("<ul>{}</ul>", entries)
}
