//! Pure renderers for the storefront regions.
//!
//! Each renderer maps current state to markup and the bindings for the
//! elements in that markup. Rendering the same state twice yields the same
//! output.

mod cart;
mod catalog;
mod product;

pub use cart::{render_cart_table, render_mini_cart};
pub use catalog::{render_product_grid, render_result_count};
pub use product::render_product_page;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// `prefix[data-id="id"]` with the id quoted for CSS.
fn with_data_id(prefix: &str, id: &str) -> String {
    let quoted = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!(r#"{}[data-id="{}"]"#, prefix, quoted)
}
