//! Product page state and the add-to-cart line item it produces.

use std::collections::BTreeMap;

use crate::cart::CartItem;
use crate::ids::ItemId;
use crate::money::PriceFormat;
use crate::product::{BasePrice, Gallery, OptionGroup, QuantitySelector};

/// Name used when the page has no product title.
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";

/// What the page exposes about the product being viewed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetails {
    /// `data-id` of the product container.
    pub id: Option<String>,
    /// Product title text.
    pub name: Option<String>,
    /// Displayed amount text, if the amount element exists.
    pub amount_text: Option<String>,
    /// `data-base-price` attribute of the amount element.
    pub base_price: Option<String>,
    /// Source of the primary gallery image.
    pub primary_image: Option<String>,
    /// Whether the page has a quantity input.
    pub has_quantity_input: bool,
}

/// Everything the user has chosen on a product page.
#[derive(Debug, Clone, Default)]
pub struct ProductPageState {
    pub quantity: QuantitySelector,
    pub color: OptionGroup,
    pub size: OptionGroup,
    pub gallery: Gallery,
    base_price: Option<BasePrice>,
}

impl ProductPageState {
    pub fn new(colors: Vec<String>, sizes: Vec<String>, gallery: Gallery) -> Self {
        Self {
            quantity: QuantitySelector::default(),
            color: OptionGroup::new("color", colors),
            size: OptionGroup::new("size", sizes),
            gallery,
            base_price: None,
        }
    }

    /// Cached unit price, once established.
    pub fn base_price(&self) -> Option<BasePrice> {
        self.base_price
    }

    /// Establish the unit price from the page, keeping any earlier value.
    pub fn establish_base_price(
        &mut self,
        details: &ProductDetails,
        format: Option<&PriceFormat>,
    ) -> Option<BasePrice> {
        if self.base_price.is_none() {
            let text = details.amount_text.as_deref()?;
            self.base_price = BasePrice::establish(details.base_price.as_deref(), text, format);
        }
        self.base_price
    }

    /// Displayed price for the current quantity.
    pub fn price_display(&self, format: Option<&PriceFormat>) -> Option<String> {
        self.base_price
            .map(|base| base.display(self.quantity.value(), format))
    }

    /// Selected color and size.
    pub fn selected_options(&self) -> BTreeMap<String, String> {
        [&self.color, &self.size]
            .into_iter()
            .filter_map(|group| {
                group
                    .selected_value()
                    .map(|v| (group.name().to_string(), v.to_string()))
            })
            .collect()
    }

    /// Build the line item for "add to cart".
    ///
    /// Returns `None` when the amount element, primary image or quantity
    /// input is missing, or when no positive unit price can be found. A
    /// missing id is replaced by a generated one.
    pub fn line_item(&mut self, details: &ProductDetails, format: &PriceFormat) -> Option<CartItem> {
        if details.amount_text.is_none() || !details.has_quantity_input {
            tracing::error!("required product elements not found");
            return None;
        }
        let Some(image) = details.primary_image.as_deref() else {
            tracing::error!("product image not found");
            return None;
        };

        let price = self
            .establish_base_price(details, Some(format))
            .map(|base| base.value())
            .filter(|p| p.is_finite() && *p > 0.0);
        let Some(price) = price else {
            tracing::error!(amount = ?details.amount_text, "product price could not be determined");
            return None;
        };

        let id = details
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(ItemId::new)
            .unwrap_or_else(ItemId::generate);
        let name = details
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_PRODUCT);

        let mut item = CartItem::new(id, name, price, image)
            .with_quantity(i64::from(self.quantity.value()));
        for (key, value) in self.selected_options() {
            item = item.with_option(key, value);
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ProductDetails {
        ProductDetails {
            id: Some("P-7".into()),
            name: Some("  Silk Saree ".into()),
            amount_text: Some("\u{20b9}2,500.00".into()),
            base_price: None,
            primary_image: Some("/img/saree-1.jpg".into()),
            has_quantity_input: true,
        }
    }

    fn state() -> ProductPageState {
        ProductPageState::new(
            vec!["red".into(), "gold".into()],
            vec!["S".into(), "M".into()],
            Gallery::new(2, 2),
        )
    }

    #[test]
    fn test_line_item_uses_unit_price_and_options() {
        let mut state = state();
        state.quantity.set_input("3");
        state.color.select(1);
        state.size.select(0);

        let item = state.line_item(&details(), &PriceFormat::default()).unwrap();
        assert_eq!(item.id.as_str(), "P-7");
        assert_eq!(item.name, "Silk Saree");
        assert_eq!(item.price, 2500.0);
        assert_eq!(item.quantity, 3);

        let options = item.options.unwrap();
        assert_eq!(options["color"], "gold");
        assert_eq!(options["size"], "S");
    }

    #[test]
    fn test_line_item_defaults() {
        let mut state = state();
        let details = ProductDetails {
            id: None,
            name: None,
            ..details()
        };
        let item = state.line_item(&details, &PriceFormat::default()).unwrap();
        assert_eq!(item.name, UNNAMED_PRODUCT);
        assert!(!item.id.as_str().is_empty());
        assert!(item.options.is_none());
    }

    #[test]
    fn test_line_item_requires_elements() {
        let format = PriceFormat::default();
        let no_image = ProductDetails {
            primary_image: None,
            ..details()
        };
        assert!(state().line_item(&no_image, &format).is_none());

        let no_qty = ProductDetails {
            has_quantity_input: false,
            ..details()
        };
        assert!(state().line_item(&no_qty, &format).is_none());

        let no_price = ProductDetails {
            amount_text: Some("Price on request".into()),
            ..details()
        };
        assert!(state().line_item(&no_price, &format).is_none());
    }

    #[test]
    fn test_base_price_attribute_survives_quantity_changes() {
        let mut state = state();
        let details = ProductDetails {
            amount_text: Some("\u{20b9}7,500.00".into()),
            base_price: Some("2500".into()),
            ..details()
        };
        state.establish_base_price(&details, None);
        state.quantity.set_input("3");
        assert_eq!(state.price_display(None).unwrap(), "\u{20b9}7,500.00");

        let item = state.line_item(&details, &PriceFormat::default()).unwrap();
        assert_eq!(item.price, 2500.0);
    }
}
