//! Shipping calculation request types.
//!
//! A [`CalculationRequest`] captures one snapshot of the inputs that drive a
//! shipping quote: destination postcode, cart contents, and cart subtotal.
//! The struct serializes directly into the downstream wire format, so the
//! field names (and the `virtual`/`downloadable` renames on [`CartItem`])
//! match the endpoint's JSON contract.

use serde::{Deserialize, Serialize};

/// A single cart line as seen by the shipping endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier.
    pub id: u64,
    /// Virtual products need no physical shipping.
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    /// Downloadable products need no physical shipping.
    #[serde(rename = "downloadable")]
    pub is_downloadable: bool,
    /// Quantity of this product in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a physical cart line with the given id and quantity.
    pub fn physical(id: u64, quantity: u32) -> Self {
        CartItem {
            id,
            is_virtual: false,
            is_downloadable: false,
            quantity,
        }
    }

    /// Returns `true` if the item needs no physical shipping.
    pub fn is_intangible(&self) -> bool {
        self.is_virtual || self.is_downloadable
    }
}

/// One snapshot of the inputs driving a shipping calculation.
///
/// Every relevant input change produces a fresh `CalculationRequest`; the
/// calculator supersedes the previous one and cancels its in-flight call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Destination postcode as typed by the user.
    pub postcode: String,
    /// Ordered cart contents.
    pub items: Vec<CartItem>,
    /// Cart subtotal, in the shop currency.
    pub subtotal: f64,
}

impl CalculationRequest {
    /// Creates a new request snapshot.
    pub fn new(postcode: impl Into<String>, items: Vec<CartItem>, subtotal: f64) -> Self {
        CalculationRequest {
            postcode: postcode.into(),
            items,
            subtotal,
        }
    }

    /// Returns `true` if this request may be issued downstream.
    ///
    /// A request is only calculable when the postcode is non-empty and the
    /// cart holds at least one item. Non-calculable input resets the
    /// calculator immediately, without any debounce delay.
    pub fn is_calculable(&self) -> bool {
        !self.postcode.is_empty() && !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculable_requires_postcode_and_items() {
        let items = vec![CartItem::physical(1, 2)];
        assert!(CalculationRequest::new("1145", items.clone(), 49.0).is_calculable());
        assert!(!CalculationRequest::new("", items, 49.0).is_calculable());
        assert!(!CalculationRequest::new("1145", vec![], 49.0).is_calculable());
    }

    #[test]
    fn test_wire_field_names() {
        let request = CalculationRequest::new(
            "1145",
            vec![CartItem {
                id: 7,
                is_virtual: true,
                is_downloadable: false,
                quantity: 1,
            }],
            10.5,
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["postcode"], "1145");
        assert_eq!(json["items"][0]["virtual"], true);
        assert_eq!(json["items"][0]["downloadable"], false);
        assert_eq!(json["items"][0]["quantity"], 1);
        assert_eq!(json["subtotal"], 10.5);
    }

    #[test]
    fn test_intangible_items() {
        let mut item = CartItem::physical(1, 1);
        assert!(!item.is_intangible());
        item.is_downloadable = true;
        assert!(item.is_intangible());
    }
}
