use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ValidationError;
use crate::models::{
    CreateReceiptItemRequest, CreateReceiptRequest, CreateSpendingRequest, ReceiptItemOcr,
    ReceiptOcr,
};

pub const ACCEPTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// `accept` attribute for every receipt image input, picker and camera alike.
pub const IMAGE_INPUT_ACCEPT: &str = "image/jpeg,image/png";

pub fn validate_image_type(mime: &str) -> Result<(), ValidationError> {
    if ACCEPTED_IMAGE_TYPES.contains(&mime) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedImage(mime.to_string()))
    }
}

fn price_to_decimal(price: f64) -> Option<Decimal> {
    if !price.is_finite() {
        return None;
    }
    // Shortest round-trip text keeps 3.005 as 3.005 instead of 3.00499..
    Decimal::from_str(&price.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(price))
}

/// Sum of item prices rounded to cents, half away from zero.
///
/// A non-finite price makes the whole total NaN.
pub fn receipt_total(items: &[ReceiptItemOcr]) -> f64 {
    let mut total = Decimal::ZERO;
    for item in items {
        match price_to_decimal(item.price).and_then(|p| total.checked_add(p)) {
            Some(sum) => total = sum,
            None => return f64::NAN,
        }
    }
    total
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_string()
        .parse()
        .unwrap_or(f64::NAN)
}

impl ReceiptOcr {
    pub fn total(&self) -> f64 {
        receipt_total(&self.items)
    }

    pub fn to_spending_request(&self) -> CreateSpendingRequest {
        CreateSpendingRequest {
            amount: self.total(),
            remark: self.store_name.clone(),
            spending_date: Some(self.date),
            category_id: None,
            store_id: None,
        }
    }

    pub fn to_receipt_request(&self) -> CreateReceiptRequest {
        CreateReceiptRequest {
            store_name: self.store_name.clone(),
            date: self.date,
            items: self
                .items
                .iter()
                .map(|item| CreateReceiptItemRequest {
                    name: item.name.clone(),
                    price: item.price,
                })
                .collect(),
            total_amount: self.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(name: &str, price: f64) -> ReceiptItemOcr {
        ReceiptItemOcr {
            name: name.to_string(),
            price,
        }
    }

    fn receipt(items: Vec<ReceiptItemOcr>) -> ReceiptOcr {
        ReceiptOcr {
            store_name: "Corner Shop".into(),
            date: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
            items,
        }
    }

    #[test]
    fn total_rounds_half_up_to_cents() {
        let items = vec![item("tea", 3.005), item("bun", 1.00)];
        assert_eq!(receipt_total(&items), 4.01);
        assert_eq!(receipt_total(&items), receipt_total(&items));
    }

    #[test]
    fn float_noise_does_not_leak_into_total() {
        let items = vec![item("a", 0.1), item("b", 0.2)];
        assert_eq!(receipt_total(&items), 0.3);
    }

    #[test]
    fn empty_receipt_totals_zero() {
        assert_eq!(receipt_total(&[]), 0.0);
    }

    #[test]
    fn non_finite_price_poisons_total() {
        let items = vec![item("a", 1.0), item("b", f64::NAN)];
        assert!(receipt_total(&items).is_nan());
    }

    #[test]
    fn receipt_becomes_uncategorised_spending() {
        let receipt = receipt(vec![item("milk", 2.49), item("bread", 1.26)]);
        let request = receipt.to_spending_request();
        assert_eq!(request.amount, 3.75);
        assert_eq!(request.remark, "Corner Shop");
        assert_eq!(request.spending_date, Some(receipt.date));
        assert_eq!(request.category_id, None);
        assert_eq!(request.store_id, None);
    }

    #[test]
    fn receipt_record_keeps_items_and_total() {
        let receipt = receipt(vec![item("milk", 2.49)]);
        let request = receipt.to_receipt_request();
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].name, "milk");
        assert_eq!(request.total_amount, 2.49);
    }

    #[test]
    fn only_jpeg_and_png_are_accepted() {
        assert!(validate_image_type("image/jpeg").is_ok());
        assert!(validate_image_type("image/png").is_ok());
        assert_eq!(
            validate_image_type("application/pdf"),
            Err(ValidationError::UnsupportedImage("application/pdf".into()))
        );
        assert!(validate_image_type("").is_err());
    }

    #[test]
    fn image_inputs_offer_only_accepted_types() {
        let offered: Vec<&str> = IMAGE_INPUT_ACCEPT.split(',').collect();
        assert_eq!(offered, ACCEPTED_IMAGE_TYPES);
        for mime in offered {
            assert!(validate_image_type(mime).is_ok());
        }
        assert!(validate_image_type("image/heic").is_err());
        assert!(validate_image_type("image/webp").is_err());
    }
}
