//! Checkout value objects: the joined cart view and per-vendor charge
//! grouping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// A cart line joined with the product and vendor data checkout needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_type: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub supplier_name: String,

    /// The supplier's store-account alias; the bank pays this identity.
    /// `None` when the supplier never set one, which blocks checkout.
    pub vendor_alias: Option<String>,
}

impl CartLine {
    /// Line subtotal: unit price x quantity
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// One vendor's share of an order: the amount the bank reserves against
/// that vendor's alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorCharge {
    pub vendor_alias: String,
    pub amount: Decimal,
}

/// Groups cart lines by vendor alias and sums a per-vendor amount,
/// preserving first-seen vendor order.
///
/// Fails when any line's supplier has no alias: the bank has no payee to
/// reserve funds for.
pub fn group_by_vendor(lines: &[CartLine]) -> DomainResult<Vec<VendorCharge>> {
    let mut charges: Vec<VendorCharge> = Vec::new();

    for line in lines {
        let alias = line.vendor_alias.as_deref().ok_or_else(|| {
            DomainError::BusinessRule {
                message: format!(
                    "supplier {} has no payout alias configured",
                    line.supplier_name
                ),
            }
        })?;

        match charges.iter_mut().find(|c| c.vendor_alias == alias) {
            Some(charge) => charge.amount += line.line_total(),
            None => charges.push(VendorCharge {
                vendor_alias: alias.to_string(),
                amount: line.line_total(),
            }),
        }
    }

    Ok(charges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(name: &str, alias: Option<&str>, price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            product_id: Uuid::new_v4(),
            product_name: name.to_string(),
            product_type: "Drinks".to_string(),
            unit_price: price,
            quantity,
            supplier_name: format!("{} supplier", name),
            vendor_alias: alias.map(|a| a.to_string()),
        }
    }

    #[test]
    fn test_line_total() {
        let l = line("cola", Some("acme"), dec!(2.50), 4);
        assert_eq!(l.line_total(), dec!(10.00));
    }

    #[test]
    fn test_grouping_sums_per_vendor() {
        let lines = vec![
            line("cola", Some("acme"), dec!(2.50), 2),
            line("lemonade", Some("acme"), dec!(3.00), 1),
            line("pretzel", Some("bakery"), dec!(1.25), 4),
        ];

        let charges = group_by_vendor(&lines).unwrap();
        assert_eq!(charges.len(), 2);
        assert_eq!(charges[0].vendor_alias, "acme");
        assert_eq!(charges[0].amount, dec!(8.00));
        assert_eq!(charges[1].vendor_alias, "bakery");
        assert_eq!(charges[1].amount, dec!(5.00));
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let lines = vec![
            line("pretzel", Some("bakery"), dec!(1.25), 1),
            line("cola", Some("acme"), dec!(2.50), 1),
            line("bagel", Some("bakery"), dec!(2.00), 1),
        ];

        let charges = group_by_vendor(&lines).unwrap();
        let aliases: Vec<&str> = charges.iter().map(|c| c.vendor_alias.as_str()).collect();
        assert_eq!(aliases, vec!["bakery", "acme"]);
    }

    #[test]
    fn test_missing_alias_is_rejected() {
        let lines = vec![line("cola", None, dec!(2.50), 1)];
        assert!(group_by_vendor(&lines).is_err());
    }

    #[test]
    fn test_empty_cart_yields_no_charges() {
        let charges = group_by_vendor(&[]).unwrap();
        assert!(charges.is_empty());
    }
}
