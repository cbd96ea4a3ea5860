//! Typed document payloads for the print pipeline
//!
//! Each document the pipeline can print has an explicit DTO with
//! required and optional fields spelled out. Generators never fail on a
//! missing optional field — absent data is simply omitted from output
//! (no delivery section on a dine-in receipt, no counted-cash row
//! before the drawer is counted).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an order was placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
}

/// One sold line on a sale receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total: Decimal,
    /// Selected options/preparations, one per line under the item
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A tendered payment on a sale receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLine {
    /// Display name of the method ("Cash", "Card", ...)
    pub method: String,
    pub amount: Decimal,
}

/// Delivery customer details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Sale receipt payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptData {
    pub order_number: String,
    /// Order creation time, unix millis. The only timestamp that ever
    /// appears in the payload — composing twice yields identical bytes.
    pub created_at: i64,
    pub order_type: OrderType,
    #[serde(default)]
    pub table_name: Option<String>,
    pub items: Vec<ReceiptItem>,
    pub subtotal: Decimal,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub delivery_fee: Option<Decimal>,
    pub total: Decimal,
    #[serde(default)]
    pub payments: Vec<PaymentLine>,
    #[serde(default)]
    pub change: Option<Decimal>,
    #[serde(default)]
    pub customer: Option<CustomerInfo>,
}

/// One item on a kitchen ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenItem {
    pub name: String,
    pub quantity: i32,
    pub category: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Kitchen ticket payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenTicketData {
    pub order_number: String,
    pub created_at: i64,
    #[serde(default)]
    pub table_name: Option<String>,
    pub items: Vec<KitchenItem>,
    /// Number of previous prints; >0 marks the ticket as a reprint
    #[serde(default)]
    pub print_count: u32,
}

/// Staff role owning a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftRole {
    Driver,
    Cashier,
    Waiter,
}

/// Shift checkout slip payload
///
/// Cash reconciliation uses one convention for every role:
/// `expected_cash = starting_float + cash_sales - payouts` and
/// `cash_due = counted_cash - starting_float`. The sign conventions in
/// the predecessor system disagreed between roles; see DESIGN.md before
/// changing either formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftSummary {
    pub role: ShiftRole,
    pub staff_name: String,
    pub opened_at: i64,
    pub closed_at: i64,
    pub orders_count: u32,
    pub starting_float: Decimal,
    pub cash_sales: Decimal,
    pub card_sales: Decimal,
    /// Cash taken out of the drawer during the shift
    #[serde(default)]
    pub payouts: Decimal,
    /// Physically counted cash at close; absent until counted
    #[serde(default)]
    pub counted_cash: Option<Decimal>,
}

impl ShiftSummary {
    /// Cash that should be in the drawer at close
    pub fn expected_cash(&self) -> Decimal {
        self.starting_float + self.cash_sales - self.payouts
    }

    /// Cash the staff member hands back, once counted
    pub fn cash_due(&self) -> Option<Decimal> {
        self.counted_cash.map(|counted| counted - self.starting_float)
    }

    /// Overage (+) or shortage (-) against the expectation
    pub fn difference(&self) -> Option<Decimal> {
        self.counted_cash.map(|counted| counted - self.expected_cash())
    }
}

/// Per-payment-method total on the Z report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodTotal {
    pub method: String,
    pub amount: Decimal,
}

/// Per-category total on the Z report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

/// End-of-day cash report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZReportSnapshot {
    /// Business date, unix millis at day open
    pub date: i64,
    pub gross_sales: Decimal,
    pub orders_count: u32,
    #[serde(default)]
    pub cancelled_count: u32,
    #[serde(default)]
    pub by_method: Vec<MethodTotal>,
    #[serde(default)]
    pub by_category: Vec<CategoryTotal>,
}

/// Driver assignment slip payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignOrderData {
    pub order_number: String,
    pub created_at: i64,
    pub driver_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Cash the driver collects on delivery; absent when prepaid
    #[serde(default)]
    pub amount_due: Option<Decimal>,
}

/// Every document the pipeline can print
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Document {
    Receipt(ReceiptData),
    KitchenTicket(KitchenTicketData),
    ShiftCheckout(ShiftSummary),
    ZReport(ZReportSnapshot),
    AssignOrder(AssignOrderData),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn shift(counted: Option<&str>) -> ShiftSummary {
        ShiftSummary {
            role: ShiftRole::Cashier,
            staff_name: "Maria".to_string(),
            opened_at: 1705912335000,
            closed_at: 1705941135000,
            orders_count: 41,
            starting_float: dec("100"),
            cash_sales: dec("385.50"),
            card_sales: dec("612.00"),
            payouts: dec("25.00"),
            counted_cash: counted.map(dec),
        }
    }

    #[test]
    fn test_expected_cash() {
        assert_eq!(shift(None).expected_cash(), dec("460.50"));
    }

    #[test]
    fn test_cash_due_requires_count() {
        assert_eq!(shift(None).cash_due(), None);
        assert_eq!(shift(Some("455.00")).cash_due(), Some(dec("355.00")));
    }

    #[test]
    fn test_difference_sign() {
        // Shortage is negative
        assert_eq!(shift(Some("455.00")).difference(), Some(dec("-5.50")));
        assert_eq!(shift(Some("465.00")).difference(), Some(dec("4.50")));
    }

    #[test]
    fn test_document_tag_roundtrip() {
        let doc = Document::AssignOrder(AssignOrderData {
            order_number: "D-17".to_string(),
            created_at: 1705912335000,
            driver_name: "Nikos".to_string(),
            address: None,
            phone: None,
            amount_due: Some(dec("21.80")),
        });
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#""kind":"assign_order""#));
        let back: Document = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, Document::AssignOrder(_)));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "order_number": "A-1",
            "created_at": 1705912335000,
            "order_type": "dine_in",
            "items": [],
            "subtotal": 0,
            "total": 0
        }"#;
        let data: ReceiptData = serde_json::from_str(json).unwrap();
        assert!(data.table_name.is_none());
        assert!(data.customer.is_none());
        assert!(data.payments.is_empty());
    }
}
