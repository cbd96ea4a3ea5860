//! Receipt translation catalog
//!
//! Lookup never fails: a key with no entry degrades to its last path
//! segment so a missing translation prints something legible instead of
//! aborting a receipt. `{name}` placeholders are interpolated from the
//! params slice.

use crate::config::Language;

/// Translate a dotted key for the given language
///
/// Unresolved keys degrade to the key's last path segment.
pub fn t(key: &str, lang: Language) -> String {
    t_with(key, lang, &[])
}

/// Translate with `{placeholder}` interpolation
pub fn t_with(key: &str, lang: Language, params: &[(&str, &str)]) -> String {
    let template = match lang {
        Language::En => lookup_en(key),
        Language::El => lookup_el(key),
    };

    let template = match template {
        Some(s) => s.to_string(),
        None => key.rsplit('.').next().unwrap_or(key).to_string(),
    };

    let mut out = template;
    for (name, value) in params {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}

fn lookup_en(key: &str) -> Option<&'static str> {
    Some(match key {
        "receipt.order" => "Order #{number}",
        "receipt.table" => "Table",
        "receipt.order_type.dine_in" => "Dine-in",
        "receipt.order_type.takeaway" => "Takeaway",
        "receipt.order_type.delivery" => "Delivery",
        "receipt.items" => "ITEMS",
        "receipt.subtotal" => "Subtotal",
        "receipt.discount" => "Discount",
        "receipt.delivery_fee" => "Delivery fee",
        "receipt.total" => "TOTAL",
        "receipt.payment" => "Payment",
        "receipt.change" => "Change",
        "receipt.thank_you" => "Thank you!",
        "receipt.customer_copy" => "CUSTOMER COPY",
        "receipt.merchant_copy" => "MERCHANT COPY",
        "kitchen.ticket" => "KITCHEN",
        "kitchen.takeaway" => "Takeaway",
        "kitchen.note" => "Note",
        "kitchen.reprint" => "*** REPRINT #{count} ***",
        "checkout.title" => "SHIFT CHECKOUT",
        "checkout.role.driver" => "Driver",
        "checkout.role.cashier" => "Cashier",
        "checkout.role.waiter" => "Waiter",
        "checkout.opened" => "Opened",
        "checkout.closed" => "Closed",
        "checkout.orders" => "Orders",
        "checkout.cash_sales" => "Cash sales",
        "checkout.card_sales" => "Card sales",
        "checkout.payouts" => "Payouts",
        "checkout.starting_float" => "Starting float",
        "checkout.expected_cash" => "Expected cash",
        "checkout.counted_cash" => "Counted cash",
        "checkout.cash_due" => "Cash to return",
        "checkout.difference" => "Difference",
        "checkout.signature" => "Signature",
        "zreport.title" => "Z REPORT",
        "zreport.gross_sales" => "Gross sales",
        "zreport.orders" => "Orders",
        "zreport.cancelled" => "Cancelled",
        "zreport.by_method" => "BY PAYMENT METHOD",
        "zreport.by_category" => "BY CATEGORY",
        "assign.title" => "DELIVERY ASSIGNMENT",
        "assign.driver" => "Driver",
        "assign.address" => "Address",
        "assign.phone" => "Phone",
        "assign.amount_due" => "Amount due",
        _ => return None,
    })
}

fn lookup_el(key: &str) -> Option<&'static str> {
    Some(match key {
        "receipt.order" => "Παραγγελία #{number}",
        "receipt.table" => "Τραπέζι",
        "receipt.order_type.dine_in" => "Εντός",
        "receipt.order_type.takeaway" => "Πακέτο",
        "receipt.order_type.delivery" => "Διανομή",
        "receipt.items" => "ΕΙΔΗ",
        "receipt.subtotal" => "Μερικό σύνολο",
        "receipt.discount" => "Έκπτωση",
        "receipt.delivery_fee" => "Κόστος διανομής",
        "receipt.total" => "ΣΥΝΟΛΟ",
        "receipt.payment" => "Πληρωμή",
        "receipt.change" => "Ρέστα",
        "receipt.thank_you" => "Ευχαριστούμε!",
        "receipt.customer_copy" => "ΑΝΤΙΓΡΑΦΟ ΠΕΛΑΤΗ",
        "receipt.merchant_copy" => "ΑΝΤΙΓΡΑΦΟ ΚΑΤΑΣΤΗΜΑΤΟΣ",
        "kitchen.ticket" => "ΚΟΥΖΙΝΑ",
        "kitchen.takeaway" => "Πακέτο",
        "kitchen.note" => "Σημείωση",
        "kitchen.reprint" => "*** ΕΠΑΝΕΚΤΥΠΩΣΗ #{count} ***",
        "checkout.title" => "ΚΛΕΙΣΙΜΟ ΒΑΡΔΙΑΣ",
        "checkout.role.driver" => "Διανομέας",
        "checkout.role.cashier" => "Ταμίας",
        "checkout.role.waiter" => "Σερβιτόρος",
        "checkout.opened" => "Άνοιξε",
        "checkout.closed" => "Έκλεισε",
        "checkout.orders" => "Παραγγελίες",
        "checkout.cash_sales" => "Πωλήσεις μετρητά",
        "checkout.card_sales" => "Πωλήσεις κάρτα",
        "checkout.payouts" => "Πληρωμές εξόδων",
        "checkout.starting_float" => "Αρχικό ταμείο",
        "checkout.expected_cash" => "Αναμενόμενα μετρητά",
        "checkout.counted_cash" => "Μετρημένα μετρητά",
        "checkout.cash_due" => "Μετρητά προς απόδοση",
        "checkout.difference" => "Διαφορά",
        "checkout.signature" => "Υπογραφή",
        "zreport.title" => "ΑΝΑΦΟΡΑ Z",
        "zreport.gross_sales" => "Σύνολο πωλήσεων",
        "zreport.orders" => "Παραγγελίες",
        "zreport.cancelled" => "Ακυρωμένες",
        "zreport.by_method" => "ΑΝΑ ΤΡΟΠΟ ΠΛΗΡΩΜΗΣ",
        "zreport.by_category" => "ΑΝΑ ΚΑΤΗΓΟΡΙΑ",
        "assign.title" => "ΑΝΑΘΕΣΗ ΔΙΑΝΟΜΗΣ",
        "assign.driver" => "Διανομέας",
        "assign.address" => "Διεύθυνση",
        "assign.phone" => "Τηλέφωνο",
        "assign.amount_due" => "Εισπρακτέο",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_languages() {
        assert_eq!(t("receipt.total", Language::En), "TOTAL");
        assert_eq!(t("receipt.total", Language::El), "ΣΥΝΟΛΟ");
    }

    #[test]
    fn test_unresolved_key_degrades_to_last_segment() {
        assert_eq!(t("receipt.totals.grand_total", Language::En), "grand_total");
        assert_eq!(t("nonexistent", Language::El), "nonexistent");
    }

    #[test]
    fn test_interpolation() {
        assert_eq!(
            t_with("receipt.order", Language::En, &[("number", "1042")]),
            "Order #1042"
        );
        assert_eq!(
            t_with("kitchen.reprint", Language::El, &[("count", "2")]),
            "*** ΕΠΑΝΕΚΤΥΠΩΣΗ #2 ***"
        );
    }

    #[test]
    fn test_missing_param_left_verbatim() {
        assert_eq!(t("receipt.order", Language::En), "Order #{number}");
    }
}
