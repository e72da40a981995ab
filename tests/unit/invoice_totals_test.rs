// Invoice assembly tests: the total invariant
// total == round(subtotal - discount + sum(tax_lines.amount), 2)
// across jurisdictions, plus validation of items and discounts.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use vetshop::core::money::round_cents;
use vetshop::modules::invoices::models::InvoiceItem;
use vetshop::modules::invoices::services::InvoiceService;
use vetshop::modules::taxes::services::TaxCalculator;

fn item(name: &str, price: Decimal, quantity: i32) -> InvoiceItem {
    InvoiceItem::new(format!("prod-{}", name), name.to_string(), price, quantity).unwrap()
}

#[test]
fn test_total_invariant_holds_per_jurisdiction() {
    let service = InvoiceService::new();
    let calc = TaxCalculator::new();

    for code in ["AB", "BC", "ON", "QC", "NS", "SK"] {
        let invoice = service
            .build(
                vec![
                    item("Kibble", dec!(34.99), 2),
                    item("Litter", dec!(12.49), 1),
                ],
                dec!(5.00),
                Some(code),
            )
            .unwrap();

        let tax_sum: Decimal = invoice.tax_lines.iter().map(|l| l.amount).sum();
        assert_eq!(
            invoice.total,
            round_cents(invoice.subtotal - invoice.discount + tax_sum),
            "total invariant violated for {}",
            code
        );

        let expected_lines = calc.compute_taxes(invoice.subtotal, Some(code)).unwrap();
        assert_eq!(invoice.tax_lines, expected_lines);
    }
}

#[test]
fn test_ontario_hst_receipt() {
    let service = InvoiceService::new();
    let invoice = service
        .build(vec![item("Harness", dec!(59.99), 1)], dec!(0), Some("ON"))
        .unwrap();

    assert_eq!(invoice.subtotal, dec!(59.99));
    assert_eq!(invoice.tax_lines.len(), 1);
    assert_eq!(invoice.tax_lines[0].name, "HST");
    assert_eq!(invoice.tax_lines[0].amount, dec!(7.80));
    assert_eq!(invoice.total, dec!(67.79));
}

#[test]
fn test_quebec_receipt_shows_gst_then_pst() {
    let service = InvoiceService::new();
    let invoice = service
        .build(vec![item("Scratcher", dec!(100.00), 1)], dec!(0), Some("QC"))
        .unwrap();

    let names: Vec<_> = invoice.tax_lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["GST", "PST"]);
    assert_eq!(invoice.total, dec!(114.98)); // 100 + 5.00 + 9.98
}

#[test]
fn test_unknown_jurisdiction_invoice_is_estimated() {
    let service = InvoiceService::new();
    let invoice = service
        .build(vec![item("Bed", dec!(80.00), 1)], dec!(0), None)
        .unwrap();

    assert_eq!(invoice.tax_lines.len(), 1);
    assert_eq!(invoice.tax_lines[0].name, "Estimated Taxes");
    assert_eq!(
        invoice.total,
        round_cents(invoice.subtotal + invoice.tax_lines[0].amount)
    );
}

#[test]
fn test_item_subtotals_round_to_cents() {
    let service = InvoiceService::new();
    let invoice = service
        .build(vec![item("Chews", dec!(3.333), 3)], dec!(0), Some("AB"))
        .unwrap();

    // 3 * 3.333 = 9.999 -> 10.00
    assert_eq!(invoice.subtotal, dec!(10.00));
}

#[test]
fn test_invoice_validation() {
    let service = InvoiceService::new();

    assert!(service.build(vec![], dec!(0), Some("ON")).is_err());
    assert!(service
        .build(vec![item("Toy", dec!(5.00), 1)], dec!(-1), Some("ON"))
        .is_err());
    assert!(service
        .build(vec![item("Toy", dec!(5.00), 1)], dec!(5.01), Some("ON"))
        .is_err());
    assert!(InvoiceItem::new("p".into(), "Toy".into(), dec!(5.00), 0).is_err());
}

#[test]
fn test_rendered_receipt_lines() {
    let service = InvoiceService::new();
    let invoice = service
        .build(
            vec![item("Kibble", dec!(34.99), 2)],
            dec!(2.00),
            Some("QC"),
        )
        .unwrap();

    let lines = service.render_lines(&invoice);
    assert_eq!(lines[0], "Kibble x2 @ 34.99 = 69.98");
    assert_eq!(lines[1], "Subtotal: 69.98");
    assert_eq!(lines[2], "GST: 3.50");
    assert_eq!(lines[3], "PST: 6.98");
    assert_eq!(lines[4], "Discount: -2.00");
    assert_eq!(lines[5], format!("Total: {:.2}", invoice.total));
}
