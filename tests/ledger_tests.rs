use chrono::NaiveDate;
use ledger::ledger::{
    build, enrich, filter_and_sort, in_range, ClientAccount, ClientRecord, DateRange, Medium,
    NumberLike, Payment, RateResolver, RateTable, SaleEntry,
};
use ledger::LedgerError;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn entry(d: &str, size: &str, quantity: impl Into<NumberLike>) -> SaleEntry {
    SaleEntry {
        date: date(d),
        size: size.to_string(),
        quantity: quantity.into(),
    }
}

fn payment(d: &str, amount: f64, comment: &str) -> Payment {
    Payment {
        date: date(d),
        amount: NumberLike::Number(amount),
        medium: Some(Medium::Cash),
        transfer_method: None,
        comment: Some(comment.to_string()),
    }
}

fn account(entries: Vec<SaleEntry>, payments: Vec<Payment>) -> ClientAccount {
    ClientAccount {
        name: "Sharma".to_string(),
        entries,
        payments,
        balance: 4200.0,
    }
}

fn rates() -> RateTable {
    RateTable::new()
        .with_rate("sharma", "4in", 100.0)
        .with_rate("sharma", "6in", 150.0)
}

#[test]
fn test_enrich_multiplies_quantity_by_rate() {
    let enriched = enrich(&entry("2024-01-05", "4in", 3.0), &rates(), "Sharma");
    assert_eq!(enriched.rate, 100.0);
    assert_eq!(enriched.amount, 300.0);
}

#[test]
fn test_enrich_without_rate_is_zero() {
    let enriched = enrich(&entry("2024-01-05", "4in", 3.0), &RateTable::new(), "Sharma");
    assert_eq!(enriched.rate, 0.0);
    assert_eq!(enriched.amount, 0.0);

    let unknown_size = enrich(&entry("2024-01-05", "12in", 3.0), &rates(), "Sharma");
    assert_eq!(unknown_size.amount, 0.0);
}

#[test]
fn test_enrich_coerces_quantity_strings() {
    let table = rates();
    assert_eq!(enrich(&entry("2024-01-05", "6in", "2"), &table, "Sharma").amount, 300.0);
    assert_eq!(enrich(&entry("2024-01-05", "6in", "two"), &table, "Sharma").amount, 0.0);
    assert_eq!(
        enrich(&entry("2024-01-05", "6in", NumberLike::Missing), &table, "Sharma").amount,
        0.0
    );
}

#[test]
fn test_enrich_accepts_any_resolver() {
    struct Flat;
    impl RateResolver for Flat {
        fn rate(&self, _client_name: &str, _size: &str) -> f64 {
            7.5
        }
    }

    let enriched = enrich(&entry("2024-01-05", "anything", 2.0), &Flat, "Sharma");
    assert_eq!(enriched.amount, 15.0);
}

#[test]
fn test_in_range_bounds_are_inclusive() {
    let range = DateRange::new(Some(date("2024-02-01")), Some(date("2024-02-28")));
    assert!(in_range(date("2024-02-01"), &range));
    assert!(in_range(date("2024-02-28"), &range));
    assert!(!in_range(date("2024-01-31"), &range));
    assert!(!in_range(date("2024-02-29"), &range));

    let open_start = DateRange::new(None, Some(date("2024-02-28")));
    assert!(in_range(date("1999-01-01"), &open_start));

    let open_end = DateRange::new(Some(date("2024-02-01")), None);
    assert!(in_range(date("2099-01-01"), &open_end));
}

#[test]
fn test_filter_keeps_only_window() {
    let entries = vec![
        entry("2024-01-15", "4in", 1.0),
        entry("2024-02-10", "4in", 2.0),
        entry("2024-03-01", "4in", 3.0),
    ];
    let range = DateRange::new(Some(date("2024-02-01")), Some(date("2024-02-28")));

    let kept = filter_and_sort(entries, &range);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].date, date("2024-02-10"));
}

#[test]
fn test_unbounded_filter_sorts_newest_first() {
    let entries = vec![
        entry("2024-01-15", "4in", 1.0),
        entry("2024-03-01", "4in", 2.0),
        entry("2024-02-10", "4in", 3.0),
    ];

    let sorted = filter_and_sort(entries, &DateRange::unbounded());
    let dates: Vec<NaiveDate> = sorted.iter().map(|e| e.date).collect();
    assert_eq!(
        dates,
        vec![date("2024-03-01"), date("2024-02-10"), date("2024-01-15")]
    );
}

#[test]
fn test_same_day_records_keep_input_order() {
    let entries = vec![
        entry("2024-02-10", "4in", 1.0),
        entry("2024-01-01", "4in", 2.0),
        entry("2024-02-10", "6in", 3.0),
        entry("2024-02-10", "8in", 4.0),
    ];

    let sorted = filter_and_sort(entries, &DateRange::unbounded());
    let sizes: Vec<&str> = sorted.iter().map(|e| e.size.as_str()).collect();
    assert_eq!(sizes, vec!["4in", "6in", "8in", "4in"]);
}

#[test]
fn test_build_totals_cover_filtered_set() {
    let acct = account(
        vec![
            entry("2024-01-15", "4in", 1.0),
            entry("2024-02-10", "4in", 2.0),
            entry("2024-02-20", "6in", "3"),
            entry("2024-03-01", "6in", 10.0),
        ],
        vec![
            payment("2024-01-20", 50.0, "jan"),
            payment("2024-02-05", 100.0, "feb"),
            payment("2024-02-25", 25.5, "late feb"),
        ],
    );
    let range = DateRange::new(Some(date("2024-02-01")), Some(date("2024-02-28")));

    let view = build(&acct, &rates(), &range);
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.total_sales, 200.0 + 450.0);
    assert_eq!(view.payments.len(), 2);
    assert_eq!(view.total_payments, 125.5);
    assert_eq!(view.payments[0].comment.as_deref(), Some("late feb"));
}

#[test]
fn test_balance_does_not_depend_on_range() {
    let acct = account(
        vec![entry("2024-01-15", "4in", 1.0)],
        vec![payment("2024-01-20", 50.0, "jan")],
    );

    for range in [
        DateRange::unbounded(),
        DateRange::new(Some(date("2030-01-01")), None),
        DateRange::new(Some(date("2024-01-01")), Some(date("2024-01-31"))),
    ] {
        assert_eq!(build(&acct, &rates(), &range).balance, 4200.0);
    }
}

#[test]
fn test_payment_amount_strings_are_coerced() {
    let mut bad = payment("2024-02-05", 0.0, "typo");
    bad.amount = NumberLike::from("12abc");
    let mut good = payment("2024-02-06", 0.0, "text");
    good.amount = NumberLike::from("40");

    let view = build(&account(vec![], vec![bad, good]), &rates(), &DateRange::unbounded());
    assert_eq!(view.total_payments, 40.0);
}

#[test]
fn test_date_range_parse() {
    let range = DateRange::parse(Some("2024-02-01"), None).unwrap();
    assert_eq!(range.from, Some(date("2024-02-01")));
    assert_eq!(range.to, None);

    assert!(matches!(
        DateRange::parse(Some("02/01/2024"), None),
        Err(LedgerError::InvalidDate(_))
    ));
    assert!(matches!(
        DateRange::parse(Some("2024-03-01"), Some("2024-02-01")),
        Err(LedgerError::InvalidRange { .. })
    ));
}

#[test]
fn test_client_record_from_backend_json() {
    let record = ClientRecord::from_json(
        r#"{
            "_id": "665f",
            "category": "submersible",
            "name": "Sharma",
            "calculatedBalance": "1500",
            "entries": [{"date": "2024-01-05T00:00:00.000Z", "size": "4in", "quantity": 3}],
            "payments": [{"date": "2024-01-06", "amount": 200, "medium": "Transfer", "transferMethod": "UPI"}]
        }"#,
    )
    .unwrap();

    assert_eq!(record.category(), "submersible");
    let acct = record.into_ledger_account().unwrap();
    assert_eq!(acct.balance, 1500.0);
    assert_eq!(acct.entries[0].date, date("2024-01-05"));

    let view = build(&acct, &rates(), &DateRange::unbounded());
    assert_eq!(view.total_sales, 300.0);
}

#[test]
fn test_fan_client_has_no_ledger() {
    let record = ClientRecord::from_json(
        r#"{"category": "fan", "name": "Breeze", "balance": 10,
            "sales": [{"date": "2024-01-05", "model": "F1", "quantity": 2}],
            "inventory": [{"model": "F1", "stock": 8}]}"#,
    )
    .unwrap();

    assert_eq!(record.category(), "fan");
    assert_eq!(record.balance(), 10.0);
    assert!(matches!(
        record.into_ledger_account(),
        Err(LedgerError::UnsupportedCategory { .. })
    ));
}

#[test]
fn test_unknown_category_is_rejected() {
    let result = ClientRecord::from_json(r#"{"category": "motor", "name": "X"}"#);
    assert!(matches!(
        result,
        Err(LedgerError::UnsupportedCategory { ref category, .. }) if category == "motor"
    ));
}

#[test]
fn test_invalid_entry_date_is_rejected() {
    let result = ClientRecord::from_json(
        r#"{"category": "submersible", "name": "X", "entries": [{"date": "yesterday", "size": "4in", "quantity": 1}]}"#,
    );
    assert!(matches!(result, Err(LedgerError::InvalidRecord(_))));
}

#[test]
fn test_calculated_balance_wins_over_plain_balance() {
    let record = ClientRecord::from_json(
        r#"{"category": "submersible", "name": "Sharma", "balance": 1000,
            "calculatedBalance": 1500, "entries": [], "payments": []}"#,
    )
    .unwrap();
    assert_eq!(record.balance(), 1500.0);

    let only_balance = ClientRecord::from_json(
        r#"{"category": "submersible", "name": "Sharma", "balance": "1000"}"#,
    )
    .unwrap();
    assert_eq!(only_balance.balance(), 1000.0);

    let neither = ClientRecord::from_json(r#"{"category": "submersible", "name": "Sharma"}"#)
        .unwrap();
    assert_eq!(neither.balance(), 0.0);
}
