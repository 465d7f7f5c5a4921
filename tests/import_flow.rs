use expense_tracker_rs::{
    Category, ImportState, MemoryStore, NotificationLevel, ParserBuilder, Tracker,
    TransactionFilter, TransactionType, parse_statement,
};
use rust_decimal::dec;

const SAMPLE: &str = include_str!("../demos/sample_statement.csv");

#[test]
fn test_sample_statement_parses() {
    let txns = parse_statement(SAMPLE);

    // the truncated last row is dropped
    assert_eq!(txns.len(), 10);
    assert!(txns.iter().all(|t| t.amount >= dec!(0)));
    assert!(txns.iter().all(|t| t.id.is_none()));

    let income: Vec<_> = txns.iter().filter(|t| t.transaction_type == TransactionType::Income).collect();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].amount, dec!(1850.00));
    assert_eq!(income[0].date.as_str(), "2024-03-01");

    let unnamed = txns.iter().find(|t| t.description == "GUAYAQUIL").unwrap();
    assert_eq!(unnamed.category, Category::Other);

    let quoted = txns.iter().find(|t| t.description == "KFC, EL JARDIN").unwrap();
    assert_eq!(quoted.category, Category::Food);
    assert_eq!(quoted.amount, dec!(9.80));
}

#[test]
fn test_full_import_export_cycle() {
    let mut store = MemoryStore::new();
    let mut tracker = Tracker::new(&mut store);

    let note = tracker.load_statement(SAMPLE, Some("marzo.csv"));
    assert_eq!(note.level, NotificationLevel::Info);
    assert_eq!(tracker.preview().remaining, 5);

    let note = tracker.confirm_import();
    assert_eq!(note.level, NotificationLevel::Success);
    assert_eq!(tracker.import_state(), ImportState::Idle);

    let summary = tracker.summary().unwrap();
    assert_eq!(summary.income, dec!(1850.00));
    assert_eq!(summary.expense, dec!(201.41));
    assert_eq!(summary.balance, dec!(1648.59));

    let expenses = tracker
        .transactions(&TransactionFilter::new().transaction_type(TransactionType::Expense))
        .unwrap();
    assert_eq!(expenses.len(), 9);
    assert_eq!(expenses[0].date.as_str(), "2024-03-20");

    let exported = tracker.export_csv().unwrap();
    let reimported = ParserBuilder::new().content(&exported).parse().unwrap();
    let stored = tracker.transactions(&TransactionFilter::new()).unwrap();
    assert_eq!(reimported.len(), stored.len());

    let mut original: Vec<_> = parse_statement(SAMPLE)
        .into_iter()
        .map(|t| (t.date, t.amount, t.transaction_type, t.description, t.category))
        .collect();
    let mut round_trip: Vec<_> = reimported
        .into_iter()
        .map(|t| (t.date, t.amount, t.transaction_type, t.description, t.category))
        .collect();
    original.sort_by(|a, b| a.3.cmp(&b.3));
    round_trip.sort_by(|a, b| a.3.cmp(&b.3));
    assert_eq!(original, round_trip);
}
