use expense_tracker_rs::{MemoryStore, NotificationLevel, Tracker, TransactionFilter};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        args[1].as_str()
    } else {
        println!("Using example statement from demos/sample_statement.csv\n");
        "demos/sample_statement.csv"
    };

    let mut store = MemoryStore::new();
    let mut tracker = Tracker::new(&mut store);

    let note = tracker.load_statement_file(file_path);
    println!("[{:?}] {}\n", note.level, note.message);
    if note.level != NotificationLevel::Info {
        return Ok(());
    }

    let preview = tracker.preview();
    for tx in preview.rows {
        println!(
            "  {}  {:<30} {:<20} {:>10}",
            tx.date,
            tx.description,
            tx.category,
            tx.display_amount()
        );
    }
    if preview.remaining > 0 {
        println!("  + {} more transactions...", preview.remaining);
    }
    println!();

    let note = tracker.confirm_import();
    println!("[{:?}] {}\n", note.level, note.message);

    for tx in tracker.transactions(&TransactionFilter::new())? {
        println!(
            "#{:<3} {}  {:<30} {:>10}",
            tx.id.unwrap_or_default(),
            tx.date,
            tx.description,
            tx.display_amount()
        );
    }

    Ok(())
}
