use expense_tracker_rs::{MemoryStore, Tracker};
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        args[1].as_str()
    } else {
        "demos/sample_statement.csv"
    };

    let mut store = MemoryStore::new();
    let mut tracker = Tracker::new(&mut store);

    tracker.load_statement_file(file_path);
    let note = tracker.confirm_import();
    println!("[{:?}] {}\n", note.level, note.message);

    let summary = tracker.summary()?;
    println!("Income:  ${:.2}", summary.income);
    println!("Expense: ${:.2}", summary.expense);
    println!(
        "Balance: ${:.2}{}",
        summary.balance,
        if summary.is_negative() { " (negative)" } else { "" }
    );
    println!();

    println!("Expenses by category:");
    for (category, total) in tracker.expenses_by_category()? {
        println!("  {:<20} ${:.2}", category, total);
    }
    println!();

    print!("{}", tracker.export_csv()?);

    Ok(())
}
