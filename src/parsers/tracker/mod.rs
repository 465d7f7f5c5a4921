//! Re-import of the simplified `date,description,amount,category,type` export.

mod parser;

pub mod prelude {
    pub use super::parser::TrackerCsvParser;
}
