//! Fixed-layout bank statement export.

mod dto;
mod parser;
mod types;

pub mod prelude {
    pub use super::dto::StatementRow;
    pub use super::parser::{BankStatementParser, parse_statement, split_fields};
    pub use super::types::StatementLayout;
}
