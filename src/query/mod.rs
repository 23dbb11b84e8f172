pub mod ast;
pub mod parser;
pub mod request;

pub use ast::{FilterClause, FilterOp, FilterSet};
pub use parser::{parse_clause, translate, FilterError};
pub use request::QueryRequest;
