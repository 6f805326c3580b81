pub mod types;
pub mod filter;
pub mod filter_where;
pub mod filter_order;
pub mod pagination;
pub mod error;

pub use types::*;
pub use error::FilterError;
pub use filter::Filter;
pub use pagination::{PageQuery, Pagination};
