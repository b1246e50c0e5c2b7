pub mod customer;
pub use customer::{BoolLike, Customer, parse_bool_like};
