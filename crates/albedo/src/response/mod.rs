//! Response construction helpers.

mod builder;

pub use builder::ResponseBuilder;
