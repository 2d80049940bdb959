//! Statement building shared by every repository

pub mod changes;
pub mod filter;
pub mod params;

pub use changes::{ChangeSet, InsertSet};
pub use filter::{escape_like, Filter, FilterBuilder};
pub use params::{BindParam, SqlParam, ToParam};
