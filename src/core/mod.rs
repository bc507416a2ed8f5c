pub mod ledger;
pub mod session;
pub mod share;
pub mod status;

pub use crate::domain::model::Movie;
pub use crate::domain::ports::{ConfigProvider, MovieSource, Storage};
pub use crate::utils::error::Result;
