pub mod asset;
pub mod dashboard;
pub mod decimal;
pub mod evaluation;
pub mod marketplace;
pub mod user;

pub use asset::*;
pub use dashboard::*;
pub use evaluation::*;
pub use marketplace::*;
pub use user::*;
