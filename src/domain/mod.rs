mod account;
mod transaction;

pub use account::*;
pub use transaction::*;
