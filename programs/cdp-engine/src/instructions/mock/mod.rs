pub mod initialize_price_pool;
pub mod update_price_pool;

pub use initialize_price_pool::*;
pub use update_price_pool::*;
