pub mod constants;
pub mod math;
pub mod oracle;
pub mod interest;
pub mod health;
pub mod portfolio;
pub mod liquidation;
pub mod token;
pub mod guard;

pub use constants::*;
pub use oracle::*;
pub use interest::*;
pub use health::*;
pub use portfolio::*;
pub use liquidation::*;
pub use token::*;
pub use guard::*;
