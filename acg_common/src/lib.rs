mod money;
mod secret;

pub mod helpers;

pub use money::{CommissionRate, Money, MoneyConversionError, RateConversionError};
pub use secret::Secret;
