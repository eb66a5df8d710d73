pub mod core;
pub mod models;

pub use self::core::Cart;
pub use self::models::{CartEvent, CartKey, CartLine, WeightTier};
