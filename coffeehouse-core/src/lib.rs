pub mod config;
pub mod drink;
pub mod error;
pub mod house;
pub mod schema;

pub use config::StoreConfig;
pub use drink::{unique_by_price, Drink};
pub use error::{CoffeeError, Result};
pub use house::CoffeeHouse;
