pub mod config;
pub mod page;
pub mod product;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use page::PageMotion;
pub use product::{Product, ProductId, Rating};
