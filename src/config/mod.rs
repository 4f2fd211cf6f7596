pub mod params;
pub mod schema;

pub use params::Params;
pub use schema::{
    AccountConfig, BrowserConfig, Config, OnFailure, SelectorConfig, SiteConfig, TimingConfig,
    Viewport,
};
