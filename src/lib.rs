pub mod cache;
pub mod clean;
pub mod geo;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod records;
