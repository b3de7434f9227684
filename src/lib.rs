pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod preview;
pub mod registry;
pub mod stats;
