pub mod compress;
pub mod config;
pub mod scan;
pub mod types;
