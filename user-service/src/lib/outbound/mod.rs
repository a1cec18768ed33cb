pub mod cache;
pub mod credentials;
pub mod repositories;
