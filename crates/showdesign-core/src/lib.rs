pub mod config;
pub mod dashboard;
pub mod draft;
pub mod error;
pub mod field;
pub mod generate;
pub mod io;
pub mod paths;
pub mod repository;
pub mod session;
pub mod store;
pub mod types;
pub mod user;
pub mod wizard;

pub use error::{Result, ShowDesignError};
