pub mod config;
pub mod draft;
pub mod init;
pub mod shell;
