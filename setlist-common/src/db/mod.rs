//! Database schema and queries

pub mod catalog;
pub mod events;
pub mod init;
pub mod models;
pub mod setlists;
pub mod songs;

pub use init::*;
pub use models::*;
