//! Core library for the quilld multi-tenant publishing daemon.
//!
//! This crate exposes the tenant data layer, the category-tree resolution
//! core, hostname routing, path enumeration, and the HTTP surface used by
//! the server binary. Only one database backend (either `sqlite` or
//! `postgres`) should be enabled at a time.
cfg_if::cfg_if! {
    if #[cfg(all(feature = "sqlite", feature = "postgres", not(feature = "lint")))] {
        compile_error!("Choose either sqlite or postgres, not both");
    } else if #[cfg(feature = "sqlite")] {
        pub use diesel::sqlite::Sqlite as DbBackend;
    } else if #[cfg(feature = "postgres")] {
        pub use diesel::pg::Pg as DbBackend;
    } else {
        compile_error!("Either the 'sqlite' or 'postgres' feature must be enabled");
    }
}

pub mod config;
pub mod content;
pub mod db;
pub mod host;
pub mod http;
pub mod models;
pub mod revalidate;
pub mod schema;
pub mod server;
