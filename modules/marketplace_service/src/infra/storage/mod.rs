//! Storage layer - database entities and repositories

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use db::DbHandle;
pub use repositories::build_repositories;
