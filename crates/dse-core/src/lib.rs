//! Core types and trait definitions for the DSE Survival Kit API.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and API crates depend on it; it depends on nothing proprietary.

pub mod diary;
pub mod error;
pub mod event;
pub mod finance;
pub mod memory;
pub mod note;
pub mod question;
pub mod store;
pub mod task;

pub use error::{Error, Result};

/// Row identity. Assigned by the store on insert, never by the client.
pub type Id = i64;

/// Owner recorded on rows created without an explicit `user_id`.
pub const DEFAULT_USER_ID: Id = 1;
