//! # astroline
//!
//! A deterministic daily-horoscope engine. Messages are generated from a
//! versioned template catalog, seeded by `(date, sign, style)` so the same
//! inputs always produce the same text, and reconciled across three places:
//! a remote document store, a shared local cache file, and a read-only
//! widget process that never touches the network.

pub mod app;
pub mod config;
pub mod dates;
pub mod error;
pub mod generator;
pub mod models;
pub mod repository;
pub mod seeder;
pub mod services;
pub mod storage;
pub mod store;
pub mod sync;
pub mod widget;

pub use error::{AppError, Result};
