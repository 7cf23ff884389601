//! smak-core - Core library for Smak
//!
//! This crate contains the shared models, remote data gateway, auth state
//! provider, draft persistence, and view controllers used by all Smak
//! interfaces.

pub mod auth;
pub mod config;
pub mod controllers;
pub mod drafts;
pub mod error;
pub mod format;
pub mod gateway;
pub mod models;
pub mod util;

pub use error::{Error, Result};
pub use models::{Recipe, RecipeId};
