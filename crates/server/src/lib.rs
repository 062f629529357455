//! WasteCare server library.
//!
//! This crate provides the backend functionality as a library, allowing it
//! to be tested and reused by the CLI.
//!
//! # Layout
//!
//! - [`config`] - Environment-driven configuration
//! - [`state`] - Shared application state and capability interfaces
//! - [`middleware`] - Sessions and authentication extractors
//! - [`models`] - Domain types
//! - [`db`] - `PostgreSQL` repositories
//! - [`services`] - Registration/login, chat orchestration, email delivery
//! - [`completions`] - Chat-completion API client
//! - [`google`] - Google OAuth client
//! - [`routes`] - HTTP handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod completions;
pub mod config;
pub mod db;
pub mod error;
pub mod google;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
