//! Search API backend implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchBackend`].

pub mod serpapi;

pub use serpapi::SerpApiEngine;
