//! Client-side API gateway for the freight marketplace.
//!
//! All network calls go through [`api::ApiClient`], which injects the bearer
//! token from a [`token::TokenStore`] and returns every outcome, failures
//! included, as an [`api::ApiResult`].

pub mod api;
pub mod config;
pub mod token;
