//! HTTP request handlers.
//!
//! The JSON API (`/api/...`) authenticates with the API key and a JWT, while the account,
//! OAuth and admin pages rely on the session cookie.

pub mod account;
pub mod activity;
pub mod admin;
pub mod api_auth;
pub mod event;
pub mod extract;
pub mod member;
pub mod oauth;
pub mod photo;
pub mod provider;

#[cfg(test)]
mod test;
