pub mod activity;
pub mod admin;
pub mod auth;
pub mod event;
pub mod jwt;
pub mod member;
pub mod oauth;
pub mod photo;
pub mod provider_api;
pub mod storage;
