mod activity;
mod event;
mod photo;
mod user;
mod user_token;
