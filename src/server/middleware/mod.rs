pub mod api_key;
pub mod auth;
pub mod csrf;
pub mod jwt;
pub mod return_to;
pub mod session;

#[cfg(test)]
mod test;
