mod jwt;
mod request;
