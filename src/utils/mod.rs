pub mod auth;
pub mod extract;
pub mod jwt;
pub mod password;
pub mod secret;
pub mod validate;
