/// API route modules
pub mod accounts;
pub mod debug;
pub mod health;
