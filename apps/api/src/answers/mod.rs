pub mod handlers;
pub mod ownership;
pub mod store;
