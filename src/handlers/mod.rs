pub mod auth;
pub mod categories;
pub mod extract;
pub mod products;
pub mod settings;
pub mod users;
pub mod validate;
pub mod wishlists;
