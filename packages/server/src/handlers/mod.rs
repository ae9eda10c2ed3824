pub mod auth;
pub mod content;
pub mod files;
pub mod health;
pub mod industry;
pub mod notification;
pub mod product;
pub mod quote;
pub mod upload;
