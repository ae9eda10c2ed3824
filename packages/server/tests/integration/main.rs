mod auth;
mod common;
mod content;
mod notification;
mod product;
mod quote;
mod upload;
