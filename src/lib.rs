pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod image;
pub mod item;
pub mod logging;
pub mod poll;
pub mod prefs;
pub mod render;
pub mod retail;
pub mod sort;
pub mod status;
pub mod store;
pub mod ui;

pub use error::{Result, WishlistError};
