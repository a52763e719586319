pub mod config;
pub mod controller;
pub mod error;
pub mod gallery;
pub mod geometry;
pub mod markup;
pub mod models;
pub mod pages;
pub mod tooltip;

pub use error::{Result, SiteError};
