//! HTTP request handlers

pub mod amenities;
pub mod common;
pub mod geocode;
pub mod health;
pub mod route;
pub mod score;
