//! CLI 명령어 구현

pub mod admin;
pub mod auth;
pub mod config;
pub mod images;
pub mod navigate;
pub mod winners;
