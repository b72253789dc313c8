//! Edge 핸들러

pub mod health;
pub mod redirect;
