//! Page components for the web interface

pub mod calls;
pub mod not_found;
