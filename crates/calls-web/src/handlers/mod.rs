//! HTTP handlers of the web server

pub mod api;
