pub mod api;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod map;
pub mod model;
pub mod notify;
pub mod persist;
pub mod session;
pub mod store;
pub mod ui;
pub mod upload;
pub mod worker;
