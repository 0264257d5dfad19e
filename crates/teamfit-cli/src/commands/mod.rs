pub mod config;
pub mod dispatch;
pub mod fitness;
pub mod suggest;
