pub mod api;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;

pub mod simulation;
