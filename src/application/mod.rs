pub mod commands;
pub mod comments;
pub mod dto;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod queries;
pub mod services;
pub mod validation;

pub use error::ApplicationResult;
