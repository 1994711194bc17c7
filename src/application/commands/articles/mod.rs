// src/application/commands/articles/mod.rs
mod in_flight;
mod publish;
mod service;

pub use in_flight::{InFlightGuard, InFlightPublications};
pub use publish::{PublicationError, PublishArticleCommand};
pub use service::ArticleCommandService;
