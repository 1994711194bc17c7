pub mod articles;
pub mod auth;
pub mod comments;

pub use articles::{ArticleDto, PublicationReceipt};
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use comments::{CommentDto, CommentListDto};
