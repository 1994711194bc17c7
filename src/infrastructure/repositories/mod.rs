mod comment_notifications;
mod error;
mod postgres_article;
mod postgres_comment;

pub use comment_notifications::PgCommentChangeFeed;
pub use error::map_sqlx;
pub use postgres_article::PostgresArticleRepository;
pub use postgres_comment::PostgresCommentRepository;
