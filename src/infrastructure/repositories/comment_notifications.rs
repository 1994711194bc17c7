// src/infrastructure/repositories/comment_notifications.rs
use crate::application::ports::comment_feed::{ChangeFeedError, CommentChange, CommentChangeFeed};
use crate::domain::article::ArticleId;
use async_trait::async_trait;
use sqlx::postgres::{PgListener, PgPool};

/// Channel the `comments_notify_insert` trigger publishes to. The payload is
/// the article id as text; Postgres delivers it on commit.
const COMMENT_CHANNEL: &str = "comment_inserted";

/// `LISTEN`s for comment inserts made through any connection to the database.
pub struct PgCommentChangeFeed {
    listener: PgListener,
}

impl PgCommentChangeFeed {
    pub async fn connect(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let mut listener = PgListener::connect_with(pool).await?;
        listener.listen(COMMENT_CHANNEL).await?;
        Ok(Self { listener })
    }
}

#[async_trait]
impl CommentChangeFeed for PgCommentChangeFeed {
    async fn next_change(&mut self) -> Result<Option<CommentChange>, ChangeFeedError> {
        loop {
            // `None` means the connection dropped; the listener reconnects on
            // the next call but anything sent meanwhile is gone.
            let Some(notification) = self
                .listener
                .try_recv()
                .await
                .map_err(|err| ChangeFeedError::Backend(err.to_string()))?
            else {
                return Ok(Some(CommentChange::Lost));
            };

            match parse_article_id(notification.payload()) {
                Some(article_id) => return Ok(Some(CommentChange::Article(article_id))),
                None => tracing::warn!(
                    payload = notification.payload(),
                    "ignoring malformed comment notification"
                ),
            }
        }
    }
}

fn parse_article_id(payload: &str) -> Option<ArticleId> {
    payload
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| ArticleId::new(id).ok())
}
