// tests/support/mocks/feed.rs
use async_trait::async_trait;
use quill_core::application::ports::comment_feed::{
    ChangeFeedError, CommentChange, CommentChangeFeed,
};
use tokio::sync::mpsc;

/// Change feed backed by a channel; closes when every sender is dropped.
pub struct ChannelChangeFeed {
    receiver: mpsc::UnboundedReceiver<CommentChange>,
}

impl ChannelChangeFeed {
    pub fn new() -> (mpsc::UnboundedSender<CommentChange>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { receiver })
    }
}

#[async_trait]
impl CommentChangeFeed for ChannelChangeFeed {
    async fn next_change(&mut self) -> Result<Option<CommentChange>, ChangeFeedError> {
        Ok(self.receiver.recv().await)
    }
}
