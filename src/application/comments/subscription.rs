// src/application/comments/subscription.rs
use crate::{application::dto::CommentDto, domain::article::ArticleId};
use futures::{Stream, stream};
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Loading,
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentFeed {
    /// No snapshot has been loaded yet.
    Loading,
    /// Ordered oldest first, ties broken by id.
    Live(Vec<CommentDto>),
}

impl CommentFeed {
    pub const fn state(&self) -> SubscriptionState {
        match self {
            Self::Loading => SubscriptionState::Loading,
            Self::Live(_) => SubscriptionState::Live,
        }
    }

    pub fn items(&self) -> &[CommentDto] {
        match self {
            Self::Loading => &[],
            Self::Live(items) => items,
        }
    }

    pub fn count(&self) -> usize {
        self.items().len()
    }

    /// Replace the feed with `snapshot` if it is newer. Comments are
    /// append-only, so a snapshot is newer exactly when it is longer.
    pub(super) fn advance(&mut self, snapshot: Vec<CommentDto>) -> bool {
        match self {
            Self::Loading => {
                *self = Self::Live(snapshot);
                true
            }
            Self::Live(current) if snapshot.len() > current.len() => {
                *current = snapshot;
                true
            }
            Self::Live(_) => false,
        }
    }
}

/// One observer's view of an article's comments.
#[derive(Debug)]
pub struct CommentSubscription {
    article_id: ArticleId,
    receiver: watch::Receiver<CommentFeed>,
}

impl CommentSubscription {
    pub(super) const fn new(article_id: ArticleId, receiver: watch::Receiver<CommentFeed>) -> Self {
        Self {
            article_id,
            receiver,
        }
    }

    pub const fn article_id(&self) -> ArticleId {
        self.article_id
    }

    pub fn state(&self) -> SubscriptionState {
        self.receiver.borrow().state()
    }

    pub fn current(&self) -> CommentFeed {
        self.receiver.borrow().clone()
    }

    /// Wait for the next update. `None` once the hub has shut down.
    pub async fn changed(&mut self) -> Option<CommentFeed> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Current feed first, then one item per update.
    pub fn into_stream(self) -> impl Stream<Item = CommentFeed> + Send + 'static {
        stream::unfold((self.receiver, true), |(mut receiver, first)| async move {
            if !first {
                receiver.changed().await.ok()?;
            }
            let feed = receiver.borrow_and_update().clone();
            Some((feed, (receiver, false)))
        })
    }
}
