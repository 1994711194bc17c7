// src/application/comments/hub.rs
use super::{CommentFeed, CommentSubscription};
use crate::{
    application::{
        dto::CommentDto,
        error::ApplicationResult,
        ports::comment_feed::{CommentChange, CommentChangeFeed},
    },
    domain::{
        article::ArticleId,
        comment::{CommentRepository, order_comments},
    },
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{sync::watch, task::JoinHandle};

type FeedSender = Arc<watch::Sender<CommentFeed>>;

const FEED_RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct CommentHub {
    comments: Arc<dyn CommentRepository>,
    channels: Mutex<HashMap<ArticleId, FeedSender>>,
}

impl CommentHub {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self {
            comments,
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Start observing `article_id`. The returned subscription is live: the
    /// initial snapshot has been loaded before this resolves.
    pub async fn subscribe(&self, article_id: ArticleId) -> ApplicationResult<CommentSubscription> {
        let (receiver, loaded) = {
            let mut channels = self.channels();
            let sender = channels
                .entry(article_id)
                .or_insert_with(|| Arc::new(watch::channel(CommentFeed::Loading).0));
            let receiver = sender.subscribe();
            let loaded = matches!(*receiver.borrow(), CommentFeed::Live(_));
            (receiver, loaded)
        };

        if !loaded {
            self.refresh(article_id).await?;
        }

        tracing::debug!(%article_id, "comment subscription opened");
        Ok(CommentSubscription::new(article_id, receiver))
    }

    /// Push the latest list to every subscriber of `article_id`. Called after
    /// a comment commit; a no-op when nobody is watching.
    pub async fn publish(&self, article_id: ArticleId) -> ApplicationResult<()> {
        if !self.has_subscribers(article_id) {
            return Ok(());
        }
        self.refresh(article_id).await
    }

    /// Ordered comments for `article_id`, read straight from the store.
    pub async fn snapshot(&self, article_id: ArticleId) -> ApplicationResult<Vec<CommentDto>> {
        let mut comments = self.comments.list_by_article(article_id).await?;
        order_comments(&mut comments);
        Ok(comments.into_iter().map(CommentDto::from).collect())
    }

    /// Relay `feed` into local subscribers until it closes. This is how
    /// comments committed by other processes reach this process's feeds.
    pub async fn follow(&self, mut feed: Box<dyn CommentChangeFeed>) {
        loop {
            match feed.next_change().await {
                Ok(Some(CommentChange::Article(article_id))) => {
                    if let Err(err) = self.publish(article_id).await {
                        tracing::warn!(error = %err, %article_id, "comment feed refresh failed");
                    }
                }
                Ok(Some(CommentChange::Lost)) => {
                    tracing::info!("comment change feed reconnected; resyncing watched articles");
                    self.refresh_watched().await;
                }
                Ok(None) => {
                    tracing::info!("comment change feed closed");
                    return;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "comment change feed interrupted");
                    tokio::time::sleep(FEED_RETRY_DELAY).await;
                    self.refresh_watched().await;
                }
            }
        }
    }

    pub fn spawn_follower(self: &Arc<Self>, feed: Box<dyn CommentChangeFeed>) -> JoinHandle<()> {
        let hub = Arc::clone(self);
        tokio::spawn(async move { hub.follow(feed).await })
    }

    pub fn subscriber_count(&self, article_id: ArticleId) -> usize {
        self.channels()
            .get(&article_id)
            .map_or(0, |sender| sender.receiver_count())
    }

    async fn refresh(&self, article_id: ArticleId) -> ApplicationResult<()> {
        let snapshot = self.snapshot(article_id).await?;
        let Some(sender) = self.channels().get(&article_id).cloned() else {
            return Ok(());
        };

        let count = snapshot.len();
        if sender.send_if_modified(|feed| feed.advance(snapshot)) {
            tracing::debug!(%article_id, count, "comment feed updated");
        }
        Ok(())
    }

    async fn refresh_watched(&self) {
        let watched: Vec<ArticleId> = {
            let mut channels = self.channels();
            channels.retain(|_, sender| sender.receiver_count() > 0);
            channels.keys().copied().collect()
        };
        for article_id in watched {
            if let Err(err) = self.refresh(article_id).await {
                tracing::warn!(error = %err, %article_id, "comment feed resync failed");
            }
        }
    }

    fn has_subscribers(&self, article_id: ArticleId) -> bool {
        let mut channels = self.channels();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        channels.contains_key(&article_id)
    }

    fn channels(&self) -> MutexGuard<'_, HashMap<ArticleId, FeedSender>> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
