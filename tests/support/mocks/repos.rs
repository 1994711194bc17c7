// tests/support/mocks/repos.rs
use super::{events::EventLog, feed::ChannelChangeFeed};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::{
    application::ports::{comment_feed::CommentChange, time::Clock},
    domain::{
        article::{Article, ArticleId, ArticleReadRepository, ArticleWriteRepository, NewArticle},
        comment::{Comment, CommentId, CommentRepository, NewComment},
        errors::{DomainError, DomainResult},
    },
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use tokio::sync::{Notify, mpsc};

/// Holds one `list()` call after it has read its rows.
#[derive(Default)]
pub struct ListGate {
    reached: Notify,
    resume: Notify,
}

impl ListGate {
    /// Resolves once the paused `list()` has taken its snapshot.
    pub async fn reached(&self) {
        self.reached.notified().await;
    }

    pub fn resume(&self) {
        self.resume.notify_one();
    }
}

pub struct InMemoryArticleStore {
    rows: Mutex<Vec<Article>>,
    clock: Arc<dyn Clock>,
    list_gate: Mutex<Option<Arc<ListGate>>>,
    pub fail_inserts: AtomicBool,
    pub list_calls: AtomicUsize,
    events: EventLog,
}

impl InMemoryArticleStore {
    pub fn new(clock: Arc<dyn Clock>, events: EventLog) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            clock,
            list_gate: Mutex::new(None),
            fail_inserts: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
            events,
        }
    }

    /// Store-assigned id and creation time, like `BIGSERIAL` and `DEFAULT now()`.
    pub fn seed(&self, article: NewArticle) -> Article {
        let mut rows = self.rows.lock().unwrap();
        let id = ArticleId(rows.len() as i64 + 1);
        let article = article.into_article(id, self.clock.now());
        rows.push(article.clone());
        article
    }

    pub fn all(&self) -> Vec<Article> {
        self.rows.lock().unwrap().clone()
    }

    pub fn exists(&self, id: ArticleId) -> bool {
        self.rows.lock().unwrap().iter().any(|a| a.id == id)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// The next `list()` snapshots its rows, then waits for `resume`.
    pub fn pause_next_list(&self) -> Arc<ListGate> {
        let gate = Arc::new(ListGate::default());
        *self.list_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryArticleStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("connection reset"));
        }
        self.events.push("insert");
        Ok(self.seed(article))
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryArticleStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        Ok(self.rows.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Article>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.all();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let gate = self.list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.reached.notify_one();
            gate.resume.notified().await;
        }
        Ok(rows)
    }
}

pub struct InMemoryCommentStore {
    articles: Arc<InMemoryArticleStore>,
    rows: Mutex<Vec<Comment>>,
    clock: Arc<dyn Clock>,
    changes: Mutex<Option<mpsc::UnboundedSender<CommentChange>>>,
    pub fail_inserts: AtomicBool,
    /// Drop change signals, as a listener does while reconnecting.
    pub mute_changes: AtomicBool,
}

impl InMemoryCommentStore {
    pub fn new(articles: Arc<InMemoryArticleStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            articles,
            rows: Mutex::new(Vec::new()),
            clock,
            changes: Mutex::new(None),
            fail_inserts: AtomicBool::new(false),
            mute_changes: AtomicBool::new(false),
        }
    }

    /// Insert with an explicit id and time, bypassing the parent check.
    pub fn seed_with_id(&self, id: i64, comment: NewComment, created_at: DateTime<Utc>) {
        let article_id = comment.article_id;
        self.rows
            .lock()
            .unwrap()
            .push(comment.into_comment(CommentId(id), created_at));
        self.signal(CommentChange::Article(article_id));
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Feed of every insert into this store, whoever made it.
    pub fn change_feed(&self) -> ChannelChangeFeed {
        let (sender, feed) = ChannelChangeFeed::new();
        *self.changes.lock().unwrap() = Some(sender);
        feed
    }

    pub fn signal(&self, change: CommentChange) {
        if self.mute_changes.load(Ordering::SeqCst) {
            return;
        }
        if let Some(sender) = self.changes.lock().unwrap().as_ref() {
            let _ = sender.send(change);
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentStore {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::persistence("connection reset"));
        }
        if !self.articles.exists(comment.article_id) {
            return Err(DomainError::NotFound("article not found".into()));
        }
        let comment = {
            let mut rows = self.rows.lock().unwrap();
            let next = rows.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
            let comment = comment.into_comment(CommentId(next), self.clock.now());
            rows.push(comment.clone());
            comment
        };
        self.signal(CommentChange::Article(comment.article_id));
        Ok(comment)
    }

    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>> {
        // Deliberately unordered: callers must sort.
        let mut rows: Vec<Comment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }
}
