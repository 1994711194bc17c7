use std::sync::Arc;

use crate::{
    application::{comments::CommentHub, dto::CommentListDto, error::ApplicationResult},
    domain::article::ArticleId,
};

pub struct ListCommentsQuery {
    pub article_id: i64,
}

pub struct CommentQueryService {
    hub: Arc<CommentHub>,
}

impl CommentQueryService {
    pub fn new(hub: Arc<CommentHub>) -> Self {
        Self { hub }
    }

    pub async fn list_comments(&self, query: ListCommentsQuery) -> ApplicationResult<CommentListDto> {
        let article_id = ArticleId::new(query.article_id)?;
        Ok(self.hub.snapshot(article_id).await?.into())
    }
}
