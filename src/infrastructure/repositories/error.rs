use crate::domain::errors::DomainError;

const CNT_COMMENT_ARTICLE: &str = "comments_article_id_fkey";
const CNT_ARTICLE_TITLE: &str = "articles_title_not_blank_chk";
const CNT_ARTICLE_BODY: &str = "articles_body_not_blank_chk";
const CNT_COMMENT_BODY: &str = "comments_body_not_blank_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_COMMENT_ARTICLE => DomainError::NotFound("article not found".into()),
                    CNT_ARTICLE_TITLE => DomainError::Validation("title cannot be empty".into()),
                    CNT_ARTICLE_BODY => DomainError::Validation("body cannot be empty".into()),
                    CNT_COMMENT_BODY => DomainError::Validation("comment cannot be empty".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
