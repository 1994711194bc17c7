mod list;

pub use list::{CommentQueryService, ListCommentsQuery};
