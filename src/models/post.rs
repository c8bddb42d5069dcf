use serde::{Deserialize, Serialize};

/// Body of `POST api/posts`. `id` is set when editing an existing post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub id: Option<String>,
    pub tag: String,
}

impl PostRequest {
    pub fn new(title: impl Into<String>, tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            id: None,
            tag: tag.into(),
        }
    }
}

/// A full post, as returned by `GET api/posts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tag: String,
    pub created_at: i64,
    pub author_name: String,
    pub like_count: i64,
    pub view_count: i64,
}

/// A post as listed by the feed endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tag: String,
    pub created_at: i64,
    pub like_count: i64,
    pub view_count: i64,
    pub comment_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLike {
    pub username: String,
    pub post_id: String,
    pub liked_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub comment: String,
    pub created_at: i64,
    pub username: String,
    pub post_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_request_serializes_null_id() {
        let value = serde_json::to_value(PostRequest::new("Hello", "rust", "body")).unwrap();
        assert_eq!(
            value,
            json!({ "title": "Hello", "content": "body", "id": null, "tag": "rust" })
        );
    }

    #[test]
    fn test_post_summary_deserialize() {
        let summary: PostSummary = serde_json::from_value(json!({
            "id": "p1",
            "title": "Hello",
            "content": "body",
            "tag": "rust",
            "createdAt": 1700000000000i64,
            "likeCount": 3,
            "viewCount": 10,
            "commentCount": 1
        }))
        .unwrap();

        assert_eq!(summary.id, "p1");
        assert_eq!(summary.comment_count, 1);
    }

    #[test]
    fn test_comment_deserialize() {
        let comment: Comment = serde_json::from_value(json!({
            "comment": "nice",
            "createdAt": 1,
            "id": "c1",
            "username": "bob",
            "postId": "p1"
        }))
        .unwrap();

        assert_eq!(comment.post_id, "p1");
        assert_eq!(comment.comment, "nice");
    }
}
