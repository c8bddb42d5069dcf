//! Post, like and comment endpoints.

use urlencoding::encode;

use super::client::AuthenticatedClient;
use crate::error::SocialResult;
use crate::models::{Comment, CommentRequest, Post, PostLike, PostRequest, PostSummary};
use crate::traits::Request;

/// Post operations. Obtain through [`AuthenticatedClient::posts`].
#[derive(Debug, Clone, Copy)]
pub struct PostsApi<'a> {
    client: &'a AuthenticatedClient,
}

impl<'a> PostsApi<'a> {
    pub(crate) fn new(client: &'a AuthenticatedClient) -> Self {
        Self { client }
    }

    /// POST api/posts
    pub async fn create_post(&self, request: &PostRequest) -> SocialResult<Post> {
        self.client
            .post_json("posts.create", "api/posts", request)
            .await
    }

    /// GET api/posts
    pub async fn all_posts(&self) -> SocialResult<Vec<PostSummary>> {
        self.client.get_json("posts.list", "api/posts").await
    }

    /// GET api/posts/{id}
    pub async fn post(&self, post_id: &str) -> SocialResult<Post> {
        self.client
            .get_json("posts.get", &format!("api/posts/{}", encode(post_id)))
            .await
    }

    /// GET api/posts/tag/{tag}
    pub async fn posts_by_tag(&self, tag: &str) -> SocialResult<Vec<PostSummary>> {
        self.client
            .get_json("posts.by_tag", &format!("api/posts/tag/{}", encode(tag)))
            .await
    }

    /// GET api/posts/myPosts
    pub async fn my_posts(&self) -> SocialResult<Vec<PostSummary>> {
        self.client.get_json("posts.mine", "api/posts/myPosts").await
    }

    /// POST api/posts/{id}/like
    pub async fn like(&self, post_id: &str) -> SocialResult<String> {
        let url = self.client.url(&format!("api/posts/{}/like", encode(post_id)));
        self.client.send_text("posts.like", Request::post(url)).await
    }

    /// DELETE api/posts/{id}/unlike
    pub async fn unlike(&self, post_id: &str) -> SocialResult<String> {
        let url = self.client.url(&format!("api/posts/{}/unlike", encode(post_id)));
        self.client.send_text("posts.unlike", Request::delete(url)).await
    }

    /// GET api/posts/{id}/likes
    pub async fn likes(&self, post_id: &str) -> SocialResult<Vec<PostLike>> {
        self.client
            .get_json("posts.likes", &format!("api/posts/{}/likes", encode(post_id)))
            .await
    }

    /// GET api/posts/{id}/comments
    pub async fn comments(&self, post_id: &str) -> SocialResult<Vec<Comment>> {
        self.client
            .get_json(
                "posts.comments",
                &format!("api/posts/{}/comments", encode(post_id)),
            )
            .await
    }

    /// POST api/posts/{id}/comment
    pub async fn create_comment(
        &self,
        post_id: &str,
        request: &CommentRequest,
    ) -> SocialResult<Comment> {
        self.client
            .post_json(
                "posts.comment",
                &format!("api/posts/{}/comment", encode(post_id)),
                request,
            )
            .await
    }

    /// DELETE api/posts/{id}/comment/{comment_id}
    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> SocialResult<String> {
        let url = self.client.url(&format!(
            "api/posts/{}/comment/{}",
            encode(post_id),
            encode(comment_id)
        ));
        self.client
            .send_text("posts.delete_comment", Request::delete(url))
            .await
    }
}
