//! Plain-text rendering of service objects for the terminal.

use crate::auth::UserInfo;
use crate::models::{millis_to_utc, ActivityLogEntry, Comment, Post, PostLike, PostSummary};

fn timestamp(millis: i64) -> String {
    millis_to_utc(millis)
        .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

pub fn user(user: &UserInfo) -> String {
    format!("{} <{}> (id {})", user.username, user.email, user.id)
}

pub fn post_summary(post: &PostSummary) -> String {
    format!(
        "[{}] {} #{}  ({} likes, {} views, {} comments, {})",
        post.id,
        post.title,
        post.tag,
        post.like_count,
        post.view_count,
        post.comment_count,
        timestamp(post.created_at)
    )
}

pub fn post(post: &Post) -> String {
    format!(
        "{}\nby {} on {}  #{}\n\n{}\n\n{} likes, {} views",
        post.title,
        post.author_name,
        timestamp(post.created_at),
        post.tag,
        post.content,
        post.like_count,
        post.view_count
    )
}

pub fn comment(comment: &Comment) -> String {
    format!(
        "[{}] {} ({}): {}",
        comment.id,
        comment.username,
        timestamp(comment.created_at),
        comment.comment
    )
}

pub fn like(like: &PostLike) -> String {
    format!("{} ({})", like.username, timestamp(like.liked_at))
}

pub fn activity(entry: &ActivityLogEntry) -> String {
    match &entry.details {
        Some(details) => format!(
            "{}  {:<6} {}",
            timestamp(entry.created_at),
            entry.action,
            details
        ),
        None => format!("{}  {}", timestamp(entry.created_at), entry.action),
    }
}
