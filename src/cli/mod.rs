//! CLI for the SecureSocial service.
//!
//! This module provides:
//! - Argument parsing
//! - Version display
//! - Command execution against an [`AuthenticatedClient`]
//!
//! # Usage
//!
//! ```ignore
//! use securesocial::cli::{parse_args, run_command};
//!
//! let args = parse_args(std::env::args());
//! run_command(args.command, &client, &mut std::io::stdout()).await?;
//! ```

pub mod args;
pub mod format;
pub mod version;

pub use args::{parse_args, CliArgs, CliCommand, PostFilter, USAGE};
pub use version::{version_line, VERSION};

use std::io::Write;

use color_eyre::eyre::eyre;
use color_eyre::{Report, Result, Section};

use crate::api::AuthenticatedClient;
use crate::error::{AuthError, SocialError};
use crate::models::{CommentRequest, LoginRequest, OtpRequest, PostRequest, RegisterRequest};

/// Turn a service error into a report carrying the user-facing message and
/// a recovery hint.
pub fn report(err: SocialError) -> Report {
    let hint = err.recovery_hint();
    let message = err.user_message();
    let code = err.error_code();
    Report::new(err)
        .wrap_err(message)
        .note(format!("error code: {}", code))
        .suggestion(hint)
}

/// Run one command, writing its output to `out`.
///
/// `Version`, `Help` and `Invalid` need no service access and are handled
/// here too, so callers can dispatch everything through this function.
pub async fn run_command<W: Write>(
    command: CliCommand,
    client: &AuthenticatedClient,
    out: &mut W,
) -> Result<()> {
    match command {
        CliCommand::Version => writeln!(out, "{}", version_line())?,
        CliCommand::Help => writeln!(out, "{}", USAGE)?,
        CliCommand::Invalid(reason) => {
            return Err(eyre!("{}", reason).suggestion("Run `securesocial --help` for usage"));
        }

        CliCommand::Login { email, password } => {
            let response = client
                .auth()
                .login(&LoginRequest { email, password })
                .await
                .map_err(report)?;
            writeln!(out, "Logged in as {}", response.username)?;
        }
        CliCommand::Register {
            username,
            email,
            password,
        } => {
            let message = client
                .auth()
                .register(&RegisterRequest {
                    username,
                    email: email.clone(),
                    password,
                })
                .await
                .map_err(report)?;
            print_message(out, &message)?;
            writeln!(
                out,
                "Check {} for a code, then run `securesocial verify {} <otp>`",
                email, email
            )?;
        }
        CliCommand::Verify { email, otp } => {
            let message = client
                .auth()
                .verify_otp(&OtpRequest { email, otp })
                .await
                .map_err(report)?;
            print_message(out, &message)?;
        }
        CliCommand::ResendOtp { email } => {
            let message = client.auth().resend_otp(&email).await.map_err(report)?;
            print_message(out, &message)?;
        }
        CliCommand::CheckUsername { username } => {
            let available = client
                .auth()
                .check_username(&username)
                .await
                .map_err(report)?;
            if available {
                writeln!(out, "{} is available", username)?;
            } else {
                writeln!(out, "{} is taken", username)?;
            }
        }
        CliCommand::Logout => {
            client.auth().logout().await.map_err(report)?;
            writeln!(out, "Logged out")?;
        }
        CliCommand::Whoami => match client.auth().current_user().await.map_err(report)? {
            Some(user) => writeln!(out, "{}", format::user(&user))?,
            None => return Err(report(AuthError::NotAuthenticated.into())),
        },

        CliCommand::Posts(filter) => {
            let posts = client.posts();
            let list = match filter {
                PostFilter::All => posts.all_posts().await,
                PostFilter::Tag(tag) => posts.posts_by_tag(&tag).await,
                PostFilter::Mine => posts.my_posts().await,
            }
            .map_err(report)?;

            if list.is_empty() {
                writeln!(out, "No posts")?;
            }
            for post in &list {
                writeln!(out, "{}", format::post_summary(post))?;
            }
        }
        CliCommand::Post { id } => {
            let post = client.posts().post(&id).await.map_err(report)?;
            writeln!(out, "{}", format::post(&post))?;
        }
        CliCommand::Create {
            title,
            tag,
            content,
        } => {
            let post = client
                .posts()
                .create_post(&PostRequest::new(title, tag, content))
                .await
                .map_err(report)?;
            writeln!(out, "Created post {}", post.id)?;
        }
        CliCommand::Like { id } => {
            client.posts().like(&id).await.map_err(report)?;
            writeln!(out, "Liked {}", id)?;
        }
        CliCommand::Unlike { id } => {
            client.posts().unlike(&id).await.map_err(report)?;
            writeln!(out, "Unliked {}", id)?;
        }
        CliCommand::Likes { id } => {
            let likes = client.posts().likes(&id).await.map_err(report)?;
            if likes.is_empty() {
                writeln!(out, "No likes")?;
            }
            for like in &likes {
                writeln!(out, "{}", format::like(like))?;
            }
        }
        CliCommand::Comments { id } => {
            let comments = client.posts().comments(&id).await.map_err(report)?;
            if comments.is_empty() {
                writeln!(out, "No comments")?;
            }
            for comment in &comments {
                writeln!(out, "{}", format::comment(comment))?;
            }
        }
        CliCommand::Comment { id, text } => {
            let comment = client
                .posts()
                .create_comment(&id, &CommentRequest { comment: text })
                .await
                .map_err(report)?;
            writeln!(out, "Added comment {}", comment.id)?;
        }
        CliCommand::Uncomment {
            post_id,
            comment_id,
        } => {
            client
                .posts()
                .delete_comment(&post_id, &comment_id)
                .await
                .map_err(report)?;
            writeln!(out, "Deleted comment {}", comment_id)?;
        }
        CliCommand::Activity => {
            let entries = client.activity().activity_log().await.map_err(report)?;
            if entries.is_empty() {
                writeln!(out, "No activity")?;
            }
            for entry in &entries {
                writeln!(out, "{}", format::activity(entry))?;
            }
        }
    }

    Ok(())
}

fn print_message<W: Write>(out: &mut W, message: &str) -> Result<()> {
    let message = message.trim();
    if !message.is_empty() {
        writeln!(out, "{}", message)?;
    }
    Ok(())
}
