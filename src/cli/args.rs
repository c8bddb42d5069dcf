//! Command-line argument parsing for the securesocial CLI.

/// Which posts `posts` lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Tag(String),
    Mine,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    Login { email: String, password: String },
    Register { username: String, email: String, password: String },
    Verify { email: String, otp: String },
    ResendOtp { email: String },
    CheckUsername { username: String },
    Logout,
    Whoami,
    Posts(PostFilter),
    Post { id: String },
    Create { title: String, tag: String, content: String },
    Like { id: String },
    Unlike { id: String },
    Likes { id: String },
    Comments { id: String },
    Comment { id: String, text: String },
    Uncomment { post_id: String, comment_id: String },
    Activity,
    /// Arguments that could not be parsed, with the reason.
    Invalid(String),
}

/// Global flags plus the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub verbose: bool,
    pub command: CliCommand,
}

pub const USAGE: &str = "\
Usage: securesocial [--verbose] <command>

Commands:
  login <email> <password>
  register <username> <email> <password>
  verify <email> <otp>
  resend-otp <email>
  check-username <username>
  logout
  whoami
  posts [--tag <tag> | --mine]
  post <id>
  create <title> <tag> <content>
  like <id>
  unlike <id>
  likes <id>
  comments <id>
  comment <id> <text>
  uncomment <post-id> <comment-id>
  activity

Options:
  -v, --verbose   Debug logging
  -V, --version   Print version
  -h, --help      Print this help";

/// Parse command-line arguments (program name first).
///
/// # Examples
///
/// ```
/// use securesocial::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["securesocial".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut verbose = false;
    let mut positional = Vec::new();

    // Skip the program name
    for arg in args.skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            "--version" | "-V" => {
                return CliArgs {
                    verbose,
                    command: CliCommand::Version,
                }
            }
            "--help" | "-h" => {
                return CliArgs {
                    verbose,
                    command: CliCommand::Help,
                }
            }
            _ => positional.push(arg),
        }
    }

    CliArgs {
        verbose,
        command: parse_command(&positional),
    }
}

fn parse_command(args: &[String]) -> CliCommand {
    let Some((name, rest)) = args.split_first() else {
        return CliCommand::Help;
    };

    let expect = |count: usize, usage: &str| -> Result<Vec<String>, CliCommand> {
        if rest.len() == count {
            Ok(rest.to_vec())
        } else {
            Err(CliCommand::Invalid(format!("usage: securesocial {}", usage)))
        }
    };

    let parsed = match name.as_str() {
        "login" => expect(2, "login <email> <password>").map(|a| CliCommand::Login {
            email: a[0].clone(),
            password: a[1].clone(),
        }),
        "register" => {
            expect(3, "register <username> <email> <password>").map(|a| CliCommand::Register {
                username: a[0].clone(),
                email: a[1].clone(),
                password: a[2].clone(),
            })
        }
        "verify" => expect(2, "verify <email> <otp>").map(|a| CliCommand::Verify {
            email: a[0].clone(),
            otp: a[1].clone(),
        }),
        "resend-otp" => expect(1, "resend-otp <email>").map(|a| CliCommand::ResendOtp {
            email: a[0].clone(),
        }),
        "check-username" => {
            expect(1, "check-username <username>").map(|a| CliCommand::CheckUsername {
                username: a[0].clone(),
            })
        }
        "logout" => expect(0, "logout").map(|_| CliCommand::Logout),
        "whoami" => expect(0, "whoami").map(|_| CliCommand::Whoami),
        "posts" => parse_posts(rest),
        "post" => expect(1, "post <id>").map(|a| CliCommand::Post { id: a[0].clone() }),
        "create" => expect(3, "create <title> <tag> <content>").map(|a| CliCommand::Create {
            title: a[0].clone(),
            tag: a[1].clone(),
            content: a[2].clone(),
        }),
        "like" => expect(1, "like <id>").map(|a| CliCommand::Like { id: a[0].clone() }),
        "unlike" => expect(1, "unlike <id>").map(|a| CliCommand::Unlike { id: a[0].clone() }),
        "likes" => expect(1, "likes <id>").map(|a| CliCommand::Likes { id: a[0].clone() }),
        "comments" => {
            expect(1, "comments <id>").map(|a| CliCommand::Comments { id: a[0].clone() })
        }
        "comment" => expect(2, "comment <id> <text>").map(|a| CliCommand::Comment {
            id: a[0].clone(),
            text: a[1].clone(),
        }),
        "uncomment" => {
            expect(2, "uncomment <post-id> <comment-id>").map(|a| CliCommand::Uncomment {
                post_id: a[0].clone(),
                comment_id: a[1].clone(),
            })
        }
        "activity" => expect(0, "activity").map(|_| CliCommand::Activity),
        other => Err(CliCommand::Invalid(format!("unknown command: {}", other))),
    };

    parsed.unwrap_or_else(|invalid| invalid)
}

fn parse_posts(rest: &[String]) -> Result<CliCommand, CliCommand> {
    match rest {
        [] => Ok(CliCommand::Posts(PostFilter::All)),
        [flag] if flag == "--mine" => Ok(CliCommand::Posts(PostFilter::Mine)),
        [flag, tag] if flag == "--tag" => Ok(CliCommand::Posts(PostFilter::Tag(tag.clone()))),
        _ => Err(CliCommand::Invalid(
            "usage: securesocial posts [--tag <tag> | --mine]".to_string(),
        )),
    }
}
