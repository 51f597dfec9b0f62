//! git command construction.

use super::CommandSpec;

pub fn set_user_name(name: &str) -> CommandSpec {
    CommandSpec::new(
        "git",
        vec![
            "config".into(),
            "--global".into(),
            "user.name".into(),
            name.to_string(),
        ],
    )
}

pub fn set_user_email(email: &str) -> CommandSpec {
    CommandSpec::new(
        "git",
        vec![
            "config".into(),
            "--global".into(),
            "user.email".into(),
            email.to_string(),
        ],
    )
}

pub fn clone(url: &str) -> CommandSpec {
    CommandSpec::new("git", vec!["clone".into(), url.to_string()])
}

/// Stage everything, commit, push. The three commands always run in order;
/// a failed commit does not stop the push, matching the no-rollback model.
pub fn commit_and_sync(message: &str, remote: &str, branch: &str) -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("git", vec!["add".into(), ".".into()]),
        CommandSpec::new("git", vec!["commit".into(), "-m".into(), message.to_string()]),
        CommandSpec::new("git", vec!["push".into(), remote.to_string(), branch.to_string()]),
    ]
}
