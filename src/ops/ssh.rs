//! ssh command construction: key generation, connection tests, agent loading.

use super::{CommandSpec, expand_tilde};

/// `ssh-keygen -t rsa -b 4096 -C <comment> [-N <passphrase>] -f <path>`.
///
/// `-N` is only passed for a non-empty passphrase; without it ssh-keygen
/// treats the key as unprotected.
pub fn keygen(path: &str, passphrase: &str, comment: &str) -> CommandSpec {
    let mut args = vec![
        "-t".to_string(),
        "rsa".to_string(),
        "-b".to_string(),
        "4096".to_string(),
        "-C".to_string(),
        comment.to_string(),
    ];
    if !passphrase.is_empty() {
        args.push("-N".to_string());
        args.push(passphrase.to_string());
    }
    args.push("-f".to_string());
    args.push(expand_tilde(path));
    CommandSpec::new("ssh-keygen", args)
}

/// `ssh -T git@<host>`. GitHub closes the connection with exit code 1 even on
/// a successful handshake, so the authentication banner matters more than the
/// status here.
pub fn test_connection(host: &str) -> CommandSpec {
    CommandSpec::new("ssh", vec!["-T".to_string(), format!("git@{host}")])
}

/// `ssh-add <path>`.
pub fn add_key(path: &str) -> CommandSpec {
    CommandSpec::new("ssh-add", vec![expand_tilde(path)])
}
