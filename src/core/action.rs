//! # Actions
//!
//! Everything that can happen in gitup becomes an `Action`.
//! User presses `j`? That's `Action::MoveDown`.
//! A command batch finishes? That's `Action::CommandsFinished(reports)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` telling the caller which side effect to
//! perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  State' + Effect
//! ```
//!
//! This makes everything testable: drive a whole flow action-by-action and
//! assert on the exact command lines the final `Effect::Run` carries.

use log::debug;

use crate::core::menu::{EntryId, Menu};
use crate::core::state::{App, InputPrompt, InputTarget, KeySetup, TranscriptEntry};
use crate::ops::runner::{CommandReport, Outcome};
use crate::ops::{CommandSpec, git, ssh};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Menu navigation
    MoveUp,
    MoveDown,
    Activate,
    Back,
    Quit,

    // Text input editing
    InputChar(char),
    InputPaste(String),
    InputBackspace,
    InputClearLine,
    InputDeleteWord,
    InputSubmit,
    InputCancel,

    // Reported by the runner after a command batch
    CommandsFinished(Vec<CommandReport>),
}

/// What the caller must do after `update()` returns.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Run these commands in order, then feed `CommandsFinished` back in.
    Run(Vec<CommandSpec>),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::MoveUp => {
            if !app.in_input_mode() {
                app.menu.select_prev();
            }
            Effect::None
        }
        Action::MoveDown => {
            if !app.in_input_mode() {
                app.menu.select_next();
            }
            Effect::None
        }
        Action::Activate => {
            if app.in_input_mode() {
                Effect::None
            } else {
                activate(app)
            }
        }
        Action::Back => {
            app.pop_menu();
            Effect::None
        }
        Action::Quit => Effect::Quit,

        Action::InputChar(c) => {
            if let Some(input) = &mut app.input {
                input.buffer.push(c);
            }
            Effect::None
        }
        Action::InputPaste(text) => {
            if let Some(input) = &mut app.input {
                input.buffer.extend(text.chars().filter(|c| !c.is_control()));
            }
            Effect::None
        }
        Action::InputBackspace => {
            if let Some(input) = &mut app.input {
                input.buffer.pop();
            }
            Effect::None
        }
        Action::InputClearLine => {
            if let Some(input) = &mut app.input {
                input.buffer.clear();
            }
            Effect::None
        }
        Action::InputDeleteWord => {
            if let Some(input) = &mut app.input {
                delete_last_word(&mut input.buffer);
            }
            Effect::None
        }
        Action::InputCancel => {
            app.input = None;
            Effect::None
        }
        Action::InputSubmit => submit_input(app),

        Action::CommandsFinished(reports) => {
            record_reports(app, reports);
            Effect::None
        }
    }
}

/// Act on the selected menu entry.
fn activate(app: &mut App) -> Effect {
    let entry = app.menu.selected_entry();
    debug!("Activating menu entry: {:?}", entry.id);

    match entry.id {
        EntryId::Exit | EntryId::Cancel => Effect::Quit,
        EntryId::Back => {
            app.pop_menu();
            Effect::None
        }

        EntryId::CreateSshKey => {
            app.key_setup = KeySetup::default();
            app.push_menu(Menu::ssh_key());
            app.status_message = String::from("Set key options, then pick Generate Keys");
            Effect::None
        }
        EntryId::TestConnection => {
            app.push_menu(Menu::test_connection());
            Effect::None
        }

        EntryId::SetGitIdentity => {
            app.pending_git_name = None;
            open_prompt(app, InputTarget::GitUserName);
            Effect::None
        }
        EntryId::CloneRepository => {
            open_prompt(app, InputTarget::CloneUrl);
            Effect::None
        }
        EntryId::CommitAndSync => {
            open_prompt(app, InputTarget::CommitMessage);
            Effect::None
        }
        EntryId::AddKeyToAgent => {
            let path = app.defaults.key_path.clone();
            app.input = Some(InputPrompt::with_value(
                InputTarget::AgentKeyPath,
                prompt_label(InputTarget::AgentKeyPath),
                path,
            ));
            Effect::None
        }

        EntryId::EnterKeyPath => {
            let current = app
                .key_setup
                .path
                .clone()
                .unwrap_or_else(|| app.defaults.key_path.clone());
            app.input = Some(InputPrompt::with_value(
                InputTarget::KeyPath,
                prompt_label(InputTarget::KeyPath),
                current,
            ));
            Effect::None
        }
        EntryId::EnterPassphrase => {
            open_prompt(app, InputTarget::KeyPassphrase);
            Effect::None
        }
        EntryId::GenerateKeys => {
            let path = app
                .key_setup
                .path
                .clone()
                .unwrap_or_else(|| app.defaults.key_path.clone());
            let passphrase = app.key_setup.passphrase.clone().unwrap_or_default();
            let comment = app.defaults.email.clone();
            run(app, vec![ssh::keygen(&path, &passphrase, &comment)])
        }

        EntryId::TestGithub => {
            let host = app.defaults.github_host.clone();
            run(app, vec![ssh::test_connection(&host)])
        }
        EntryId::TestGitea => match app.defaults.gitea_host.clone() {
            Some(host) => run(app, vec![ssh::test_connection(&host)]),
            None => {
                open_prompt(app, InputTarget::GiteaHost);
                Effect::None
            }
        },
    }
}

/// Fold a submitted text value into the pending flow.
fn submit_input(app: &mut App) -> Effect {
    let Some(prompt) = app.input.take() else {
        return Effect::None;
    };
    let value = prompt.buffer.trim().to_string();

    match prompt.target {
        InputTarget::GitUserName => {
            if value.is_empty() {
                return keep_prompt(app, prompt, "Username is required");
            }
            app.pending_git_name = Some(value);
            open_prompt(app, InputTarget::GitUserEmail);
            Effect::None
        }
        InputTarget::GitUserEmail => {
            if value.is_empty() {
                return keep_prompt(app, prompt, "Email is required");
            }
            let Some(name) = app.pending_git_name.take() else {
                // Lost the first step somehow, start over.
                open_prompt(app, InputTarget::GitUserName);
                return Effect::None;
            };
            run(
                app,
                vec![git::set_user_name(&name), git::set_user_email(&value)],
            )
        }

        InputTarget::CloneUrl => {
            if value.is_empty() {
                return keep_prompt(app, prompt, "Repository URL is required");
            }
            run(app, vec![git::clone(&value)])
        }
        InputTarget::CommitMessage => {
            if value.is_empty() {
                return keep_prompt(app, prompt, "Commit message is required");
            }
            let remote = app.defaults.remote.clone();
            let branch = app.defaults.branch.clone();
            run(app, git::commit_and_sync(&value, &remote, &branch))
        }

        InputTarget::KeyPath => {
            app.status_message = if value.is_empty() {
                String::from("Key file path reset to default")
            } else {
                format!("Key file path: {value}")
            };
            app.key_setup.path = (!value.is_empty()).then_some(value);
            Effect::None
        }
        InputTarget::KeyPassphrase => {
            app.status_message = if value.is_empty() {
                String::from("Passphrase cleared")
            } else {
                String::from("Passphrase set")
            };
            app.key_setup.passphrase = (!value.is_empty()).then_some(value);
            Effect::None
        }

        InputTarget::GiteaHost => {
            if value.is_empty() {
                return keep_prompt(app, prompt, "Host is required");
            }
            run(app, vec![ssh::test_connection(&value)])
        }
        InputTarget::AgentKeyPath => {
            if value.is_empty() {
                return keep_prompt(app, prompt, "Key path is required");
            }
            run(app, vec![ssh::add_key(&value)])
        }
    }
}

fn open_prompt(app: &mut App, target: InputTarget) {
    app.input = Some(InputPrompt::new(target, prompt_label(target)));
}

fn prompt_label(target: InputTarget) -> &'static str {
    match target {
        InputTarget::GitUserName => "Enter global username",
        InputTarget::GitUserEmail => "Enter global email",
        InputTarget::CloneUrl => "Enter repository URL",
        InputTarget::CommitMessage => "Enter commit message",
        InputTarget::KeyPath => "Enter file path",
        InputTarget::KeyPassphrase => "Enter passphrase",
        InputTarget::GiteaHost => "Enter Gitea host",
        InputTarget::AgentKeyPath => "Enter key path",
    }
}

/// Re-open a prompt whose required value was submitted empty.
fn keep_prompt(app: &mut App, prompt: InputPrompt, message: &str) -> Effect {
    app.status_message = message.to_string();
    app.input = Some(prompt);
    Effect::None
}

fn run(app: &mut App, specs: Vec<CommandSpec>) -> Effect {
    if let Some(first) = specs.first() {
        app.status_message = format!("Running {}...", first.program);
    }
    Effect::Run(specs)
}

/// Ctrl+W: drop the last whitespace-separated word, like the original shell
/// binding. Collapses runs of whitespace between the remaining words.
fn delete_last_word(buffer: &mut String) {
    let rebuilt = {
        let fields: Vec<&str> = buffer.split_whitespace().collect();
        fields[..fields.len().saturating_sub(1)].join(" ")
    };
    *buffer = rebuilt;
}

/// Fold finished-command reports into the transcript and the status line.
fn record_reports(app: &mut App, reports: Vec<CommandReport>) {
    let mut all_ok = true;

    for report in reports {
        let CommandReport { spec, outcome } = report;
        app.transcript.push(TranscriptEntry::Command(spec.to_string()));

        match outcome {
            Outcome::Finished {
                code,
                stdout,
                stderr,
            } => {
                let stdout = stdout.trim_end();
                if !stdout.is_empty() {
                    app.transcript.push(TranscriptEntry::Output(stdout.to_string()));
                }
                let stderr = stderr.trim_end();
                if !stderr.is_empty() {
                    app.transcript.push(TranscriptEntry::Output(stderr.to_string()));
                }
                match code {
                    Some(0) => {
                        if spec.program == "ssh-keygen" {
                            app.transcript.push(TranscriptEntry::Notice(String::from(
                                "SSH key created successfully!",
                            )));
                        }
                    }
                    Some(n) => {
                        all_ok = false;
                        app.transcript.push(TranscriptEntry::Failure(format!(
                            "{} exited with code {}",
                            spec.program, n
                        )));
                    }
                    None => {
                        all_ok = false;
                        app.transcript.push(TranscriptEntry::Failure(format!(
                            "{} terminated by a signal",
                            spec.program
                        )));
                    }
                }
            }
            Outcome::SpawnFailed(err) => {
                all_ok = false;
                app.transcript.push(TranscriptEntry::Failure(format!(
                    "failed to run {}: {}",
                    spec.program, err
                )));
            }
        }
    }

    app.status_message = if all_ok {
        String::from("Done")
    } else {
        String::from("Command failed (see output)")
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(update(app, Action::InputChar(c)), Effect::None);
        }
    }

    /// Move the selection to the entry with the given id and activate it.
    fn choose(app: &mut App, id: EntryId) -> Effect {
        let pos = app
            .menu
            .entries()
            .iter()
            .position(|e| e.id == id)
            .expect("entry not in current menu");
        while app.menu.selected() > pos {
            update(app, Action::MoveUp);
        }
        while app.menu.selected() < pos {
            update(app, Action::MoveDown);
        }
        update(app, Action::Activate)
    }

    fn spec(program: &'static str, args: &[&str]) -> CommandSpec {
        CommandSpec::new(program, args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = test_app();
        for _ in 0..3 {
            update(&mut app, Action::MoveUp);
        }
        assert_eq!(app.menu.selected(), 0);
        for _ in 0..50 {
            update(&mut app, Action::MoveDown);
        }
        assert_eq!(app.menu.selected(), app.menu.entries().len() - 1);
    }

    #[test]
    fn test_exit_quits() {
        let mut app = test_app();
        assert_eq!(choose(&mut app, EntryId::Exit), Effect::Quit);
    }

    #[test]
    fn test_submenu_push_and_back() {
        let mut app = test_app();
        assert_eq!(choose(&mut app, EntryId::CreateSshKey), Effect::None);
        assert_eq!(app.menu.selected_entry().id, EntryId::EnterKeyPath);
        assert_eq!(app.menu_stack.len(), 1);

        assert_eq!(choose(&mut app, EntryId::Back), Effect::None);
        assert!(app.menu_stack.is_empty());
        // Selection on the main menu is restored, still on Create SSH Key.
        assert_eq!(app.menu.selected_entry().id, EntryId::CreateSshKey);
    }

    #[test]
    fn test_cancel_in_submenu_quits() {
        let mut app = test_app();
        choose(&mut app, EntryId::TestConnection);
        assert_eq!(choose(&mut app, EntryId::Cancel), Effect::Quit);
    }

    #[test]
    fn test_back_action_pops_submenu() {
        let mut app = test_app();
        choose(&mut app, EntryId::TestConnection);
        assert_eq!(update(&mut app, Action::Back), Effect::None);
        assert!(app.menu_stack.is_empty());
    }

    #[test]
    fn test_back_action_on_main_menu_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Back), Effect::None);
        assert_eq!(app.menu.selected_entry().id, EntryId::CreateSshKey);
    }

    #[test]
    fn test_git_identity_flow() {
        let mut app = test_app();
        choose(&mut app, EntryId::SetGitIdentity);
        assert!(app.in_input_mode());

        type_str(&mut app, "Ada Lovelace");
        assert_eq!(update(&mut app, Action::InputSubmit), Effect::None);
        // Second step: email prompt replaces the username prompt.
        assert_eq!(app.input.as_ref().unwrap().label, "Enter global email");

        type_str(&mut app, "ada@example.com");
        let effect = update(&mut app, Action::InputSubmit);
        assert_eq!(
            effect,
            Effect::Run(vec![
                spec("git", &["config", "--global", "user.name", "Ada Lovelace"]),
                spec("git", &["config", "--global", "user.email", "ada@example.com"]),
            ])
        );
        assert!(!app.in_input_mode());
    }

    #[test]
    fn test_empty_username_keeps_prompt() {
        let mut app = test_app();
        choose(&mut app, EntryId::SetGitIdentity);
        assert_eq!(update(&mut app, Action::InputSubmit), Effect::None);
        assert!(app.in_input_mode());
        assert_eq!(app.status_message, "Username is required");
    }

    #[test]
    fn test_clone_flow() {
        let mut app = test_app();
        choose(&mut app, EntryId::CloneRepository);
        type_str(&mut app, "git@github.com:acme/widgets.git");
        let effect = update(&mut app, Action::InputSubmit);
        assert_eq!(
            effect,
            Effect::Run(vec![spec(
                "git",
                &["clone", "git@github.com:acme/widgets.git"]
            )])
        );
    }

    #[test]
    fn test_empty_clone_url_rejected() {
        let mut app = test_app();
        choose(&mut app, EntryId::CloneRepository);
        type_str(&mut app, "   ");
        assert_eq!(update(&mut app, Action::InputSubmit), Effect::None);
        assert!(app.in_input_mode());
        assert_eq!(app.status_message, "Repository URL is required");
    }

    #[test]
    fn test_commit_and_sync_flow() {
        let mut app = test_app();
        choose(&mut app, EntryId::CommitAndSync);
        type_str(&mut app, "fix widget alignment");
        let effect = update(&mut app, Action::InputSubmit);
        assert_eq!(
            effect,
            Effect::Run(vec![
                spec("git", &["add", "."]),
                spec("git", &["commit", "-m", "fix widget alignment"]),
                spec("git", &["push", "origin", "main"]),
            ])
        );
    }

    #[test]
    fn test_generate_keys_with_defaults() {
        let mut app = test_app();
        choose(&mut app, EntryId::CreateSshKey);
        let effect = choose(&mut app, EntryId::GenerateKeys);
        assert_eq!(
            effect,
            Effect::Run(vec![spec(
                "ssh-keygen",
                &[
                    "-t",
                    "rsa",
                    "-b",
                    "4096",
                    "-C",
                    "dev@example.com",
                    "-f",
                    "/tmp/test_id_rsa",
                ]
            )])
        );
    }

    #[test]
    fn test_generate_keys_with_entered_path_and_passphrase() {
        let mut app = test_app();
        choose(&mut app, EntryId::CreateSshKey);

        choose(&mut app, EntryId::EnterKeyPath);
        // The prompt comes pre-filled with the default; replace it.
        update(&mut app, Action::InputClearLine);
        type_str(&mut app, "/tmp/deploy_rsa");
        update(&mut app, Action::InputSubmit);

        choose(&mut app, EntryId::EnterPassphrase);
        type_str(&mut app, "hunter2");
        update(&mut app, Action::InputSubmit);

        let effect = choose(&mut app, EntryId::GenerateKeys);
        assert_eq!(
            effect,
            Effect::Run(vec![spec(
                "ssh-keygen",
                &[
                    "-t",
                    "rsa",
                    "-b",
                    "4096",
                    "-C",
                    "dev@example.com",
                    "-N",
                    "hunter2",
                    "-f",
                    "/tmp/deploy_rsa",
                ]
            )])
        );
    }

    #[test]
    fn test_reentering_key_submenu_resets_gathered_values() {
        let mut app = test_app();
        choose(&mut app, EntryId::CreateSshKey);
        choose(&mut app, EntryId::EnterPassphrase);
        type_str(&mut app, "hunter2");
        update(&mut app, Action::InputSubmit);
        choose(&mut app, EntryId::Back);

        choose(&mut app, EntryId::CreateSshKey);
        assert_eq!(app.key_setup, KeySetup::default());
    }

    #[test]
    fn test_test_github_connection() {
        let mut app = test_app();
        choose(&mut app, EntryId::TestConnection);
        let effect = choose(&mut app, EntryId::TestGithub);
        assert_eq!(
            effect,
            Effect::Run(vec![spec("ssh", &["-T", "git@github.com"])])
        );
    }

    #[test]
    fn test_test_gitea_prompts_when_unconfigured() {
        let mut app = test_app();
        choose(&mut app, EntryId::TestConnection);
        assert_eq!(choose(&mut app, EntryId::TestGitea), Effect::None);
        assert_eq!(app.input.as_ref().unwrap().label, "Enter Gitea host");

        type_str(&mut app, "git.example.org");
        let effect = update(&mut app, Action::InputSubmit);
        assert_eq!(
            effect,
            Effect::Run(vec![spec("ssh", &["-T", "git@git.example.org"])])
        );
    }

    #[test]
    fn test_test_gitea_uses_configured_host() {
        let mut app = test_app();
        app.defaults.gitea_host = Some("gitea.internal".to_string());
        choose(&mut app, EntryId::TestConnection);
        let effect = choose(&mut app, EntryId::TestGitea);
        assert_eq!(
            effect,
            Effect::Run(vec![spec("ssh", &["-T", "git@gitea.internal"])])
        );
    }

    #[test]
    fn test_add_key_to_agent_prefills_default_path() {
        let mut app = test_app();
        choose(&mut app, EntryId::AddKeyToAgent);
        assert_eq!(app.input.as_ref().unwrap().buffer, "/tmp/test_id_rsa");
        let effect = update(&mut app, Action::InputSubmit);
        assert_eq!(
            effect,
            Effect::Run(vec![spec("ssh-add", &["/tmp/test_id_rsa"])])
        );
    }

    #[test]
    fn test_input_editing_keys() {
        let mut app = test_app();
        choose(&mut app, EntryId::CloneRepository);

        type_str(&mut app, "git clone url");
        update(&mut app, Action::InputDeleteWord);
        assert_eq!(app.input.as_ref().unwrap().buffer, "git clone");

        update(&mut app, Action::InputBackspace);
        assert_eq!(app.input.as_ref().unwrap().buffer, "git clon");

        update(&mut app, Action::InputClearLine);
        assert_eq!(app.input.as_ref().unwrap().buffer, "");
    }

    #[test]
    fn test_input_paste_strips_control_chars() {
        let mut app = test_app();
        choose(&mut app, EntryId::CloneRepository);
        update(
            &mut app,
            Action::InputPaste("https://example.com/repo.git\n".to_string()),
        );
        assert_eq!(
            app.input.as_ref().unwrap().buffer,
            "https://example.com/repo.git"
        );
    }

    #[test]
    fn test_input_cancel_abandons_prompt_without_side_effects() {
        let mut app = test_app();
        choose(&mut app, EntryId::CreateSshKey);
        choose(&mut app, EntryId::EnterPassphrase);
        type_str(&mut app, "secret");
        assert_eq!(update(&mut app, Action::InputCancel), Effect::None);
        assert!(!app.in_input_mode());
        assert_eq!(app.key_setup.passphrase, None);
    }

    #[test]
    fn test_navigation_ignored_while_typing() {
        let mut app = test_app();
        choose(&mut app, EntryId::CloneRepository);
        let before = app.menu.selected();
        update(&mut app, Action::MoveDown);
        update(&mut app, Action::MoveUp);
        assert_eq!(app.menu.selected(), before);
    }

    #[test]
    fn test_commands_finished_success_records_transcript() {
        let mut app = test_app();
        let report = CommandReport {
            spec: spec("git", &["clone", "url"]),
            outcome: Outcome::Finished {
                code: Some(0),
                stdout: String::new(),
                stderr: "Cloning into 'url'...\n".to_string(),
            },
        };
        update(&mut app, Action::CommandsFinished(vec![report]));

        assert_eq!(
            app.transcript,
            vec![
                TranscriptEntry::Command("git clone url".to_string()),
                TranscriptEntry::Output("Cloning into 'url'...".to_string()),
            ]
        );
        assert_eq!(app.status_message, "Done");
    }

    #[test]
    fn test_commands_finished_failure_sets_status() {
        let mut app = test_app();
        let report = CommandReport {
            spec: spec("git", &["push", "origin", "main"]),
            outcome: Outcome::Finished {
                code: Some(128),
                stdout: String::new(),
                stderr: "fatal: no configured push destination\n".to_string(),
            },
        };
        update(&mut app, Action::CommandsFinished(vec![report]));

        assert_eq!(app.status_message, "Command failed (see output)");
        assert!(
            app.transcript
                .contains(&TranscriptEntry::Failure("git exited with code 128".to_string()))
        );
    }

    #[test]
    fn test_keygen_success_notice() {
        let mut app = test_app();
        let report = CommandReport {
            spec: spec("ssh-keygen", &["-t", "rsa"]),
            outcome: Outcome::Finished {
                code: Some(0),
                stdout: "Your identification has been saved\n".to_string(),
                stderr: String::new(),
            },
        };
        update(&mut app, Action::CommandsFinished(vec![report]));
        assert!(
            app.transcript
                .contains(&TranscriptEntry::Notice("SSH key created successfully!".to_string()))
        );
    }

    #[test]
    fn test_spawn_failure_reported() {
        let mut app = test_app();
        let report = CommandReport {
            spec: spec("ssh-add", &["/tmp/key"]),
            outcome: Outcome::SpawnFailed("No such file or directory".to_string()),
        };
        update(&mut app, Action::CommandsFinished(vec![report]));
        assert_eq!(app.status_message, "Command failed (see output)");
        assert_eq!(
            app.transcript.last(),
            Some(&TranscriptEntry::Failure(
                "failed to run ssh-add: No such file or directory".to_string()
            ))
        );
    }

    #[test]
    fn test_delete_last_word() {
        let mut buffer = "one two  three".to_string();
        delete_last_word(&mut buffer);
        assert_eq!(buffer, "one two");
        delete_last_word(&mut buffer);
        assert_eq!(buffer, "one");
        delete_last_word(&mut buffer);
        assert_eq!(buffer, "");
        delete_last_word(&mut buffer);
        assert_eq!(buffer, "");
    }
}
