//! Authoring checks over the lists and conversations registered with a director.
//!
//! The interpreter tolerates dangling references at run time by logging and
//! skipping, so these checks are how authors find them before a scene plays.

use regie_core::{ActionListId, ConversationId, WorldState};

use crate::action::{ActionKind, ResultAction, VariableCheck};
use crate::action_list::{ActionList, ListKind};
use crate::conversation::Conversation;
use crate::director::Director;
use crate::message::Target;

/// A warning or error found while checking authored scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The list or conversation where the issue was found.
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: &str, message: impl Into<String>) -> Self {
        Self {
            subject: subject.to_string(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: &str, message: impl Into<String>) -> Self {
        Self {
            subject: subject.to_string(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Check every list and conversation of a director.
pub fn validate(director: &Director) -> Vec<ValidationIssue> {
    let mut issues = validate_lists(director);
    issues.extend(validate_conversations(director));
    issues
}

/// Check the registered action lists.
pub fn validate_lists(director: &Director) -> Vec<ValidationIssue> {
    let refs = References::of(director);
    let mut issues = Vec::new();
    for list in director.lists() {
        // The runtime list is filled in by the host, so an empty one is expected.
        if list.kind == ListKind::Runtime {
            continue;
        }
        validate_list(list, &refs, &mut issues);
    }
    issues
}

/// Check the registered conversations.
pub fn validate_conversations(director: &Director) -> Vec<ValidationIssue> {
    let refs = References::of(director);
    let mut issues = Vec::new();
    for conversation in director.conversations() {
        validate_conversation(conversation, director, &refs, &mut issues);
    }
    issues
}

/// What a script may refer to.
struct References<'a> {
    lists: usize,
    conversations: usize,
    world: &'a WorldState,
}

impl<'a> References<'a> {
    fn of(director: &'a Director) -> Self {
        Self {
            lists: director.lists().len(),
            conversations: director.conversations().len(),
            world: director.world(),
        }
    }

    fn has_list(&self, id: ActionListId) -> bool {
        id.index() < self.lists
    }

    fn has_conversation(&self, id: ConversationId) -> bool {
        id.index() < self.conversations
    }
}

fn validate_list(list: &ActionList, refs: &References<'_>, issues: &mut Vec<ValidationIssue>) {
    let subject = format!("{} '{}'", list.id(), list.name);
    if list.actions.is_empty() {
        issues.push(ValidationIssue::warning(&subject, "has no actions"));
        return;
    }
    let len = list.actions.len();
    for (index, action) in list.actions.iter().enumerate() {
        let here = format!("action {index} ({})", action.kind.name());
        let mut results = vec![&action.end];
        if let Some(branch) = action.kind.branch() {
            results.push(&branch.on_true);
            results.push(&branch.on_false);
        }
        for result in results {
            check_result(result, &here, len, &subject, refs, issues);
        }

        match &action.kind {
            ActionKind::SetVariable { variable, .. } => {
                if refs.world.variables.kind_of(*variable).is_none() {
                    issues.push(ValidationIssue::error(
                        &subject,
                        format!("{here} sets unknown {variable}"),
                    ));
                }
            }
            ActionKind::CheckVariable {
                variable, check, ..
            } => match refs.world.variables.kind_of(*variable) {
                None => issues.push(ValidationIssue::error(
                    &subject,
                    format!("{here} checks unknown {variable}"),
                )),
                Some(kind) if kind != check.kind() => {
                    let expected = match check {
                        VariableCheck::Integer { .. } => "an integer",
                        VariableCheck::Boolean { .. } => "a boolean",
                    };
                    issues.push(ValidationIssue::warning(
                        &subject,
                        format!("{here} compares {variable} as {expected}"),
                    ));
                }
                Some(_) => {}
            },
            ActionKind::SendMessage { target, .. } => match target {
                Target::List(id) if !refs.has_list(*id) => issues.push(ValidationIssue::error(
                    &subject,
                    format!("{here} sends to unknown {id}"),
                )),
                Target::Conversation(id) if !refs.has_conversation(*id) => {
                    issues.push(ValidationIssue::error(
                        &subject,
                        format!("{here} sends to unknown {id}"),
                    ));
                }
                _ => {}
            },
            ActionKind::StartConversation { conversation }
                if !refs.has_conversation(*conversation) =>
            {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!("{here} starts unknown {conversation}"),
                ));
            }
            _ => {}
        }
    }
}

fn check_result(
    result: &ResultAction,
    here: &str,
    len: usize,
    subject: &str,
    refs: &References<'_>,
    issues: &mut Vec<ValidationIssue>,
) {
    match result {
        ResultAction::Skip(target) if *target >= len => {
            issues.push(ValidationIssue::warning(
                subject,
                format!("{here} skips to {target}, past the last action; the list will end"),
            ));
        }
        ResultAction::RunCutscene(None) => {
            issues.push(ValidationIssue::warning(
                subject,
                format!("{here} runs a cutscene but names none"),
            ));
        }
        ResultAction::RunCutscene(Some(id)) if !refs.has_list(*id) => {
            issues.push(ValidationIssue::error(
                subject,
                format!("{here} runs unknown {id}"),
            ));
        }
        _ => {}
    }
}

fn validate_conversation(
    conversation: &Conversation,
    director: &Director,
    refs: &References<'_>,
    issues: &mut Vec<ValidationIssue>,
) {
    let subject = format!("{} '{}'", conversation.id(), conversation.name);
    if conversation.options.is_empty() {
        issues.push(ValidationIssue::warning(&subject, "has no options"));
    }

    for (index, option) in conversation.options.iter().enumerate() {
        match option.list {
            None => issues.push(ValidationIssue::warning(
                &subject,
                format!("option {index} '{}' runs no list", option.label),
            )),
            Some(id) if !refs.has_list(id) => issues.push(ValidationIssue::error(
                &subject,
                format!("option {index} '{}' runs unknown {id}", option.label),
            )),
            Some(id) => {
                if let Some(list) = director.list(id)
                    && list.trigger_time > 0.0
                {
                    issues.push(ValidationIssue::warning(
                        &subject,
                        format!(
                            "option {index} '{}' runs {id}, which waits {}s for normal state",
                            option.label, list.trigger_time
                        ),
                    ));
                }
            }
        }
    }

    if let Some(default) = conversation.default_option
        && default >= conversation.options.len()
    {
        issues.push(ValidationIssue::error(
            &subject,
            format!(
                "default option {default} is out of range ({} options)",
                conversation.options.len()
            ),
        ));
    }
    if conversation.timed {
        if conversation.timer <= 0.0 {
            issues.push(ValidationIssue::error(
                &subject,
                format!("timer must be positive, got {}", conversation.timer),
            ));
        }
        if conversation.default_option.is_none() {
            issues.push(ValidationIssue::warning(
                &subject,
                "is timed but has no default option",
            ));
        }
    }
}
