use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use regie_script::{
    Action, ActionKind, ActionList, Conversation, DirectorConfig, ResultAction, VariableCheck,
};

use crate::scenario::Scenario;

pub fn run(path: &Path) -> Result<(), String> {
    let scenario = Scenario::load(path)?;
    let director = scenario.director(DirectorConfig::default());

    println!(
        "  {} '{}' {}",
        "Scenario".bold(),
        scenario.name,
        format!(
            "({}, {})",
            super::plural(director.lists().len(), "list"),
            super::plural(director.conversations().len(), "conversation")
        )
        .dimmed()
    );
    println!();

    if director.lists().is_empty() {
        println!("  {}", "(no lists)".dimmed());
    }
    for list in director.lists() {
        print_list(list);
    }
    for conversation in director.conversations() {
        print_conversation(conversation);
    }

    Ok(())
}

fn print_list(list: &ActionList) {
    let mut flags = vec![list.kind.to_string()];
    if list.trigger_time > 0.0 {
        flags.push(format!("starts after {}s", list.trigger_time));
    }
    if list.autosave_after {
        flags.push("autosaves".to_string());
    }
    if !list.enabled {
        flags.push("disabled".to_string());
    }
    println!(
        "  {} '{}' [{}]",
        list.id().to_string().bold(),
        list.name,
        flags.join(", ").dimmed()
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Action", "Details", "Then"]);
    for (index, action) in list.actions.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            action.kind.name().to_string(),
            describe(action),
            then(action),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_conversation(conversation: &Conversation) {
    let mut flags = vec![super::plural(conversation.options.len(), "option")];
    if conversation.timed {
        flags.push(format!("timed {}s", conversation.timer));
    }
    if let Some(default) = conversation.default_option {
        flags.push(format!("default {default}"));
    }
    println!(
        "  {} '{}' [{}]",
        conversation.id().to_string().bold(),
        conversation.name,
        flags.join(", ").dimmed()
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Label", "Runs", "Shown", "Locked", "Returns"]);
    for (index, option) in conversation.options.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            option.label.clone(),
            option
                .list
                .map(|l| l.to_string())
                .unwrap_or_else(|| "--".to_string()),
            yes_no(option.is_on),
            yes_no(option.is_locked),
            yes_no(option.return_to_conversation),
        ]);
    }
    println!("{table}");
    println!();
}

fn describe(action: &Action) -> String {
    let details = match &action.kind {
        ActionKind::Wait { seconds } => format!("{seconds}s"),
        ActionKind::Effect { call } => {
            if call.args.is_empty() {
                format!("{} on {}", call.effect, call.target)
            } else {
                format!("{} on {} ({} args)", call.effect, call.target, call.args.len())
            }
        }
        ActionKind::Speech {
            speaker,
            text,
            background,
        } => {
            let line = match speaker {
                Some(speaker) => format!("{speaker}: \"{text}\""),
                None => format!("\"{text}\""),
            };
            if *background {
                format!("{line} (background)")
            } else {
                line
            }
        }
        ActionKind::SetVariable {
            variable,
            value,
            cumulative,
        } => {
            let op = if *cumulative { "+=" } else { "=" };
            format!("{variable} {op} {value}")
        }
        ActionKind::CheckVariable {
            variable, check, ..
        } => match check {
            VariableCheck::Integer { condition, value } => {
                format!("{variable} {condition:?} {value}")
            }
            VariableCheck::Boolean { condition, value } => {
                format!("{variable} {condition:?} {value}")
            }
        },
        ActionKind::CheckInventory { item, count, .. } => match count {
            Some(count) => format!("{item} count {:?} {}", count.condition, count.value),
            None => format!("{item} held"),
        },
        ActionKind::CheckScene {
            scene, condition, ..
        } => format!("previous scene {condition:?} {scene}"),
        ActionKind::SendMessage { target, message } => format!("{message} to {target}"),
        ActionKind::StartConversation { conversation } => conversation.to_string(),
        ActionKind::ChangeScene { scene } => scene.to_string(),
        ActionKind::PlayerLock { .. } => "player constraints".to_string(),
        ActionKind::Timescale { scale } => format!("x{scale}"),
    };
    if action.will_wait {
        format!("{details}, waits")
    } else {
        details
    }
}

/// Where the list goes after the action.
fn then(action: &Action) -> String {
    match action.kind.branch() {
        Some(branch) => format!(
            "true: {}, false: {}",
            result_label(&branch.on_true),
            result_label(&branch.on_false)
        ),
        None => result_label(&action.end),
    }
}

fn result_label(result: &ResultAction) -> String {
    match result {
        ResultAction::Continue => "continue".to_string(),
        ResultAction::Stop => "stop".to_string(),
        ResultAction::Skip(index) => format!("skip to {index}"),
        ResultAction::RunCutscene(Some(list)) => format!("run {list}"),
        ResultAction::RunCutscene(None) => "run (none)".to_string(),
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}
