use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use regie_script::{DirectorConfig, ScriptEventKind, TimedStage};

use crate::scenario::Scenario;

pub struct RunOptions {
    pub dt: f32,
    pub seconds: f32,
    pub ticks: Option<u64>,
    pub max_events: usize,
    pub verbose: bool,
}

pub fn run(path: &Path, options: &RunOptions) -> Result<(), String> {
    if options.dt <= 0.0 {
        return Err(format!("--dt must be positive, got {}", options.dt));
    }
    let scenario = Scenario::load(path)?;
    let ticks = options
        .ticks
        .unwrap_or_else(|| (options.seconds.max(0.0) / options.dt).ceil() as u64);

    let config = DirectorConfig::default().with_max_events(options.max_events);
    let mut director = scenario.director(config);

    let mut input = scenario.input.iter().peekable();
    for tick in 0..=ticks {
        let now = director.clock().real_elapsed();
        while let Some(step) = input.next_if(|s| f64::from(s.at) <= now + 1e-6) {
            director.annotate(format!("host: {}", step.command));
            step.command
                .apply(&mut director)
                .map_err(|e| format!("input at {}s ({}): {e}", step.at, step.command))?;
        }
        if tick < ticks {
            director.tick(options.dt);
        }
    }
    let skipped = input.count();

    // Header
    println!(
        "  {} '{}' {}",
        "Scenario".bold(),
        scenario.name,
        format!(
            "({ticks} ticks of {}s, {:.2}s game time)",
            options.dt,
            director.clock().elapsed()
        )
        .dimmed()
    );
    println!(
        "  {} logged, final state {}",
        super::plural(director.events().len(), "event"),
        director.world().game_state
    );
    if skipped > 0 {
        println!(
            "  {} {} scheduled after the end of the run",
            "WARN".yellow().bold(),
            super::plural(skipped, "input")
        );
    }
    println!();

    // Events
    println!("  {}", "Event Log".bold().underline());
    println!();
    let mut shown = 0;
    for event in director.events().events() {
        if !options.verbose && is_step_event(&event.kind) {
            continue;
        }
        let time = format!("[{:>7.2}s]", event.time).dimmed();
        println!("  {time} {}", colorize_event(&event.kind, &event.description));
        shown += 1;
    }
    if shown == 0 {
        println!("  {}", "(no events)".dimmed());
    }
    println!();

    // Variables
    if !director.world().variables.is_empty() {
        println!("  {}", "Variables".bold().underline());
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Variable", "Label", "Kind", "Value"]);
        for variable in director.world().variables.iter() {
            table.add_row(vec![
                variable.id.to_string(),
                variable.label.clone(),
                variable.kind.to_string(),
                variable.value.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    // Lists
    if !director.lists().is_empty() {
        println!("  {}", "Lists".bold().underline());
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["List", "Name", "Cursor", "Phase", "Enabled"]);
        for list in director.lists() {
            table.add_row(vec![
                list.id().to_string(),
                list.name.clone(),
                list.cursor().to_string(),
                format!("{:?}", list.phase()),
                if list.enabled { "yes" } else { "no" }.to_string(),
            ]);
        }
        println!("{table}");
        println!();
    }

    if let Some(stage) = director.stage_as::<TimedStage>() {
        println!(
            "  stage: {}, {}",
            super::plural(stage.calls().len(), "call"),
            super::plural(stage.autosave_count(), "autosave")
        );
    }

    Ok(())
}

fn is_step_event(kind: &ScriptEventKind) -> bool {
    matches!(
        kind,
        ScriptEventKind::ActionStarted { .. }
            | ScriptEventKind::ActionPolled { .. }
            | ScriptEventKind::ActionEnded { .. }
    )
}

fn colorize_event(kind: &ScriptEventKind, description: &str) -> colored::ColoredString {
    match kind {
        ScriptEventKind::ListStarted { .. } => description.green(),
        ScriptEventKind::ListEnded { .. } => description.cyan(),
        ScriptEventKind::ListKilled { .. } => description.red(),
        ScriptEventKind::ActionStarted { .. }
        | ScriptEventKind::ActionPolled { .. }
        | ScriptEventKind::ActionEnded { .. } => description.dimmed(),
        ScriptEventKind::GameStateChanged { .. } => description.yellow(),
        ScriptEventKind::ConversationOpened { .. }
        | ScriptEventKind::ConversationClosed { .. }
        | ScriptEventKind::OptionChosen { .. }
        | ScriptEventKind::ConversationTimedOut { .. } => description.magenta(),
        ScriptEventKind::AutosaveRequested { .. } => description.blue(),
        ScriptEventKind::VariableChanged { .. }
        | ScriptEventKind::SceneChanged { .. }
        | ScriptEventKind::MessageSent { .. } => description.normal(),
        ScriptEventKind::Custom { .. } => description.bold(),
    }
}
