use std::path::Path;

use colored::Colorize;
use regie_script::{DirectorConfig, ValidationIssue};

use crate::scenario::Scenario;

pub fn run(path: &Path) -> Result<(), String> {
    let scenario = Scenario::load(path)?;
    let director = scenario.director(DirectorConfig::default());

    let mut issues = regie_script::validate(&director);
    for (index, step) in scenario.input.iter().enumerate() {
        let subject = format!("input {index}");
        if let Some(list) = step.command.list()
            && director.list(list).is_none()
        {
            issues.push(ValidationIssue {
                subject,
                message: format!("'{}' refers to unknown {list}", step.command),
                is_error: true,
            });
        } else if step.at < 0.0 {
            issues.push(ValidationIssue {
                subject,
                message: format!(
                    "'{}' is scheduled at {}s, before the run starts",
                    step.command, step.at
                ),
                is_error: false,
            });
        }
    }

    for issue in &issues {
        let level = if issue.is_error {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        };
        eprintln!("  {level}: {}: {}", issue.subject, issue.message);
    }

    let errors = issues.iter().filter(|i| i.is_error).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        eprintln!(
            "  {}, {}",
            super::plural(errors, "error"),
            super::plural(warnings, "warning")
        );
        return Err("check failed with errors".into());
    }

    println!("  All checks passed for '{}'.", scenario.name);
    println!(
        "  {}, {}, {}",
        super::plural(director.lists().len(), "list"),
        super::plural(director.conversations().len(), "conversation"),
        super::plural(warnings, "warning")
    );
    Ok(())
}
