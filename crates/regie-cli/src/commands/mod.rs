pub mod check;
pub mod run;
pub mod show;

/// "1 error", "2 errors".
fn plural(count: usize, noun: &str) -> String {
    format!("{count} {noun}{}", if count == 1 { "" } else { "s" })
}
