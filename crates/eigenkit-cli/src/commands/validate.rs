use anyhow::Result;
use eigenkit_validate::{ComparisonConfig, run_builtin_suite};

use super::print_json;

/// Run the built-in validation suite. Returns whether every case passed.
pub fn run_validate(filter: Option<&str>, json_output: bool) -> Result<bool> {
    let summary = run_builtin_suite(filter, &ComparisonConfig::default());

    if json_output {
        print_json(&serde_json::to_value(&summary)?)?;
        return Ok(summary.all_passed());
    }

    for report in &summary.reports {
        print!("{}", report.to_text());
    }
    for failure in summary.failures.iter().filter(|f| f.message.starts_with("Error:")) {
        println!("{}: {}", failure.name, failure.message);
    }

    println!();
    println!("{}/{} cases passed", summary.passed, summary.total);
    Ok(summary.all_passed())
}
