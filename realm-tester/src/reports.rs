use colored::Colorize;
use std::time::Duration;

use crate::scenarios::ScenarioResult;

pub fn console_report(results: &[ScenarioResult], total_duration: Duration) {
    println!();
    println!("{}", "📊 Story QA Summary".bright_cyan().bold());
    println!("{}", "===================".cyan());

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    println!("Total runs: {total}");
    println!("Passed: {}", passed.to_string().green());
    println!("Failed: {}", failed.to_string().red());
    println!("Total time: {total_duration:?}");
    println!();

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        println!(
            "{status} {} (seed {}) [{:?}]",
            result.name, result.seed, result.duration
        );
        for failure in &result.failures {
            println!("    {} {failure}", "↳".red());
        }
    }
    println!();
}

pub fn json_report(results: &[ScenarioResult]) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
}
