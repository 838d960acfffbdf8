//! Output formatting for CLI commands.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::args::{KumoArgs, OutputFormat};
use crate::error::Result;
use crate::pipeline::RunSummary;

/// Result structure for database initialization.
#[derive(Debug, Serialize, Deserialize)]
pub struct InitDbResult {
    pub path: PathBuf,
    pub documents: usize,
}

/// Output a run summary in the specified format.
pub fn output_summary(summary: &RunSummary, args: &KumoArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", format_summary_human(summary, args.verbosity()));
            Ok(())
        }
        OutputFormat::Json => output_json(summary, args),
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &KumoArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Render a run summary as aligned `word count` lines followed by totals.
pub fn format_summary_human(summary: &RunSummary, verbosity: u8) -> String {
    let mut out = String::new();

    if verbosity > 0 {
        out.push_str(&format!(
            "Source: {} ({} documents, {:?} aggregation)\n",
            summary.source, summary.documents, summary.aggregation
        ));
        out.push_str("══════════════════════\n");
    }

    let width = summary
        .ranked
        .iter()
        .map(|entry| entry.word.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);
    for (rank, entry) in summary.ranked.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<width$} {}\n",
            rank + 1,
            entry.word,
            entry.count,
            width = width
        ));
    }

    if verbosity > 0 {
        out.push('\n');
        out.push_str(&format!(
            "Ranked {} of {} distinct words\n",
            summary.ranked.len(),
            summary.distinct_words
        ));
        if let Some(output) = &summary.output {
            out.push_str(&format!("Wrote {}\n", output.display()));
        }
    }

    out
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &KumoArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    output_generic_human(&value, args)
}

/// Generic human output for any JSON value.
fn output_generic_human(value: &serde_json::Value, _args: &KumoArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::String(s) => println!("{key}: {s}"),
                    other => println!("{key}: {other}"),
                }
            }
        }
        _ => println!("{value}"),
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &KumoArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{FrequencyMap, select_top_k};
    use crate::pipeline::Aggregation;

    fn summary() -> RunSummary {
        let counts: FrequencyMap = [("東京", 3usize), ("猫", 1)].into_iter().collect();
        RunSummary {
            source: "csv".to_string(),
            aggregation: Aggregation::Corpus,
            documents: 1,
            distinct_words: counts.len(),
            ranked: select_top_k(&counts, 10).unwrap(),
            output: Some(PathBuf::from("csvWordCloud.png")),
        }
    }

    #[test]
    fn test_quiet_summary_lists_words_only() {
        let text = format_summary_human(&summary(), 0);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("東京"));
        assert!(lines[0].ends_with('3'));
        assert!(lines[1].contains("猫"));
    }

    #[test]
    fn test_verbose_summary_has_totals() {
        let text = format_summary_human(&summary(), 1);

        assert!(text.starts_with("Source: csv"));
        assert!(text.contains("Ranked 2 of 2 distinct words"));
        assert!(text.contains("Wrote csvWordCloud.png"));
    }

    #[test]
    fn test_summary_serializes_ranked_entries() {
        let value = serde_json::to_value(summary()).unwrap();

        assert_eq!(value["ranked"]["entries"][0]["word"], "東京");
        assert_eq!(value["ranked"]["entries"][0]["count"], 3);
        assert_eq!(value["aggregation"], "corpus");
    }
}
