//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cache::DefinitionEntry;
use crate::cli::args::{GlossaArgs, OutputFormat};
use crate::engine::{EngineStats, SearchResult};
use crate::error::Result;

/// Results that know how to print themselves for a terminal.
pub trait HumanOutput {
    fn print_human(&self, args: &GlossaArgs);
}

/// One looked-up word and its outcome.
#[derive(Debug, Serialize)]
pub struct LookupOutcome {
    pub query: String,
    #[serde(flatten)]
    pub result: SearchResult,
}

/// Results of a lookup command.
#[derive(Debug, Serialize)]
pub struct LookupReport {
    pub results: Vec<LookupOutcome>,
}

/// Known words.
#[derive(Debug, Serialize)]
pub struct WordList {
    pub total: usize,
    pub words: Vec<String>,
}

/// Spelling variants of a word.
#[derive(Debug, Serialize)]
pub struct VariationList {
    pub word: String,
    pub variations: Vec<String>,
}

/// Per-measure breakdown of a scored candidate.
#[derive(Debug, Serialize)]
pub struct ScoreRow {
    pub candidate: String,
    pub ratio: f64,
    pub partial_ratio: f64,
    pub token_sort_ratio: f64,
    pub token_set_ratio: f64,
    pub frequency: u64,
    pub score: f64,
}

/// Results of a score command.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub query: String,
    pub threshold: f64,
    pub matches: Vec<ScoreRow>,
}

/// Engine statistics with the busiest words.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub stats: EngineStats,
    pub most_frequent: Vec<DefinitionEntry>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &GlossaArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Csv => output_csv(result),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &GlossaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Output in CSV format.
///
/// The first array found at the top level becomes the rows; an object
/// without arrays is written as key-value pairs.
fn output_csv<T: Serialize>(result: &T) -> Result<()> {
    let value = serde_json::to_value(result)?;

    let rows = match &value {
        serde_json::Value::Array(arr) => Some(arr),
        serde_json::Value::Object(obj) => obj.values().find_map(|v| v.as_array()),
        _ => None,
    };

    match rows {
        Some(rows) => {
            for (i, item) in rows.iter().enumerate() {
                match item.as_object() {
                    Some(obj) => {
                        if i == 0 {
                            let headers: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
                            println!("{}", headers.join(","));
                        }
                        let values: Vec<String> = obj.values().map(format_csv_value).collect();
                        println!("{}", values.join(","));
                    }
                    None => {
                        if i == 0 {
                            println!("value");
                        }
                        println!("{}", format_csv_value(item));
                    }
                }
            }
        }
        None => {
            println!("key,value");
            if let Some(obj) = value.as_object() {
                for (key, val) in obj {
                    println!("{key},{}", format_csv_value(val));
                }
            }
        }
    }

    Ok(())
}

impl HumanOutput for LookupReport {
    fn print_human(&self, _args: &GlossaArgs) {
        for (i, outcome) in self.results.iter().enumerate() {
            if i > 0 {
                println!();
            }
            match &outcome.result {
                SearchResult::ExactMatch {
                    word,
                    meaning,
                    normalized_from,
                } => {
                    match normalized_from {
                        Some(from) => println!("{word} (from \"{from}\")"),
                        None => println!("{word}"),
                    }
                    println!("─────────────");
                    for definition in meaning.split("; ") {
                        println!("  • {definition}");
                    }
                }
                SearchResult::Suggestions { suggestions } if suggestions.is_empty() => {
                    println!("No match for \"{}\"", outcome.query);
                }
                SearchResult::Suggestions { suggestions } => {
                    println!("No exact match for \"{}\". Did you mean:", outcome.query);
                    for (rank, suggestion) in suggestions.iter().enumerate() {
                        println!("  {}. {suggestion}", rank + 1);
                    }
                }
            }
        }
    }
}

impl HumanOutput for WordList {
    fn print_human(&self, args: &GlossaArgs) {
        for word in &self.words {
            println!("{word}");
        }
        if args.verbosity() > 1 {
            println!();
            println!("Total words: {}", self.total);
        }
    }
}

impl HumanOutput for VariationList {
    fn print_human(&self, _args: &GlossaArgs) {
        println!("Variations of \"{}\":", self.word);
        for variation in &self.variations {
            println!("  {variation}");
        }
    }
}

impl HumanOutput for ScoreReport {
    fn print_human(&self, _args: &GlossaArgs) {
        if self.matches.is_empty() {
            println!(
                "No candidate scored above {:.1} for \"{}\"",
                self.threshold, self.query
            );
            return;
        }

        println!(
            "{:<20} {:>7} {:>7} {:>7} {:>7} {:>5} {:>7}",
            "candidate", "ratio", "partial", "sort", "set", "freq", "score"
        );
        for row in &self.matches {
            println!(
                "{:<20} {:>7.1} {:>7.1} {:>7.1} {:>7.1} {:>5} {:>7.2}",
                row.candidate,
                row.ratio,
                row.partial_ratio,
                row.token_sort_ratio,
                row.token_set_ratio,
                row.frequency,
                row.score
            );
        }
    }
}

impl HumanOutput for StatsReport {
    fn print_human(&self, _args: &GlossaArgs) {
        println!("Cache Statistics:");
        println!("════════════════");
        println!("Cached words: {}", self.stats.cached_words);
        match self.stats.capacity {
            Some(capacity) => println!("Capacity: {capacity} ({})", self.stats.eviction_policy),
            None => println!("Capacity: unbounded"),
        }
        println!("Total accesses: {}", self.stats.total_accesses);
        println!("Evictions: {}", self.stats.evictions);
        println!("Lexicon: {}", self.stats.lexicon);
        println!("Lemmatizer: {}", self.stats.lemmatizer);

        if !self.most_frequent.is_empty() {
            println!();
            println!("Most Frequent:");
            println!("─────────────");
            for entry in &self.most_frequent {
                println!("  {:<20} {}", entry.word, entry.access_count);
            }
        }
    }
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format a JSON value for CSV output.
fn format_csv_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                let escaped = s.replace('"', "\"\"");
                format!("\"{escaped}\"")
            } else {
                s.clone()
            }
        }
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join("; ");
            format!("\"[{formatted_values}]\"")
        }
        serde_json::Value::Object(_) => "\"[object]\"".to_string(),
        serde_json::Value::Null => "".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_csv_value() {
        assert_eq!(
            format_csv_value(&serde_json::Value::String("python".to_string())),
            "python"
        );
        assert_eq!(
            format_csv_value(&serde_json::Value::String("boas, snakes".to_string())),
            "\"boas, snakes\""
        );
        assert_eq!(
            format_csv_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_csv_value(&serde_json::Value::Bool(true)), "true");
        assert_eq!(format_csv_value(&serde_json::Value::Null), "");
    }

    #[test]
    fn test_format_value_arrays() {
        let value = serde_json::json!(["python", "pylon"]);
        assert_eq!(format_value(&value), "[python, pylon]");
        assert_eq!(format_csv_value(&value), "\"[python; pylon]\"");
    }

    #[test]
    fn test_lookup_outcome_flattens_result() {
        let outcome = LookupOutcome {
            query: "pyhton".to_string(),
            result: SearchResult::Suggestions {
                suggestions: vec!["python".to_string()],
            },
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "query": "pyhton",
                "exact_match": false,
                "suggestions": ["python"]
            })
        );
    }
}
