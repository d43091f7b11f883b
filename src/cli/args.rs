//! Command line argument parsing for the glossa CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Glossa - a typo-tolerant dictionary lookup engine
#[derive(Parser, Debug, Clone)]
#[command(name = "glossa")]
#[command(about = "Look up words with typo tolerance and ranked suggestions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GlossaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Lexicon file (JSON); the built-in computing lexicon is used otherwise
    #[arg(short, long, value_name = "LEXICON_FILE")]
    pub lexicon: Option<PathBuf>,

    /// Start with an empty cache instead of resolving the seed words
    #[arg(long)]
    pub no_seed: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl GlossaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Look up one or more words
    Lookup(LookupArgs),

    /// List known words
    Words(WordsArgs),

    /// Show the spelling variants generated for a word
    Variations(VariationsArgs),

    /// Score candidates against a query with the fuzzy matcher
    Score(ScoreArgs),

    /// Show cache statistics
    Stats(StatsArgs),
}

/// Arguments for looking up words
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Words to look up, in order
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for listing words
#[derive(Parser, Debug, Clone)]
pub struct WordsArgs {
    /// Only list words starting with this prefix
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Maximum number of words to list
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for generating variations
#[derive(Parser, Debug, Clone)]
pub struct VariationsArgs {
    /// Word to vary
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Override the configured number of variants
    #[arg(short = 'n', long)]
    pub max: Option<usize>,
}

/// Arguments for scoring candidates
#[derive(Parser, Debug, Clone)]
pub struct ScoreArgs {
    /// Query word
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Candidate words; the cached words are used when none are given
    #[arg(value_name = "CANDIDATE")]
    pub candidates: Vec<String>,

    /// Maximum number of matches to return
    #[arg(short = 'n', long, default_value = "5")]
    pub limit: usize,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Number of most frequently accessed words to show
    #[arg(short, long, default_value = "10")]
    pub top: usize,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// CSV output (for flat results)
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity() {
        let args = GlossaArgs::try_parse_from(["glossa", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = GlossaArgs::try_parse_from(["glossa", "-vv", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = GlossaArgs::try_parse_from(["glossa", "-q", "-vvv", "stats"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_lookup_words() {
        let args =
            GlossaArgs::try_parse_from(["glossa", "--no-seed", "lookup", "pyhton", "java"])
                .unwrap();
        assert!(args.no_seed);

        if let Command::Lookup(lookup_args) = args.command {
            assert_eq!(lookup_args.words, vec!["pyhton", "java"]);
        } else {
            panic!("Expected Lookup command");
        }
    }

    #[test]
    fn test_lookup_requires_word() {
        assert!(GlossaArgs::try_parse_from(["glossa", "lookup"]).is_err());
    }

    #[test]
    fn test_output_format() {
        let args = GlossaArgs::try_parse_from(["glossa", "--format", "json", "words"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }

    #[test]
    fn test_score_defaults() {
        let args = GlossaArgs::try_parse_from(["glossa", "score", "pythn", "python", "pylon"])
            .unwrap();

        if let Command::Score(score_args) = args.command {
            assert_eq!(score_args.query, "pythn");
            assert_eq!(score_args.candidates, vec!["python", "pylon"]);
            assert_eq!(score_args.limit, 5);
        } else {
            panic!("Expected Score command");
        }
    }

    #[test]
    fn test_files() {
        let args = GlossaArgs::try_parse_from([
            "glossa",
            "--config",
            "/etc/glossa.json",
            "--lexicon",
            "/srv/lexicon.json",
            "stats",
            "--top",
            "3",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/etc/glossa.json")));
        assert_eq!(args.lexicon, Some(PathBuf::from("/srv/lexicon.json")));
        if let Command::Stats(stats_args) = args.command {
            assert_eq!(stats_args.top, 3);
        } else {
            panic!("Expected Stats command");
        }
    }
}
