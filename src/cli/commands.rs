//! Command implementations for the glossa CLI.

use std::sync::Arc;

use log::{info, warn};

use crate::cache::DefinitionCache;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::engine::LookupEngine;
use crate::error::Result;
use crate::lexicon::{BuiltinLexicon, Lexicon, MemoryLexicon};
use crate::spelling::{SimilarityMeasure, VariationConfig, VariationGenerator};

/// Execute a CLI command.
pub fn execute_command(args: GlossaArgs) -> Result<()> {
    let engine = build_engine(&args)?;

    match &args.command {
        Command::Lookup(lookup_args) => lookup_words(&engine, lookup_args, &args),
        Command::Words(words_args) => list_words(&engine, words_args, &args),
        Command::Variations(variations_args) => {
            show_variations(&engine, variations_args, &args)
        }
        Command::Score(score_args) => score_candidates(&engine, score_args, &args),
        Command::Stats(stats_args) => show_stats(&engine, stats_args, &args),
    }
}

/// Build and seed the engine described by the global arguments.
pub fn build_engine(args: &GlossaArgs) -> Result<LookupEngine> {
    let config = match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            EngineConfig::load_from_file(path)?
        }
        None => EngineConfig::default(),
    };

    let lexicon: Arc<dyn Lexicon> = match &args.lexicon {
        Some(path) => {
            info!("loading lexicon from {}", path.display());
            Arc::new(MemoryLexicon::load_from_file(path)?)
        }
        None => Arc::new(BuiltinLexicon::computing()?),
    };

    let engine = LookupEngine::from_config(config, lexicon)?;

    if !args.no_seed {
        // A failed seed leaves an empty cache; lookups still work.
        if let Err(e) = engine.initialize() {
            warn!("seeding failed: {e}");
        }
    }

    Ok(engine)
}

/// Look up each word in order.
fn lookup_words(engine: &LookupEngine, args: &LookupArgs, cli_args: &GlossaArgs) -> Result<()> {
    let results = args
        .words
        .iter()
        .map(|word| LookupOutcome {
            query: word.clone(),
            result: engine.lookup(word),
        })
        .collect();

    output_result("Lookup results", &LookupReport { results }, cli_args)
}

/// List known words.
fn list_words(engine: &LookupEngine, args: &WordsArgs, cli_args: &GlossaArgs) -> Result<()> {
    let mut words = engine.word_list();

    if let Some(prefix) = &args.prefix {
        let prefix = prefix.to_lowercase();
        words.retain(|w| w.to_lowercase().starts_with(&prefix));
    }
    words.sort();
    if let Some(limit) = args.limit {
        words.truncate(limit);
    }

    output_result(
        "Known words",
        &WordList {
            total: words.len(),
            words,
        },
        cli_args,
    )
}

/// Show the variants of a word.
fn show_variations(
    engine: &LookupEngine,
    args: &VariationsArgs,
    cli_args: &GlossaArgs,
) -> Result<()> {
    let word = engine.normalizer().normalize(&args.word);
    let variations = match args.max {
        Some(max) => VariationGenerator::with_config(VariationConfig {
            max_variations: max,
            ..engine.variations().config().clone()
        })
        .generate(&word),
        None => engine.variations().generate(&word),
    };

    output_result(
        "Spelling variations",
        &VariationList { word, variations },
        cli_args,
    )
}

/// Score candidates, or the cached words, against a query.
fn score_candidates(engine: &LookupEngine, args: &ScoreArgs, cli_args: &GlossaArgs) -> Result<()> {
    let candidates = if args.candidates.is_empty() {
        engine.cache().all_words()
    } else {
        args.candidates.clone()
    };

    let matcher = engine.matcher();
    let cache: &DefinitionCache = engine.cache();
    let query = args.query.to_lowercase();

    let matches = matcher
        .score(&query, &candidates, cache, args.limit)
        .into_iter()
        .map(|scored| {
            let lower = scored.text.to_lowercase();
            ScoreRow {
                ratio: SimilarityMeasure::Ratio.score(&query, &lower),
                partial_ratio: SimilarityMeasure::PartialRatio.score(&query, &lower),
                token_sort_ratio: SimilarityMeasure::TokenSortRatio.score(&query, &lower),
                token_set_ratio: SimilarityMeasure::TokenSetRatio.score(&query, &lower),
                frequency: cache.frequency(&lower),
                score: scored.score,
                candidate: scored.text,
            }
        })
        .collect();

    output_result(
        "Fuzzy matches",
        &ScoreReport {
            query,
            threshold: matcher.config().threshold,
            matches,
        },
        cli_args,
    )
}

/// Show cache statistics.
fn show_stats(engine: &LookupEngine, args: &StatsArgs, cli_args: &GlossaArgs) -> Result<()> {
    let report = StatsReport {
        stats: engine.stats(),
        most_frequent: engine.cache().most_frequent(args.top),
    };

    output_result("Engine statistics", &report, cli_args)
}
