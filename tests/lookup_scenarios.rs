//! End-to-end lookup scenarios against the built-in lexicon and test doubles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use glossa::config::EngineConfig;
use glossa::engine::{LookupEngine, SearchResult};
use glossa::error::{GlossaError, Result};
use glossa::lexicon::{BuiltinLexicon, Lexicon, MemoryLexicon, Sense, SenseRecord};

/// Lexicon that counts every call it receives.
struct CountingLexicon {
    inner: MemoryLexicon,
    calls: AtomicUsize,
}

impl CountingLexicon {
    fn new(inner: MemoryLexicon) -> Self {
        CountingLexicon {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Lexicon for CountingLexicon {
    fn senses_of(&self, word: &str) -> Result<Vec<Sense>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.senses_of(word)
    }

    fn broader(&self, sense: &Sense) -> Result<Vec<Sense>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.broader(sense)
    }

    fn narrower(&self, sense: &Sense) -> Result<Vec<Sense>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.narrower(sense)
    }

    fn all_senses(&self) -> Result<Box<dyn Iterator<Item = Sense> + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.all_senses()
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Lexicon whose backend is always down.
struct UnavailableLexicon;

impl Lexicon for UnavailableLexicon {
    fn senses_of(&self, word: &str) -> Result<Vec<Sense>> {
        Err(anyhow::anyhow!("backend unavailable while resolving '{word}'").into())
    }

    fn broader(&self, _sense: &Sense) -> Result<Vec<Sense>> {
        Err(GlossaError::lexicon("backend unavailable"))
    }

    fn narrower(&self, _sense: &Sense) -> Result<Vec<Sense>> {
        Err(GlossaError::lexicon("backend unavailable"))
    }

    fn all_senses(&self) -> Result<Box<dyn Iterator<Item = Sense> + '_>> {
        Err(GlossaError::lexicon("backend unavailable"))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

fn seeded_engine() -> Result<LookupEngine> {
    let engine = LookupEngine::new(Arc::new(BuiltinLexicon::computing()?))?;
    engine.initialize()?;
    Ok(engine)
}

fn record(id: &str, definition: &str, lemmas: &[&str]) -> SenseRecord {
    SenseRecord {
        id: id.to_string(),
        definition: definition.to_string(),
        lemmas: lemmas.iter().map(|l| l.to_string()).collect(),
        broader: vec![],
        narrower: vec![],
    }
}

#[test]
fn test_exact_match_after_seed() -> Result<()> {
    let engine = seeded_engine()?;

    match engine.lookup("python") {
        SearchResult::ExactMatch {
            word,
            meaning,
            normalized_from,
        } => {
            assert_eq!(word, "python");
            assert!(!meaning.is_empty());
            assert!(meaning.contains("; "));
            assert_eq!(normalized_from, None);
        }
        other => panic!("expected exact match, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_case_and_whitespace_insensitive() -> Result<()> {
    let engine = seeded_engine()?;

    assert_eq!(engine.lookup("PYTHON"), engine.lookup("python"));

    let result = engine.lookup("  javascript  ");
    assert_eq!(result.word(), Some("javascript"));
    assert!(result.is_exact());

    Ok(())
}

#[test]
fn test_adjacent_swap_suggests_intended_word() -> Result<()> {
    let engine = seeded_engine()?;

    match engine.lookup("pyhton") {
        SearchResult::ExactMatch { word, .. } => assert_eq!(word, "python"),
        SearchResult::Suggestions { suggestions } => {
            assert!(suggestions.contains(&"python".to_string()));
        }
    }

    Ok(())
}

#[test]
fn test_common_typos_suggest_intended_word() -> Result<()> {
    let engine = seeded_engine()?;

    let cases = [
        ("javscript", "javascript"),
        ("datbase", "database"),
        ("intrface", "interface"),
        ("sekurity", "security"),
        ("authntication", "authentication"),
    ];

    for (typo, intended) in cases {
        let result = engine.lookup(typo);
        assert!(!result.is_exact(), "'{typo}' should not resolve");
        assert_eq!(
            result.suggestions().first().map(String::as_str),
            Some(intended),
            "best suggestion for '{typo}'"
        );
    }

    Ok(())
}

#[test]
fn test_doubled_letter_resolves_through_variant() -> Result<()> {
    let engine = seeded_engine()?;

    let result = engine.lookup("programmming");
    assert_eq!(result.word(), Some("programming"));
    assert!(matches!(
        result,
        SearchResult::ExactMatch { normalized_from: Some(ref from), .. } if from == "programmming"
    ));
    assert!(!engine.cache().contains("programmming"));

    Ok(())
}

#[test]
fn test_normalized_forms() -> Result<()> {
    let engine = seeded_engine()?;

    let result = engine.lookup("data-base");
    assert_eq!(result.word(), Some("database"));

    let result = engine.lookup("mice");
    assert!(matches!(
        result,
        SearchResult::ExactMatch { ref word, normalized_from: Some(ref from), .. }
            if word == "mouse" && from == "mice"
    ));

    Ok(())
}

#[test]
fn test_plural_reaches_cached_singular() -> Result<()> {
    let engine = seeded_engine()?;
    let seeded = engine.cache().peek("cookie");

    match engine.lookup("cookies") {
        SearchResult::ExactMatch {
            word,
            meaning,
            normalized_from,
        } => {
            assert_eq!(word, "cookie");
            assert_eq!(normalized_from.as_deref(), Some("cookies"));
            assert!(meaning.contains("sweet cakes"));
            assert!(meaning.contains("browser"));
            assert_eq!(Some(meaning), seeded);
        }
        other => panic!("expected exact match, got {other:?}"),
    }
    assert_eq!(engine.frequency("cookie"), 2);
    assert!(!engine.cache().contains("cooky"));
    assert!(!engine.cache().contains("cookies"));

    Ok(())
}

#[test]
fn test_empty_input_skips_lexicon() -> Result<()> {
    let lexicon = Arc::new(CountingLexicon::new(BuiltinLexicon::computing()?));
    let engine = LookupEngine::new(lexicon.clone())?;

    for input in ["", "   ", "?!.", "\t\n"] {
        assert_eq!(engine.lookup(input), SearchResult::none());
    }
    assert_eq!(lexicon.calls(), 0);

    engine.lookup("python");
    assert!(lexicon.calls() > 0);

    Ok(())
}

#[test]
fn test_frequency_increases_on_repeat() -> Result<()> {
    let engine = LookupEngine::new(Arc::new(BuiltinLexicon::computing()?))?;

    engine.lookup("python");
    assert_eq!(engine.frequency("python"), 1);

    engine.lookup("python");
    assert_eq!(engine.frequency("python"), 2);

    Ok(())
}

#[test]
fn test_unavailable_lexicon_is_recovered() -> Result<()> {
    let engine = LookupEngine::new(Arc::new(UnavailableLexicon))?;

    assert!(engine.initialize().is_err());
    assert_eq!(engine.lookup("python"), SearchResult::none());
    assert!(engine.word_list().is_empty());

    engine.cache().put("python", "a programming language")?;
    assert_eq!(
        engine.lookup("pythn").suggestions(),
        &["python".to_string()]
    );
    assert!(engine.lookup("python").is_exact());

    Ok(())
}

#[test]
fn test_suggestions_never_exceed_five() -> Result<()> {
    let engine = seeded_engine()?;

    for query in [
        "pyhton",
        "algorythm",
        "networc",
        "computr progrm",
        "servr",
        "s",
        "zzzzzz",
        "interfaces and protocols",
    ] {
        let result = engine.lookup(query);
        assert!(
            result.suggestions().len() <= 5,
            "'{query}' returned {:?}",
            result.suggestions()
        );
    }

    Ok(())
}

#[test]
fn test_lexicon_relatives_fill_suggestions() -> Result<()> {
    let mut lexicon = MemoryLexicon::new();
    lexicon.add_sense(record("pythons.n.01", "", &["pythons"]))?;
    lexicon.add_sense(record("python.n.01", "large Old World boas", &["python"]))?;
    lexicon.add_sense(record("rock_python.n.01", "", &["rock_python"]))?;
    lexicon.link("pythons.n.01", "python.n.01")?;
    lexicon.link("pythons.n.01", "rock_python.n.01")?;

    let engine = LookupEngine::new(Arc::new(lexicon))?;

    let result = engine.lookup("pythons");
    assert_eq!(result.suggestions(), &["python".to_string()]);

    Ok(())
}

#[test]
fn test_concurrent_lookups_count_every_hit() -> Result<()> {
    let engine = Arc::new(seeded_engine()?);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert!(engine.lookup("python").is_exact());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.frequency("python"), 801);

    Ok(())
}

#[test]
fn test_seed_is_idempotent() -> Result<()> {
    let engine = LookupEngine::new(Arc::new(BuiltinLexicon::computing()?))?;

    let first = engine.initialize()?;
    assert_eq!(first.resolved, 47);
    assert_eq!(first.unresolved, vec!["graphql"]);

    let second = engine.initialize()?;
    assert_eq!(second.resolved, 0);
    assert_eq!(second.skipped, 47);
    assert_eq!(engine.frequency("python"), 1);

    Ok(())
}

#[test]
fn test_word_list() -> Result<()> {
    let sparse = LookupEngine::new(Arc::new(BuiltinLexicon::computing()?))?;
    let padded = sparse.word_list();
    assert!(!padded.is_empty());
    assert!(padded.len() <= 50);
    let mut deduped = padded.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), padded.len());

    let seeded = seeded_engine()?;
    assert_eq!(seeded.word_list(), seeded.cache().all_words());

    Ok(())
}

#[test]
fn test_bounded_cache_evicts() -> Result<()> {
    let config = EngineConfig::from_json_str(r#"{"cache": {"capacity": 10}}"#)?;
    let engine = LookupEngine::from_config(config, Arc::new(BuiltinLexicon::computing()?))?;
    engine.initialize()?;

    let stats = engine.stats();
    assert_eq!(stats.cached_words, 10);
    assert_eq!(stats.capacity, Some(10));
    assert!(stats.evictions > 0);

    assert!(engine.lookup("python").is_exact());

    Ok(())
}
