//! Command handlers for `classify` and `stats`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::Context;
use mlinv_classifier::{
    classify_batch, compute_batch_stats, BatchStats, CardAssembler, FilterClassifier,
};
use mlinv_core::{load_vocabulary, AppConfig, ListingCard, SourcedFragment, Vocabulary};

use crate::ndjson::{read_ndjson, write_ndjson};

/// Classify every fragment in `input`.
///
/// Cards go to `output` when given (stats then print to stdout), otherwise
/// cards go to stdout and stats to stderr.
///
/// # Errors
///
/// Returns an error if the vocabulary or input cannot be read, a line is not
/// a valid fragment, a card breaks an invariant, or output cannot be written.
pub(crate) fn run_classify(
    config: &AppConfig,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    tracing::info!(
        env = %config.env,
        input = %input.display(),
        allow_refurbished = config.filter.allow_refurbished,
        allow_bundles = config.filter.allow_bundles,
        allow_locked = config.filter.allow_locked,
        "starting classify run"
    );

    let vocabulary = match &config.vocabulary_path {
        Some(path) => load_vocabulary(path)
            .with_context(|| format!("loading vocabulary from {}", path.display()))?,
        None => Vocabulary::default(),
    };

    let fragments: Vec<SourcedFragment> = read_ndjson(open(input)?)?;
    let assembler = CardAssembler::new(FilterClassifier::new(config.filter, &vocabulary));
    let outcome = classify_batch(&fragments, &assembler, config.batch_parallel)?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            write_ndjson(BufWriter::new(file), &outcome.cards)?;
            println!("{}", render_stats(&outcome.stats)?);
        }
        None => {
            write_ndjson(std::io::stdout().lock(), &outcome.cards)?;
            eprintln!("{}", render_stats(&outcome.stats)?);
        }
    }

    Ok(())
}

/// Recompute stats from card NDJSON written by `classify`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is not a valid card.
pub(crate) fn run_stats(input: &Path) -> anyhow::Result<()> {
    let stats = stats_from_file(input)?;
    println!("{}", render_stats(&stats)?);
    Ok(())
}

fn stats_from_file(input: &Path) -> anyhow::Result<BatchStats> {
    let cards: Vec<ListingCard> = read_ndjson(open(input)?)?;
    Ok(compute_batch_stats(&cards))
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn render_stats(stats: &BatchStats) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}
