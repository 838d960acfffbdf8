//! End-to-end word cloud pipeline.
//!
//! ```text
//! source ─▶ tokenizer ─▶ noun extractor ─▶ aggregator ─▶ top-K ─▶ renderer ─▶ sink
//! ```
//!
//! A [`WordCloudPipeline`] owns its tokenizer for the duration of one run;
//! dropping the pipeline releases the analyzer. Every stage fails fast: the
//! first error aborts the run and nothing is written.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::extractor::NounExtractor;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::lindera::{DEFAULT_DICTIONARY, DEFAULT_MODE, LinderaTokenizer};
use crate::error::{KumoError, Result};
use crate::frequency::ranking::DEFAULT_TOP_K;
use crate::frequency::{FrequencyAggregator, FrequencyMap, RankedList, select_top_k};
use crate::render::{ImageSink, Renderer, WordCloudConfig};
use crate::source::{Document, DocumentSource, TextSource};

/// How extracted words are merged into corpus counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aggregation {
    /// Count every occurrence; stop words are kept.
    #[default]
    Corpus,
    /// Count each word at most once per document; stop words are removed.
    PerDocument,
}

/// Analyzer and ranking settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// `embedded://` URI or path of a compiled lindera dictionary.
    pub dictionary: String,
    /// Optional user dictionary (CSV or compiled).
    pub user_dictionary: Option<String>,
    /// Lindera segmentation mode.
    pub mode: String,
    /// Maximum number of ranked words.
    pub top_k: usize,
    pub aggregation: Aggregation,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dictionary: DEFAULT_DICTIONARY.to_string(),
            user_dictionary: None,
            mode: DEFAULT_MODE.to_string(),
            top_k: DEFAULT_TOP_K,
            aggregation: Aggregation::default(),
        }
    }
}

impl PipelineConfig {
    /// Load the lindera tokenizer described by this configuration.
    pub fn open_tokenizer(&self) -> Result<LinderaTokenizer> {
        LinderaTokenizer::new(
            &self.mode,
            &self.dictionary,
            self.user_dictionary.as_deref(),
        )
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub source: String,
    pub aggregation: Aggregation,
    pub documents: usize,
    pub distinct_words: usize,
    pub ranked: RankedList,
    pub output: Option<PathBuf>,
}

/// Tokenization, aggregation and ranking for one run.
pub struct WordCloudPipeline {
    extractor: NounExtractor,
    top_k: usize,
}

impl WordCloudPipeline {
    /// Create a pipeline around `tokenizer`, keeping at most `top_k` words.
    pub fn new(tokenizer: Box<dyn Tokenizer>, top_k: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(KumoError::invalid_argument("top_k must be at least 1"));
        }
        Ok(Self {
            extractor: NounExtractor::new(tokenizer),
            top_k,
        })
    }

    /// Create a pipeline with a lindera tokenizer built from `config`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let tokenizer = config.open_tokenizer()?;
        info!("loaded dictionary {}", config.dictionary);
        Self::new(Box::new(tokenizer), config.top_k)
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn extractor(&self) -> &NounExtractor {
        &self.extractor
    }

    /// Count every accepted noun of one corpus blob.
    pub fn count_corpus(&self, text: &str) -> Result<FrequencyMap> {
        self.extractor.extract_frequencies(text)
    }

    /// Count accepted nouns of `documents`, merged according to `aggregation`.
    pub fn count_documents(
        &self,
        documents: &[Document],
        aggregation: Aggregation,
    ) -> Result<FrequencyMap> {
        let mut aggregator = FrequencyAggregator::new();
        for document in documents {
            match aggregation {
                Aggregation::PerDocument => {
                    let words = self.extractor.extract_words(&document.body)?;
                    debug!("document {}: {} nouns", document.id, words.len());
                    aggregator.add_document(words);
                }
                Aggregation::Corpus => {
                    let counts = self.extractor.extract_frequencies(&document.body)?;
                    aggregator.add_corpus(&counts);
                }
            }
        }
        Ok(aggregator.finish())
    }

    /// Rank `counts` and keep the configured number of words.
    pub fn rank(&self, counts: &FrequencyMap) -> Result<RankedList> {
        select_top_k(counts, self.top_k)
    }

    /// Read a text source and rank its words.
    pub fn rank_text_source(
        &self,
        source: &dyn TextSource,
        aggregation: Aggregation,
    ) -> Result<RunSummary> {
        let text = source.read_text()?;
        info!("read {} bytes from {}", text.len(), source.name());

        let counts = match aggregation {
            Aggregation::Corpus => self.count_corpus(&text)?,
            Aggregation::PerDocument => {
                self.count_documents(&[Document::new(1, text)], aggregation)?
            }
        };
        self.summarize(source.name(), aggregation, 1, &counts)
    }

    /// Read a document source and rank its words.
    pub fn rank_document_source(
        &self,
        source: &dyn DocumentSource,
        aggregation: Aggregation,
    ) -> Result<RunSummary> {
        let documents = source.read_documents()?;
        info!("read {} documents from {}", documents.len(), source.name());

        let counts = self.count_documents(&documents, aggregation)?;
        self.summarize(source.name(), aggregation, documents.len(), &counts)
    }

    fn summarize(
        &self,
        source: &str,
        aggregation: Aggregation,
        documents: usize,
        counts: &FrequencyMap,
    ) -> Result<RunSummary> {
        let ranked = self.rank(counts)?;
        Ok(RunSummary {
            source: source.to_string(),
            aggregation,
            documents,
            distinct_words: counts.len(),
            ranked,
            output: None,
        })
    }
}

/// Render `summary.ranked` and hand the image to `sink` at `path`.
pub fn render_to_file(
    summary: &mut RunSummary,
    renderer: &dyn Renderer,
    config: &WordCloudConfig,
    sink: &dyn ImageSink,
    path: &Path,
) -> Result<()> {
    let image = renderer.render(&summary.ranked, config)?;
    sink.write(&image, path)?;
    summary.output = Some(path.to_path_buf());
    Ok(())
}
