//! Criterion benchmarks for the kumo extraction pipeline.
//!
//! Covers:
//! - Noun extraction over a scripted tokenizer
//! - Per-document and corpus aggregation
//! - Top-K ranking
//! - Word cloud layout on the default canvas

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use kumo::analysis::extractor::NounExtractor;
use kumo::analysis::tokenizer::ScriptedTokenizer;
use kumo::frequency::{FrequencyMap, merge_documents, select_top_k_with_observer};
use kumo::frequency::{RankObserver, RankedEntry};
use kumo::render::WordCloudConfig;
use kumo::render::spiral::{TextMeasure, layout};

const NOUNS: [&str; 16] = [
    "東京", "大阪", "京都", "猫", "犬", "鳥", "空", "海", "山", "川", "花", "雨", "雪", "風", "星",
    "月",
];

/// Ranking observer that discards every report.
struct Silent;

impl RankObserver for Silent {
    fn on_entry(&mut self, _rank: usize, _entry: &RankedEntry) {}
    fn on_complete(&mut self, _len: usize) {}
}

/// Every character is a `size` x `size` square.
struct SquareMeasure;

impl TextMeasure for SquareMeasure {
    fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let side = size.round() as u32;
        (side * text.chars().count() as u32, side)
    }
}

fn tokenizer() -> ScriptedTokenizer {
    NOUNS
        .iter()
        .fold(ScriptedTokenizer::new(), |t, noun| t.with_entry(*noun, "名詞,一般,*,*"))
        .with_entry("東京", "名詞,固有名詞,地域,一般")
        .with_entry("大阪", "名詞,固有名詞,地域,一般")
        .with_entry("京都", "名詞,固有名詞,地域,一般")
        .with_entry("の", "助詞,連体化,*,*")
        .with_entry("と", "助詞,並立助詞,*,*")
}

/// Generate test documents for benchmarking.
fn generate_test_documents(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let length = 20 + (i % 40);
            (0..length)
                .map(|j| {
                    let noun = NOUNS[(i * 7 + j * 13) % NOUNS.len()];
                    if j % 2 == 0 { format!("{noun}の") } else { format!("{noun}と") }
                })
                .collect::<String>()
        })
        .collect()
}

fn synthetic_counts(distinct: usize) -> FrequencyMap {
    (0..distinct)
        .map(|i| (format!("word_{i}"), 1 + (i * 31) % 997))
        .collect()
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    let extractor = NounExtractor::new(Box::new(tokenizer()));
    let documents = generate_test_documents(200);
    let corpus = documents.concat();

    group.bench_function("extract_frequencies_corpus", |b| {
        b.iter(|| black_box(extractor.extract_frequencies(black_box(&corpus))))
    });

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("extract_words_per_document", |b| {
        b.iter(|| {
            let words: Vec<Vec<String>> = documents
                .iter()
                .filter_map(|doc| extractor.extract_words(black_box(doc)).ok())
                .collect();
            black_box(merge_documents(words))
        })
    });

    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for distinct in [1_000, 10_000, 100_000] {
        let counts = synthetic_counts(distinct);
        group.throughput(Throughput::Elements(distinct as u64));
        group.bench_function(format!("select_top_300_of_{distinct}"), |b| {
            b.iter(|| black_box(select_top_k_with_observer(black_box(&counts), 300, &mut Silent)))
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.sample_size(10);

    let counts = synthetic_counts(1_000);
    let ranked = select_top_k_with_observer(&counts, 300, &mut Silent).unwrap();
    let config = WordCloudConfig {
        seed: Some(42),
        ..WordCloudConfig::default()
    };

    group.throughput(Throughput::Elements(ranked.len() as u64));
    group.bench_function("layout_300_words_default_canvas", |b| {
        b.iter(|| black_box(layout(black_box(&ranked), &config, &SquareMeasure)))
    });

    group.finish();
}

criterion_group!(benches, bench_extraction, bench_ranking, bench_layout);
criterion_main!(benches);
