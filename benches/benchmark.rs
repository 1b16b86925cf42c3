//! Benchmarks for keyrank

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keyrank::*;

/// Tagged sample for benchmarking
const SAMPLE_TEXT: &str = include_str!("../tests/fixtures/nlp_course.txt");

const EZAFE_TAGS: [&str; 4] = ["NOUN", "NOUN,EZ", "ADJ", "ADJ,EZ"];

fn sentences(repeat: usize) -> Vec<Sentence> {
    TaggedTextProcessor::new()
        .process(&SAMPLE_TEXT.repeat(repeat), WordNormalization::Stemming)
        .unwrap()
}

fn valid_tags() -> rustc_hash::FxHashSet<String> {
    EZAFE_TAGS.iter().map(|t| t.to_string()).collect()
}

fn benchmark_loading(c: &mut Criterion) {
    let processor = TaggedTextProcessor::new();

    let mut group = c.benchmark_group("load_by_size");
    for size in [1, 5, 10, 20].iter() {
        let text = SAMPLE_TEXT.repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| processor.process(black_box(text), WordNormalization::Stemming))
        });
    }
    group.finish();
}

fn benchmark_word_graph(c: &mut Criterion) {
    let sentences = sentences(10);
    let tags = valid_tags();

    let mut group = c.benchmark_group("word_graph_window");
    for window in [2usize, 10].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(window), window, |b, &window| {
            b.iter(|| {
                graph::word_graph::build_word_graph(
                    black_box(&sentences),
                    &tags,
                    window,
                    EdgeWeighting::CoOccurrence,
                )
            })
        });
    }
    group.finish();
}

fn benchmark_pagerank(c: &mut Criterion) {
    let builder = graph::word_graph::build_word_graph(
        &sentences(10),
        &valid_tags(),
        10,
        EdgeWeighting::CoOccurrence,
    );
    let csr_graph = CsrGraph::from_builder(&builder);

    c.bench_function("pagerank", |b| {
        b.iter(|| StandardPageRank::new().run(black_box(&csr_graph)))
    });

    let mut group = c.benchmark_group("pagerank_damping");
    for damping in [0.5, 0.85, 0.95].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(damping),
            damping,
            |b, &damping| {
                b.iter(|| {
                    StandardPageRank::new()
                        .with_damping(damping)
                        .run(black_box(&csr_graph))
                })
            },
        );
    }
    group.finish();
}

fn benchmark_grammar(c: &mut Criterion) {
    let grammar = ChunkGrammar::default_grammar().unwrap();
    let sentences = sentences(1);

    c.bench_function("default_grammar_chunking", |b| {
        b.iter(|| {
            for sentence in &sentences {
                black_box(grammar.spans(&sentence.pos_tags, "NP"));
            }
        })
    });
}

fn benchmark_clustering(c: &mut Criterion) {
    let mut extractor = Extractor::new(ExtractorConfig::default().with_language("none")).unwrap();
    extractor.load_sentences(sentences(1));
    extractor
        .select_candidates(&SelectionOptions::longest_pos_sequences())
        .unwrap();

    c.bench_function("cluster_topics", |b| {
        b.iter(|| {
            clustering::cluster_topics(
                black_box(extractor.candidates()),
                0.74,
                DistanceMetric::Jaccard,
                LinkageMethod::Average,
            )
        })
    });
}

fn benchmark_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_by_variant");
    for variant in [
        Variant::TextRank,
        Variant::SingleRank,
        Variant::PositionRank,
        Variant::TopicRank,
        Variant::MultipartiteRank,
    ] {
        group.bench_function(variant.name(), |b| {
            b.iter(|| extract_keyphrases(variant, black_box(SAMPLE_TEXT), 10))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_loading,
    benchmark_word_graph,
    benchmark_pagerank,
    benchmark_grammar,
    benchmark_clustering,
    benchmark_variants,
);

criterion_main!(benches);
