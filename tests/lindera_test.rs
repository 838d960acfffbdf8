#[cfg(test)]
mod tests {
    use kumo::error::KumoError;
    use kumo::pipeline::{Aggregation, PipelineConfig, WordCloudPipeline};
    use kumo::source::LiteralTextSource;

    fn pipeline() -> WordCloudPipeline {
        WordCloudPipeline::from_config(&PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_ipadic_corpus_counts() {
        let counts = pipeline().count_corpus("東京の猫と大阪の猫").unwrap();

        assert_eq!(counts.get("猫"), 2);
        assert_eq!(counts.get("東京"), 1);
        assert!(!counts.contains("の"));
        assert!(!counts.contains("と"));
    }

    #[test]
    fn test_ipadic_per_document_ranking() {
        let source = LiteralTextSource::new("猫が好きです。猫は可愛い。\n東京の猫");

        let summary = pipeline()
            .rank_document_source(&source, Aggregation::PerDocument)
            .unwrap();

        let counts = summary.ranked.to_frequency_map();
        assert_eq!(summary.documents, 2);
        assert_eq!(summary.ranked.entries()[0].word, "猫");
        assert_eq!(counts.get("猫"), 2);
        assert_eq!(counts.get("東京"), 1);
    }

    #[test]
    fn test_ipadic_empty_text() {
        let summary = pipeline()
            .rank_text_source(&LiteralTextSource::new(""), Aggregation::Corpus)
            .unwrap();

        assert!(summary.ranked.is_empty());
        assert_eq!(summary.distinct_words, 0);
    }

    #[test]
    fn test_missing_dictionary() {
        let config = PipelineConfig {
            dictionary: "/nonexistent/dictionary".to_string(),
            ..PipelineConfig::default()
        };

        let result = WordCloudPipeline::from_config(&config);

        assert!(matches!(result, Err(KumoError::AnalyzerInit(_))));
    }
}
