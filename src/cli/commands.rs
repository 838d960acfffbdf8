//! Command implementations for the kumo CLI.

use std::path::Path;

use chrono::Utc;
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::pipeline::{Aggregation, PipelineConfig, RunSummary, WordCloudPipeline, render_to_file};
use crate::render::{PngFileSink, SpiralRenderer, WordCloudConfig};
use crate::source::sqlite::default_since;
use crate::source::{CsvTextSource, LiteralTextSource, SqliteContentSource};

/// Execute a CLI command.
pub fn execute_command(args: KumoArgs) -> Result<()> {
    match &args.command {
        Command::Csv(csv_args) => render_csv(csv_args.clone(), &args),
        Command::Db(db_args) => render_db(db_args.clone(), &args),
        Command::Text(text_args) => render_text(text_args.clone(), &args),
        Command::Rank(rank_args) => rank_csv(rank_args.clone(), &args),
        Command::InitDb(init_args) => init_db(init_args.clone(), &args),
    }
}

/// Build the pipeline configuration from command line options.
pub fn pipeline_config(analysis: &AnalysisArgs, aggregation: Aggregation) -> PipelineConfig {
    PipelineConfig {
        dictionary: analysis.dictionary.clone(),
        user_dictionary: analysis.user_dictionary.clone(),
        top_k: analysis.top_k,
        aggregation,
        ..PipelineConfig::default()
    }
}

/// Load the word cloud configuration, applying command line overrides.
pub fn load_render_config(render: &RenderArgs) -> Result<WordCloudConfig> {
    let mut config = match &render.config {
        Some(path) => {
            info!("loading word cloud configuration from {}", path.display());
            WordCloudConfig::from_file(path)?
        }
        None => WordCloudConfig::default(),
    };
    if let Some(font) = &render.font {
        config.font_file = font.clone();
    }
    config.validate()?;
    Ok(config)
}

fn aggregation_for(per_document: bool) -> Aggregation {
    if per_document {
        Aggregation::PerDocument
    } else {
        Aggregation::Corpus
    }
}

/// Render a word cloud from a CSV file.
fn render_csv(args: CsvArgs, cli_args: &KumoArgs) -> Result<()> {
    let config = load_render_config(&args.render)?;
    let pipeline_config = pipeline_config(&args.analysis, aggregation_for(args.per_document));
    let source = CsvTextSource::new(&args.csv_file);

    let mut summary = {
        let pipeline = WordCloudPipeline::from_config(&pipeline_config)?;
        match pipeline_config.aggregation {
            Aggregation::Corpus => pipeline.rank_text_source(&source, Aggregation::Corpus)?,
            Aggregation::PerDocument => {
                pipeline.rank_document_source(&source, Aggregation::PerDocument)?
            }
        }
    };

    finish_render(&mut summary, &config, &args.output, cli_args)
}

/// Render a word cloud from the contents table of a SQLite database.
fn render_db(args: DbArgs, cli_args: &KumoArgs) -> Result<()> {
    let config = load_render_config(&args.render)?;
    let pipeline_config = pipeline_config(&args.analysis, aggregation_for(!args.corpus));

    let since = if args.all {
        None
    } else {
        Some(args.since.unwrap_or_else(|| default_since(Utc::now())))
    };
    if let Some(since) = since {
        info!("reading contents created after {}", since.to_rfc3339());
    }
    let source = SqliteContentSource::open(&args.db_file)?.with_since(since);

    let mut summary = {
        let pipeline = WordCloudPipeline::from_config(&pipeline_config)?;
        pipeline.rank_document_source(&source, pipeline_config.aggregation)?
    };

    finish_render(&mut summary, &config, &args.output, cli_args)
}

/// Render a word cloud from literal text.
fn render_text(args: TextArgs, cli_args: &KumoArgs) -> Result<()> {
    let config = load_render_config(&args.render)?;
    let pipeline_config = pipeline_config(&args.analysis, Aggregation::Corpus);
    let source = LiteralTextSource::new(args.text);

    let mut summary = {
        let pipeline = WordCloudPipeline::from_config(&pipeline_config)?;
        pipeline.rank_text_source(&source, Aggregation::Corpus)?
    };

    finish_render(&mut summary, &config, &args.output, cli_args)
}

/// Print the ranked words of a CSV file.
fn rank_csv(args: RankArgs, cli_args: &KumoArgs) -> Result<()> {
    let aggregation = aggregation_for(args.per_document);
    let pipeline = WordCloudPipeline::from_config(&pipeline_config(&args.analysis, aggregation))?;
    let source = CsvTextSource::new(&args.csv_file);

    let summary = match aggregation {
        Aggregation::Corpus => pipeline.rank_text_source(&source, aggregation)?,
        Aggregation::PerDocument => pipeline.rank_document_source(&source, aggregation)?,
    };

    output_summary(&summary, cli_args)
}

/// Create the contents table.
fn init_db(args: InitDbArgs, cli_args: &KumoArgs) -> Result<()> {
    let store = SqliteContentSource::open(&args.db_file)?;
    store.initialize()?;
    let documents = store.fetch_documents(None)?.len();

    let result = InitDbResult {
        path: args.db_file.clone(),
        documents,
    };
    output_result(
        &format!("Initialized {}", args.db_file.display()),
        &result,
        cli_args,
    )
}

/// Render the ranked words, write the PNG and report the run.
fn finish_render(
    summary: &mut RunSummary,
    config: &WordCloudConfig,
    output: &Path,
    cli_args: &KumoArgs,
) -> Result<()> {
    render_to_file(
        summary,
        &SpiralRenderer::new(),
        config,
        &PngFileSink::new(),
        output,
    )?;

    output_summary(summary, cli_args)
}
