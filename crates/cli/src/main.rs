use std::path::PathBuf;

use anyhow::{Context, Result};

use annotate::{AnnotationProvider, SpacyClient};
use eval::{evaluate, EvalError, ReferenceGraph};
use extract::{AttributionStrategy, SentenceExtractor};
use graph::KnowledgeGraph;

const USAGE: &str = "Usage: kgx <text-file> [--out <graph.json>] [--reference <truth.json>] \
[--provider-url <url>] [--strategy sentence-wide|nearest-mention]";

struct Args {
    input: PathBuf,
    out: PathBuf,
    reference: Option<PathBuf>,
    provider_url: String,
    strategy: AttributionStrategy,
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut out = PathBuf::from("knowledge_graph.json");
    let mut reference = None;
    let mut provider_url = SpacyClient::default_url();
    let mut strategy = AttributionStrategy::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = PathBuf::from(args.next().context(USAGE)?),
            "--reference" => reference = Some(PathBuf::from(args.next().context(USAGE)?)),
            "--provider-url" => provider_url = args.next().context(USAGE)?,
            "--strategy" => strategy = args.next().context(USAGE)?.parse()?,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if input.is_none() => input = Some(PathBuf::from(other)),
            other => anyhow::bail!("unexpected argument: {other}\n{USAGE}"),
        }
    }

    Ok(Args {
        input: input.context(USAGE)?,
        out,
        reference,
        provider_url,
        strategy,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;

    let text = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("Failed to read input text: {}", args.input.display()))?;

    // Provider failure here is fatal; there is no degraded mode.
    let client = SpacyClient::connect(args.provider_url).await?;
    let sentences = client.analyze(&text).await?;
    tracing::info!(
        model = client.model(),
        sentences = sentences.len(),
        "annotation complete"
    );

    let extractor = SentenceExtractor::new(args.strategy);

    // Whitespace-only sentences are skipped, not errors. Folding in
    // document order keeps sentence lists and relationship order stable.
    let graph = sentences
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| extractor.extract(s))
        .fold(KnowledgeGraph::new(), |g, facts| g.fold(&facts));

    graph.save(&args.out)?;
    println!("{}", serde_json::to_string_pretty(&graph)?);

    if let Some(reference_path) = &args.reference {
        let reference = ReferenceGraph::load(reference_path)?;
        match evaluate(&graph, &reference) {
            Ok(report) => print!("{}", report.render()),
            Err(EvalError::EmptyGraph) => {
                println!("Nothing to evaluate: no people were extracted.")
            }
        }
    }

    Ok(())
}
