//! SafeMeds command line: index the drug dataset, ask a clinical question.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use safemeds_core::config::SafeMedsConfig;
use safemeds_core::errors::{InferenceError, SafeMedsResult};
use safemeds_core::intent::IntentLabel;
use safemeds_core::models::{
    ApprovedCandidates, Candidate, PipelineOutcome, RetrievalConstraint, SafetyProfile,
};
use safemeds_core::traits::{
    IIntentClassifier, IRetriever, ISynthesizer, ITranscriber,
};
use safemeds_embeddings::EmbeddingEngine;
use safemeds_inference::InferenceClient;
use safemeds_pipeline::{PipelineEngine, SessionContext};
use safemeds_store::{Indexer, RetrieverAdapter, VectorStoreClient};

#[derive(Parser)]
#[command(name = "safemeds", version, about = "Safety-gated medication lookup")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the knowledge base from the tabular drug dataset.
    Index {
        /// CSV with drug_name, medical_condition, side_effects, rx_otc,
        /// pregnancy_category columns.
        #[arg(long)]
        dataset: PathBuf,
        /// Index at most this many rows.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run one pipeline pass for a query.
    Ask {
        /// The clinical query. May be omitted when --audio is given.
        query: Option<String>,
        /// Transcribe this audio file and use the text as the query.
        #[arg(long)]
        audio: Option<PathBuf>,
        /// Patient is pregnant: block FDA category C/D/X medications.
        #[arg(long)]
        pregnant: bool,
        /// Restrict results to medications also sold over-the-counter.
        #[arg(long)]
        otc_only: bool,
        /// Show retrieved payloads and scores without changing behavior.
        #[arg(long)]
        dev: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SafeMedsConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SafeMedsConfig::default(),
    };

    match cli.command {
        Command::Index { dataset, limit } => run_index(&config, &dataset, limit),
        Command::Ask {
            query,
            audio,
            pregnant,
            otc_only,
            dev,
        } => run_ask(&config, query, audio, pregnant, otc_only, dev),
    }
}

fn run_index(config: &SafeMedsConfig, dataset: &Path, limit: Option<usize>) -> anyhow::Result<()> {
    let embedder = EmbeddingEngine::new(config.embedding.clone());
    let store = VectorStoreClient::new(&config.store);
    let indexer = Indexer::new(&embedder, &store);

    let report = indexer
        .index_csv(dataset, limit)
        .with_context(|| format!("indexing {}", dataset.display()))?;
    println!(
        "Indexed {} records in {} batches into '{}'.",
        report.indexed, report.batches, config.store.collection
    );
    Ok(())
}

fn run_ask(
    config: &SafeMedsConfig,
    query: Option<String>,
    audio: Option<PathBuf>,
    pregnant: bool,
    otc_only: bool,
    dev: bool,
) -> anyhow::Result<()> {
    let embedder = EmbeddingEngine::new(config.embedding.clone());
    let store = VectorStoreClient::new(&config.store);
    let retriever = RetrieverAdapter::new(&embedder, &store);

    // A missing credential must not abort the run: the gate fails open and
    // synthesis reports a user-visible error instead.
    let inference: Box<dyn Inference> = match InferenceClient::from_env(config.inference.clone()) {
        Ok(client) => Box::new(client),
        Err(e) => {
            tracing::warn!(error = %e, "inference service unavailable");
            Box::new(OfflineInference {
                var: config.inference.api_key_env.clone(),
            })
        }
    };

    let query = match resolve_query(query, audio, inference.as_transcriber())? {
        Some(query) => query,
        None => return Ok(()),
    };

    let mut session = SessionContext::new();
    session.set_pregnancy_risk(pregnant);
    session.set_prescription_only_ok(!otc_only);

    let outcome = if dev {
        let inspecting = InspectingRetriever { inner: &retriever };
        let engine = PipelineEngine::new(
            inference.as_classifier(),
            &inspecting,
            inference.as_synthesizer(),
            config.retrieval.clone(),
        );
        engine.run_session(&mut session, &query)
    } else {
        let engine = PipelineEngine::new(
            inference.as_classifier(),
            &retriever,
            inference.as_synthesizer(),
            config.retrieval.clone(),
        );
        engine.run_session(&mut session, &query)
    };

    print_outcome(&outcome);
    Ok(())
}

fn resolve_query(
    query: Option<String>,
    audio: Option<PathBuf>,
    transcriber: &dyn ITranscriber,
) -> anyhow::Result<Option<String>> {
    if let Some(path) = audio {
        let bytes =
            std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording.wav".to_string());
        return match transcriber.transcribe(&bytes, &filename) {
            Ok(text) => {
                println!("Transcribed query: {text}");
                Ok(Some(text))
            }
            Err(e) => {
                println!("Transcription error: {e}");
                Ok(None)
            }
        };
    }
    match query {
        Some(query) => Ok(Some(query)),
        None => anyhow::bail!("provide a query or --audio"),
    }
}

fn print_outcome(outcome: &PipelineOutcome) {
    match outcome {
        PipelineOutcome::Blocked(reason) => println!("{}", reason.user_message()),
        PipelineOutcome::NoCandidates => {
            println!("No medications in the knowledge base satisfy the safety constraints.")
        }
        PipelineOutcome::AllRejected { rejections } => {
            println!("Response blocked for patient safety: every candidate was rejected.");
            for rejection in rejections {
                println!(
                    "  - {} (category {}): {}",
                    rejection.drug_name, rejection.category, rejection.reason
                );
            }
        }
        PipelineOutcome::Recommendation(text) => println!("{text}"),
        PipelineOutcome::Failed(message) => println!("{message}"),
    }
}

// ---------------------------------------------------------------------------
// Inference plumbing
// ---------------------------------------------------------------------------

/// The three inference roles behind one object, so `run_ask` can swap in the
/// offline substitute as a unit.
trait Inference {
    fn as_classifier(&self) -> &dyn IIntentClassifier;
    fn as_synthesizer(&self) -> &dyn ISynthesizer;
    fn as_transcriber(&self) -> &dyn ITranscriber;
}

impl Inference for InferenceClient {
    fn as_classifier(&self) -> &dyn IIntentClassifier {
        self
    }
    fn as_synthesizer(&self) -> &dyn ISynthesizer {
        self
    }
    fn as_transcriber(&self) -> &dyn ITranscriber {
        self
    }
}

/// Substitute used when no credential is configured. Every call fails with
/// the same error; the gate's fail-open policy and the pipeline's outcome
/// conversion decide what the user sees.
struct OfflineInference {
    var: String,
}

impl OfflineInference {
    fn unavailable(&self) -> safemeds_core::SafeMedsError {
        InferenceError::MissingCredential {
            var: self.var.clone(),
        }
        .into()
    }
}

impl IIntentClassifier for OfflineInference {
    fn classify(&self, _query: &str) -> SafeMedsResult<IntentLabel> {
        Err(self.unavailable())
    }
}

impl ISynthesizer for OfflineInference {
    fn synthesize(
        &self,
        _query: &str,
        _approved: &ApprovedCandidates,
        _profile: &SafetyProfile,
    ) -> SafeMedsResult<String> {
        Err(self.unavailable())
    }
}

impl ITranscriber for OfflineInference {
    fn transcribe(&self, _audio: &[u8], _filename: &str) -> SafeMedsResult<String> {
        Err(self.unavailable())
    }
}

impl Inference for OfflineInference {
    fn as_classifier(&self) -> &dyn IIntentClassifier {
        self
    }
    fn as_synthesizer(&self) -> &dyn ISynthesizer {
        self
    }
    fn as_transcriber(&self) -> &dyn ITranscriber {
        self
    }
}

// ---------------------------------------------------------------------------
// Developer mode
// ---------------------------------------------------------------------------

/// Passes retrieval through unchanged and prints every hit's payload and
/// score on the way.
struct InspectingRetriever<'a> {
    inner: &'a dyn IRetriever,
}

impl IRetriever for InspectingRetriever<'_> {
    fn retrieve(
        &self,
        query: &str,
        constraint: Option<&RetrievalConstraint>,
        limit: usize,
    ) -> SafeMedsResult<Vec<Candidate>> {
        let candidates = self.inner.retrieve(query, constraint, limit)?;
        for candidate in &candidates {
            println!(
                "[dev] score={:.4} {}",
                candidate.score,
                serde_json::to_string(candidate).unwrap_or_default()
            );
        }
        Ok(candidates)
    }
}
