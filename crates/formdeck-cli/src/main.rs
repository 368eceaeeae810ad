//! formdeck command line
//!
//! Reads candidates from JSON, runs them through one of the two form
//! variants and prints the resulting card list.

mod cli;
mod render;
mod tracing_setup;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, Variant};
use formdeck_core::{Candidate, FormConfig, ImageUpload, SubmissionRecord};
use formdeck_pipeline::{ManualForm, SchemaForm, SubmissionPipeline, SubmitError};
use formdeck_store::RecordStore;
use formdeck_validation::StrengthMeter;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_setup::Verbosity;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_setup::init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => FormConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => FormConfig::default(),
    };

    match cli.command {
        Command::Submit {
            candidate,
            variant,
            image,
        } => {
            let mut candidate: Candidate = read_json(&candidate).await?;
            if let Some(path) = image {
                let upload = ImageUpload::from_path(&path)
                    .await
                    .with_context(|| format!("selecting image {}", path.display()))?;
                candidate = candidate.with_image(upload);
            }

            let pipeline = pipeline(config);
            let accepted = match submit(variant, &pipeline, candidate).await {
                Ok(_) => true,
                Err(err) => {
                    report_rejection(None, &err);
                    false
                }
            };
            print_records(&pipeline.store().records(), cli.json)?;
            Ok(exit_code(accepted))
        }
        Command::Batch {
            candidates,
            variant,
        } => {
            let candidates: Vec<Candidate> = read_json(&candidates).await?;
            let pipeline = pipeline(config);

            let mut all_accepted = true;
            for (index, candidate) in candidates.into_iter().enumerate() {
                if let Err(err) = submit(variant, &pipeline, candidate).await {
                    report_rejection(Some(index), &err);
                    all_accepted = false;
                }
            }
            print_records(&pipeline.store().records(), cli.json)?;
            Ok(exit_code(all_accepted))
        }
        Command::Strength { password } => {
            let meter = StrengthMeter::for_password(&password);
            if cli.json {
                println!("{}", serde_json::to_string(&meter)?);
            } else {
                print!("{}", render::strength(&meter));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Countries => {
            if cli.json {
                println!("{}", serde_json::to_string(&config.countries)?);
            } else {
                for country in &config.countries {
                    println!("{country}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn pipeline(config: FormConfig) -> SubmissionPipeline {
    let store = Arc::new(RecordStore::with_countries(config.countries.clone()));
    SubmissionPipeline::new(store, config)
}

/// Open the variant's modal and submit through its form
async fn submit(
    variant: Variant,
    pipeline: &SubmissionPipeline,
    candidate: Candidate,
) -> Result<SubmissionRecord, SubmitError> {
    pipeline.store().open_modal(variant.modal());
    match variant {
        Variant::Manual => {
            let mut form = ManualForm::new(pipeline.ruleset().clone());
            form.load(candidate);
            form.submit(pipeline).await
        }
        Variant::Schema => {
            let mut form = SchemaForm::new(pipeline.ruleset().clone());
            form.load(candidate);
            form.submit(pipeline).await
        }
    }
}

fn report_rejection(index: Option<usize>, err: &SubmitError) {
    if let Some(index) = index {
        eprintln!("candidate #{index} rejected:");
    }
    match err.validation_errors() {
        Some(errors) => eprint!("{}", render::field_errors(errors)),
        None => {
            tracing::debug!("submission failure detail: {err}");
            eprintln!("{}", err.user_message());
        }
    }
}

fn print_records(records: &[SubmissionRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
    } else {
        print!("{}", render::cards(records));
    }
    Ok(())
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}
