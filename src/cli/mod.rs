// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// This layer picks the Burn backend for the chosen device,
// hands off to Layer 2 and prints what comes back. It never
// computes anything itself.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use burn::backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu};
use clap::Parser;
use commands::{AttackArgs, Commands, CorpusCommands, DeviceKind, GenerateArgs, TrainArgs};

use crate::application::{
    attack_use_case::{AttackConfig, AttackUseCase},
    catalog_use_case::CatalogUseCase,
    corpus_use_case::CorpusUseCase,
    train_use_case::{TrainConfig, TrainUseCase},
};
use crate::domain::mia::MiaResult;
use crate::infra::DEFAULT_RESOURCE_DIR;

#[derive(Parser, Debug)]
#[command(
    name = "whisper-trace",
    version,
    about = "Train word-level LSTM language models and run membership inference attacks against them."
)]
pub struct Cli {
    /// Root holding corpora/, checkpoints/ and mias/
    #[arg(long, global = true, default_value = DEFAULT_RESOURCE_DIR)]
    pub resource_dir: PathBuf,

    /// Device the model runs on
    #[arg(long, global = true, value_enum, default_value_t = DeviceKind::Cpu)]
    pub device: DeviceKind,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)  => run_train(self.resource_dir, self.device, args),
            Commands::Checkpoints  => run_checkpoints(self.resource_dir),
            Commands::Attack(args) => run_attack(self.resource_dir, self.device, args),
            Commands::Attacks      => run_attacks(self.resource_dir),
            Commands::Corpus { command } => match command {
                CorpusCommands::Generate(args) => run_corpus_generate(self.resource_dir, args),
                CorpusCommands::List           => run_corpus_list(self.resource_dir),
            },
        }
    }
}

fn run_train(resource_dir: PathBuf, device: DeviceKind, args: TrainArgs) -> Result<()> {
    let config = TrainConfig { resource_dir, ..args.into() };
    tracing::info!("Training on corpus '{}' ({:?})", config.corpus, device);

    let use_case   = TrainUseCase::new(config);
    let descriptor = match device {
        DeviceKind::Cpu => use_case.execute::<Autodiff<NdArray>>(&NdArrayDevice::default())?,
        DeviceKind::Gpu => use_case.execute::<Autodiff<Wgpu>>(&WgpuDevice::default())?,
    };

    println!("Training complete. Checkpoint saved: {}", descriptor.name);
    Ok(())
}

fn run_checkpoints(resource_dir: PathBuf) -> Result<()> {
    let checkpoints = CatalogUseCase::new(resource_dir).checkpoints()?;
    if checkpoints.is_empty() {
        println!("No checkpoints found.");
        return Ok(());
    }

    println!("{:<40} {:<12} {:<16} {:>7} {:>6} {:>10}", "NAME", "PREFIX", "CORPUS", "EPOCHS", "BATCH", "LR");
    for c in checkpoints {
        println!(
            "{:<40} {:<12} {:<16} {:>7} {:>6} {:>10}",
            c.name, c.prefix.as_deref().unwrap_or("-"), c.corpus, c.epochs, c.batch_size, c.learning_rate,
        );
    }
    Ok(())
}

fn run_attack(resource_dir: PathBuf, device: DeviceKind, args: AttackArgs) -> Result<()> {
    let config = AttackConfig { resource_dir, ..args.into() };
    tracing::info!("Attacking '{}' with corpus '{}' ({:?})", config.checkpoint, config.corpus, device);

    let use_case = AttackUseCase::new(config);
    let result   = match device {
        DeviceKind::Cpu => use_case.execute::<NdArray>(&NdArrayDevice::default())?,
        DeviceKind::Gpu => use_case.execute::<Wgpu>(&WgpuDevice::default())?,
    };

    print_attack(&result);
    Ok(())
}

fn print_attack(result: &MiaResult) {
    println!("\nCheckpoint: {}", result.checkpoint);
    println!("Corpus:     {}", result.corpus);
    println!("AUC:        {:.3}\n", result.auc);

    println!("{:<7} {:>9} {:>10}  CONTENT", "MEMBER", "SCORE", "NORMALIZED");
    for s in &result.sentences {
        println!(
            "{:<7} {:>9.3} {:>10.3}  {}",
            if s.is_member { "yes" } else { "no" }, s.score, s.normalized_score, s.content,
        );
    }
}

fn run_attacks(resource_dir: PathBuf) -> Result<()> {
    let attacks = CatalogUseCase::new(resource_dir).attacks()?;
    if attacks.is_empty() {
        println!("No attack results found.");
        return Ok(());
    }

    println!("{:<15} {:<40} {:<16} {:>6} {:>6}", "TIMESTAMP", "CHECKPOINT", "CORPUS", "BATCH", "AUC");
    for a in attacks {
        println!(
            "{:<15} {:<40} {:<16} {:>6} {:>6.3}",
            a.timestamp, a.checkpoint, a.corpus, a.batch_size, a.auc,
        );
    }
    Ok(())
}

fn run_corpus_generate(resource_dir: PathBuf, args: GenerateArgs) -> Result<()> {
    let path = CorpusUseCase::new(resource_dir).generate(&args.name, args.count, args.seed)?;
    println!("Wrote {} sentences to {}", args.count, path.display());
    Ok(())
}

fn run_corpus_list(resource_dir: PathBuf) -> Result<()> {
    let corpora = CorpusUseCase::new(resource_dir).list()?;
    if corpora.is_empty() {
        println!("No corpora found.");
    }
    for name in corpora {
        println!("{name}");
    }
    Ok(())
}
