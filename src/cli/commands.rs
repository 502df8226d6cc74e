// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Subcommands map 1:1 onto the application use cases:
//
//   train          → TrainUseCase
//   checkpoints    → CatalogUseCase::checkpoints
//   attack         → AttackUseCase
//   attacks        → CatalogUseCase::attacks
//   corpus generate / corpus list → CorpusUseCase
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::{attack_use_case::AttackConfig, train_use_case::TrainConfig};
use crate::data::synthetic::DEFAULT_SEED;
use crate::domain::mia::ScoreCalibration;

/// Compute device the numeric backend runs on.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceKind {
    /// NdArray backend on the CPU
    #[default]
    Cpu,
    /// Wgpu backend on the default GPU adapter
    Gpu,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a word-level LSTM on the first 70% of a corpus
    Train(TrainArgs),

    /// List trained checkpoints
    Checkpoints,

    /// Run a membership inference attack against a checkpoint
    Attack(AttackArgs),

    /// List past attack runs
    Attacks,

    /// Create or list text corpora
    Corpus {
        #[command(subcommand)]
        command: CorpusCommands,
    },
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Corpus to train on (a file `<name>.txt` under corpora/)
    #[arg(long)]
    pub corpus: String,

    /// Optional label put in front of the checkpoint name
    #[arg(long)]
    pub name: Option<String>,

    /// Number of full passes over the member partition
    #[arg(long, default_value_t = 100)]
    pub epochs: usize,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 2e-3)]
    pub lr: f64,

    #[arg(long, default_value_t = 128)]
    pub embedding_dim: usize,

    #[arg(long, default_value_t = 256)]
    pub hidden_dim: usize,

    /// Seed for the mini-batch shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus:        a.corpus,
            name_prefix:   a.name.filter(|n| !n.is_empty()),
            epochs:        a.epochs,
            batch_size:    a.batch_size,
            learning_rate: a.lr,
            embedding_dim: a.embedding_dim,
            hidden_dim:    a.hidden_dim,
            seed:          a.seed,
            ..TrainConfig::default()
        }
    }
}

/// All arguments for the `attack` command.
#[derive(Args, Debug)]
pub struct AttackArgs {
    /// Checkpoint name as shown by `checkpoints`
    #[arg(long)]
    pub checkpoint: String,

    /// Corpus whose 70/30 split defines members and non-members
    #[arg(long)]
    pub corpus: String,

    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Sentences to judge, separated by '|'
    #[arg(long)]
    pub input: Option<String>,

    /// Raw score that normalises to 0.0
    #[arg(long, default_value_t = 17.0)]
    pub score_offset: f64,

    /// Normalised score above which a sentence is judged a member
    #[arg(long, default_value_t = 0.7)]
    pub threshold: f64,
}

impl From<AttackArgs> for AttackConfig {
    fn from(a: AttackArgs) -> Self {
        AttackConfig {
            checkpoint:  a.checkpoint,
            corpus:      a.corpus,
            batch_size:  a.batch_size,
            input:       a.input,
            calibration: ScoreCalibration { score_offset: a.score_offset, threshold: a.threshold },
            ..AttackConfig::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum CorpusCommands {
    /// Write a seeded synthetic corpus
    Generate(GenerateArgs),

    /// List available corpora
    List,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long)]
    pub name: String,

    /// Number of sentences
    #[arg(long, default_value_t = 2000)]
    pub count: usize,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_train_args_defaults() {
        let cli = Cli::try_parse_from(["whisper-trace", "train", "--corpus", "web"]).unwrap();
        let Commands::Train(args) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = args.into();
        assert_eq!(cfg.corpus, "web");
        assert_eq!(cfg.name_prefix, None);
        assert_eq!((cfg.epochs, cfg.batch_size, cfg.learning_rate), (100, 64, 0.002));
    }

    #[test]
    fn test_attack_args_carry_calibration() {
        let cli = Cli::try_parse_from([
            "whisper-trace", "--device", "cpu", "attack",
            "--checkpoint", "demo__synth50__2__8__0.002",
            "--corpus", "synth50",
            "--threshold", "0.5",
        ])
        .unwrap();
        assert_eq!(cli.device, DeviceKind::Cpu);

        let Commands::Attack(args) = cli.command else { panic!("expected attack") };
        let cfg: AttackConfig = args.into();
        assert_eq!(cfg.calibration.threshold, 0.5);
        assert_eq!(cfg.calibration.score_offset, 17.0);
        assert_eq!(cfg.input, None);
    }

    #[test]
    fn test_corpus_generate_parses() {
        let cli = Cli::try_parse_from(["whisper-trace", "corpus", "generate", "--name", "synth50", "--count", "50"])
            .unwrap();
        let Commands::Corpus { command: CorpusCommands::Generate(args) } = cli.command else {
            panic!("expected corpus generate")
        };
        assert_eq!((args.name.as_str(), args.count, args.seed), ("synth50", 50, 7));
    }

    #[test]
    fn test_corpus_generate_defaults_to_2000_sentences() {
        let cli = Cli::try_parse_from(["whisper-trace", "corpus", "generate", "--name", "synthetic"]).unwrap();
        let Commands::Corpus { command: CorpusCommands::Generate(args) } = cli.command else {
            panic!("expected corpus generate")
        };
        assert_eq!(args.count, 2000);
    }
}
