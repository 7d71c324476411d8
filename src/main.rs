use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use judgement_pool::dataset::DEFAULT_LABELLER;
use judgement_pool::{select, Config, Dataset, LabelType, Stage};

/// Manage the labelling pool of an active-learning dataset.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Dataset configuration (JSON)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print labelled/unlabelled counts as JSON
    Stats,

    /// Print a random draw of unlabelled sample paths
    Sample {
        #[arg(short, long, default_value_t = 10)]
        size: usize,
    },

    /// Record a judgement for one sample
    Label {
        path: String,
        label: String,
        /// TRAIN, TEST or MODEL_LABELLED; defaults to the stage policy
        #[arg(long)]
        stage: Option<Stage>,
        #[arg(long, default_value = DEFAULT_LABELLER)]
        user: String,
    },

    /// Print the stage the next human judgement belongs to
    NextStage,

    /// Print the model family for this dataset and a label type
    Model {
        /// binary, sequence, object_detection, ...
        #[arg(long)]
        label_type: String,
        /// Valid output token of a sequence label (repeatable)
        #[arg(long = "token")]
        tokens: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::from_file(&cli.config)
        .with_context(|| format!("reading config {}", cli.config.display()))?;

    match cli.command {
        Command::Stats => {
            let dataset = open(&config)?;
            println!("{}", serde_json::to_string_pretty(&dataset.stats())?);
        }
        Command::Sample { size } => {
            let dataset = open(&config)?;
            for record in dataset.sample(size) {
                println!("{}", record.path);
            }
        }
        Command::Label {
            path,
            label,
            stage,
            user,
        } => {
            let mut dataset = open(&config)?;
            let stage = match stage {
                Some(stage) => stage,
                None => dataset.set_current_stage(),
            };
            dataset
                .add_label(&path, &label, stage, &user)
                .with_context(|| format!("labelling {path}"))?;
            info!("labelled {path} as {label:?} ({stage}, by {user})");
        }
        Command::NextStage => {
            let mut dataset = open(&config)?;
            println!("{}", dataset.set_current_stage());
        }
        Command::Model { label_type, tokens } => {
            let mut label_type: LabelType = label_type.parse()?;
            if let LabelType::Sequence { valid_tokens } = &mut label_type {
                *valid_tokens = tokens;
            }
            let kind = select(config.data_type()?, &label_type);
            println!("{}", serde_json::to_string_pretty(&kind)?);
        }
    }

    Ok(())
}

fn open(config: &Config) -> Result<Dataset> {
    Dataset::load_from(config).with_context(|| {
        format!(
            "loading {} dataset from {}",
            config.data_type,
            config.directory.display()
        )
    })
}
