use std::{
    io::{stdin, stdout, BufRead, Write},
    path::PathBuf,
    time::Instant,
};

use clap::{Args, Parser, Subcommand};
use hmmtag::{estimate, evaluate, Dataset, HmmConfig, HmmModel, Result, Tagger};

/// Part-of-speech tagging with a Hidden Markov Model and Viterbi decoding
#[derive(Debug, Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Argv {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// train on a corpus and report tagging accuracy on a test corpus
    Evaluate {
        #[command(flatten)]
        train: TrainArgs,
        /// gold tags of the test corpus, one sentence per line
        #[arg(long, value_name = "FILE")]
        test_tags: PathBuf,
        /// test sentences, one per line
        #[arg(long, value_name = "FILE")]
        test_sentences: PathBuf,
        /// print the accuracy summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// train on a corpus, then tag sentences read from STDIN ('q' quits)
    Tag {
        #[command(flatten)]
        train: TrainArgs,
        /// print each result as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// tag a few sentences with the built-in toy model
    Demo,
    /// train on a corpus and print the transition and emission tables
    Dump {
        #[command(flatten)]
        train: TrainArgs,
    },
}

#[derive(Debug, Args)]
struct TrainArgs {
    /// training tags, one sentence per line
    #[arg(long, value_name = "FILE")]
    train_tags: PathBuf,
    /// training sentences, one per line
    #[arg(long, value_name = "FILE")]
    train_sentences: PathBuf,
    #[command(flatten)]
    config: HmmConfig,
}

impl TrainArgs {
    fn train(&self) -> Result<HmmModel> {
        let begin = Instant::now();
        let ds = Dataset::from_files(&self.train_tags, &self.train_sentences)?;
        let model = estimate(&ds.pairs, self.config.clone())?;
        log::info!("trained on {} sentences in {:?}", ds.len(), begin.elapsed());
        Ok(model)
    }
}

const DEMO_SENTENCES: [&str; 5] = [
    "read interesting book",
    "write difficult and enjoyable book",
    "study enjoyable difficult and interesting book",
    "enjoyable write and read interesting book",
    "study read and write difficult book",
];

fn main() -> Result<()> {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("argv: {:?}", argv);
    match argv.command {
        Command::Evaluate { train, test_tags, test_sentences, json } => {
            let model = train.train()?;
            let test = Dataset::from_files(&test_tags, &test_sentences)?;
            let evaluation = evaluate(&model, &test.gold())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&evaluation.accuracy())?);
            } else {
                print!("{}", evaluation);
            }
        }
        Command::Tag { train, json } => {
            let model = train.train()?;
            let tagger = model.tagger();
            let mut out = stdout().lock();
            for line in stdin().lock().lines() {
                let line = line?;
                if line.trim() == "q" {
                    break;
                }
                let tags = tagger.tag(&line)?;
                if json {
                    writeln!(out, "{}", serde_json::to_string(&tags)?)?;
                } else {
                    writeln!(out, "{}", tags.join(" "))?;
                }
                out.flush()?;
            }
        }
        Command::Demo => {
            let model = HmmModel::sample();
            let tagger = model.tagger();
            for sentence in DEMO_SENTENCES {
                println!("{}: {:?}", sentence, tagger.tag(sentence)?);
            }
        }
        Command::Dump { train } => {
            train.train()?.dump(stdout().lock())?;
        }
    }
    Ok(())
}
