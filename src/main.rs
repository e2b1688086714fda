use clap::Parser;
use gapfill::{
    cloze::{ExerciseConfig, Mode, OffsetPolicy},
    config::{percentage_from_slider, Config, ConfigStore, FileConfigStore},
    passage::{Difficulty, PassageLibrary},
    render::{render_exercise, render_results, render_word_bank, DEFAULT_WIDTH},
    session::Session,
    snapshot::{FileSnapshotStore, Snapshot, SnapshotStore},
    telemetry,
};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
};
use tracing::info;

const CUSTOM_TITLE: &str = "Custom text";

/// fill-in-the-blank english reading practice
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pick a reading passage, hide some of its words (or parts of words), and type the missing pieces back in. A shuffled word bank, optionally padded with decoys, helps along the way."
)]
pub struct Cli {
    /// difficulty tier to pick the passage from
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// index of the passage within its tier (random when omitted)
    #[clap(short = 'n', long)]
    passage: Option<usize>,

    /// custom text to practise with instead of a bundled passage
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// share of all words to blank, in percent (clamped to the configured range)
    #[clap(long, conflicts_with = "slider")]
    percentage: Option<u8>,

    /// difficulty slider from 1 to 10, mapped onto the configured percentage range
    #[clap(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    slider: Option<u8>,

    /// blank whole words or only part of each word
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// where partial blanks may start
    #[clap(long, value_enum)]
    offset_policy: Option<OffsetPolicy>,

    /// pad the word bank with decoy entries
    #[clap(long)]
    decoys: bool,

    /// decoys to add per answer
    #[clap(long)]
    decoy_multiplier: Option<f64>,

    /// seed the random generator to reproduce an exercise
    #[clap(long)]
    seed: Option<u64>,

    /// print the exercise as JSON and exit
    #[clap(long)]
    json: bool,

    /// continue the last saved exercise
    #[clap(long, conflicts_with_all = ["prompt", "passage"])]
    resume: bool,

    /// list the passages of the selected difficulty and exit
    #[clap(long)]
    list: bool,

    /// read settings from this file instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// keep the current exercise in this file instead of the default location
    #[clap(long)]
    state_file: Option<PathBuf>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the stored settings
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(difficulty) = self.difficulty {
            cfg.difficulty = difficulty;
        }
        if let Some(percentage) = self.percentage {
            cfg.percentage = percentage;
        }
        if let Some(slider) = self.slider {
            cfg.percentage = percentage_from_slider(slider, cfg.min_percentage, cfg.max_percentage);
        }
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if let Some(policy) = self.offset_policy {
            cfg.offset_policy = policy;
        }
        if self.decoys {
            cfg.include_decoys = true;
        }
        if let Some(multiplier) = self.decoy_multiplier {
            cfg.decoy_multiplier = multiplier;
        }
        cfg
    }
}

fn main() {
    telemetry::init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config_store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = cli.apply(config_store.load());
    if cli.save_config {
        config_store.save(&config)?;
        info!(path = %config_store.path().display(), "saved settings");
    }

    let library = PassageLibrary::bundled()?;
    if cli.list {
        for (index, passage) in library.passages(config.difficulty).iter().enumerate() {
            println!("{index:>3}  {}", passage.title);
        }
        return Ok(());
    }

    let snapshots = cli
        .state_file
        .as_ref()
        .map(FileSnapshotStore::with_path)
        .unwrap_or_default();

    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let exercise_config = ExerciseConfig::from(&config);
    let mut session = if cli.resume {
        let snapshot = snapshots.load()?.ok_or(gapfill::Error::NoSnapshot)?;
        info!(saved_at = %snapshot.saved_at, "resuming exercise");
        Session::resume(snapshot.exercise, exercise_config)
    } else {
        let (title, text) = match &cli.prompt {
            Some(text) => (CUSTOM_TITLE.to_string(), text.clone()),
            None => {
                let passage = match cli.passage {
                    Some(index) => library.get(config.difficulty, index)?,
                    None => library.random(config.difficulty, rng.as_mut())?,
                };
                (passage.title.clone(), passage.text.clone())
            }
        };
        Session::start(&title, &text, exercise_config, rng.as_mut())
    };

    snapshots.save(&Snapshot::new(session.exercise().clone()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(session.exercise())?);
        return Ok(());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_exercise(&mut session, stdin.lock(), stdout.lock())?;

    Ok(())
}

/// Show the exercise, read one answer line per blank, then print the result sheet.
fn run_exercise<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut out: W,
) -> io::Result<()> {
    let exercise = session.exercise();
    writeln!(out, "{}", render_exercise(exercise, DEFAULT_WIDTH))?;

    let bank = render_word_bank(&exercise.word_bank);
    if !bank.is_empty() {
        writeln!(out, "{bank}\n")?;
    }
    if exercise.is_static() {
        return Ok(());
    }

    let indexes: Vec<usize> = exercise.blank_indexes().collect();
    let mut lines = input.lines();
    for index in indexes {
        write!(out, "({index}) > ")?;
        out.flush()?;
        // EOF leaves the remaining blanks empty
        let answer = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        session.answer(index, answer);
    }
    writeln!(out)?;

    let result = session.evaluate();
    writeln!(out, "{}", render_results(result))?;
    Ok(())
}
