#[macro_use]
extern crate log;
extern crate better_panic;
extern crate clap;
extern crate mkfile;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use mkfile::{create_with_progress, CreateRequest, FsHost, Outcome};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod utils;

#[derive(Parser)]
#[clap(about = "Create a file of given size filled with random data or patterns")]
struct Options {
    #[clap(short, long, parse(from_occurrences))]
    pub verbose: u32,

    #[clap(name = "file", parse(from_os_str))]
    pub file: PathBuf,

    #[clap(
        name = "size",
        long_help = "Size of the file, eg. 512, 3.5K, 20MB, 1G. Units are powers of 1024."
    )]
    pub size: String,

    #[clap(
        short = 'y',
        long = "non-interactive",
        help = "Never ask, fail if the file exists and --overwrite was not given"
    )]
    pub non_interactive: bool,

    #[clap(short = 'f', long, help = "Replace existing file without asking")]
    pub overwrite: bool,

    #[clap(
        short,
        long,
        conflicts_with = "pattern",
        help = "Fill with random bytes, this is the default without --pattern"
    )]
    pub random: bool,

    #[clap(
        short,
        long,
        value_name = "PATTERN",
        long_help = "Fill with PATTERN repeated. When given more than once, patterns are picked at random."
    )]
    pub pattern: Vec<String>,

    #[clap(long, help = "Seed for the pseudo-random generator")]
    pub seed: Option<u64>,

    #[clap(long)]
    pub progress: bool,
}

impl Options {
    fn to_request(&self) -> CreateRequest {
        let mut request = CreateRequest::new(self.file.clone(), self.size.clone());
        request.interactive = !self.non_interactive;
        request.overwrite = self.overwrite;
        request.patterns = self.pattern.clone();
        request
    }
}

fn run(options: &Options) -> anyhow::Result<Outcome> {
    let request = options.to_request();
    debug!(
        "creating {} of size {} (random: {}, patterns: {:?})",
        request.path.display(),
        request.size,
        options.random || request.patterns.is_empty(),
        request.patterns
    );

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut host = FsHost::stdio();
    let mut progress = utils::Progress::new();
    create_with_progress(&request, &mut host, &mut rng, |written, total| {
        if options.progress {
            progress.update(written, total)
        }
    })
    .with_context(|| format!("failed to create {}", options.file.display()))
}

fn main() {
    better_panic::install();
    let options = Options::parse();
    utils::setup_logging(options.verbose);

    match run(&options) {
        Ok(outcome) => {
            match outcome {
                Outcome::Done { .. } => println!("Done"),
                Outcome::Cancelled => println!("Cancelled"),
            }
            process::exit(utils::exit_code(outcome.status()));
        }
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<mkfile::Error>()
                .map_or(1, |x| utils::exit_code(x.status()));
            process::exit(code);
        }
    }
}
