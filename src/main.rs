//! # Korpus
//!
//! Builds an annotated corpus of German legal texts.
//!
//! ## Getting started
//!
//! ```sh
//! korpus 0.1.0
//! German legal corpus builder.
//!
//! USAGE:
//!     korpus <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     annotate    Annotate a corpus
//!     harvest     Harvest documents into a corpus
//!     help        Prints this message or the help of the given subcommand(s)
//! ```
use structopt::StructOpt;

use korpus::error::Error;
use korpus::pipelines::{AnnotatePipeline, HarvestPipeline, Pipeline};

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Korpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Korpus::Harvest(h) => {
            let p = HarvestPipeline::new(h.into());
            let harvest = p.run()?;
            info!(
                "{} documents written, {} skipped",
                harvest.corpus.len(),
                harvest.skipped.len()
            );
        }
        cli::Korpus::Annotate(a) => {
            let p = AnnotatePipeline::new(a.into());
            p.run()?;
        }
    };
    Ok(())
}
