use crate::{Settings, output};
use anyhow::Result;
use clap::Parser;
use grundy::{numeric::nimber::Nimber, short::impartial::games::subtraction::Sub};
use serde::Serialize;
use std::fmt::{self, Display};

/// Grundy sequence of a subtraction game
#[derive(Parser, Debug)]
pub struct Args {
    /// Subtraction set, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    set: Vec<u32>,

    /// Number of heap sizes to evaluate, starting from zero
    #[arg(long, default_value_t = 32)]
    count: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    game: Sub,
    values: Vec<Nimber>,
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.game)?;
        for value in &self.values {
            write!(f, " {}", value.value())?;
        }
        Ok(())
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args, settings: &Settings) -> Result<()> {
    let game = Sub::new(args.set);
    log::debug!("Computing {} values of {}", args.count, game);
    let values = game.clone().grundy_sequence().take(args.count).collect();

    output::emit(settings, &Report { game, values })
}
