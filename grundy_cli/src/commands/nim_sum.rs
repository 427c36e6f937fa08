use crate::{Settings, output};
use anyhow::Result;
use clap::Parser;
use grundy::{numeric::nimber::Nimber, short::impartial::games::nim::Nim};
use serde::Serialize;
use std::fmt::{self, Display};

/// Nim sum of heaps and moves that win from the position
#[derive(Parser, Debug)]
pub struct Args {
    /// Sizes of the heaps
    heaps: Vec<u32>,
}

#[derive(Debug, Serialize)]
struct Report {
    heaps: Vec<u32>,
    nim_sum: Nimber,
    winning_moves: Vec<Vec<u32>>,
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nim_sum)?;
        for m in &self.winning_moves {
            write!(f, "\n-> {}", Nim::new(m.clone()))?;
        }
        Ok(())
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args, settings: &Settings) -> Result<()> {
    let position = Nim::new(args.heaps);
    let winning_moves = position
        .winning_moves()
        .into_iter()
        .map(|m| m.heaps().to_vec())
        .collect();
    log::info!("{} has nim sum {}", position, position.nim_sum());

    output::emit(
        settings,
        &Report {
            nim_sum: position.nim_sum(),
            heaps: position.heaps().to_vec(),
            winning_moves,
        },
    )
}
