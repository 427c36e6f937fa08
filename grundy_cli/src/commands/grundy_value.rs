use crate::{Settings, output};
use anyhow::{Context, Result};
use clap::Parser;
use grundy::{
    numeric::nimber::Nimber,
    short::{game_tree::GameTree, impartial::grundy::GrundyEvaluator},
};
use serde::Serialize;
use std::fmt::{self, Display};

/// Grundy value of an impartial game tree
#[derive(Parser, Debug)]
pub struct Args {
    /// Position in brace notation, e.g. `{0, *2|0, *2}`
    #[arg(long)]
    position: String,
}

#[derive(Debug, Serialize)]
struct Report {
    position: GameTree,
    birthday: u32,
    grundy_value: Nimber,
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grundy_value)
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args, settings: &Settings) -> Result<()> {
    let position = GameTree::from_str_with_limits(&args.position, &settings.limits)
        .with_context(|| format!("Could not parse position '{}'", args.position))?;

    let evaluator = GrundyEvaluator::new(settings.limits);
    let grundy_value = evaluator
        .grundy_value(&position)
        .with_context(|| format!("Could not evaluate '{}'", position))?;
    log::info!(
        "Evaluated using {} cached positions",
        evaluator.transposition_table().len()
    );

    output::emit(
        settings,
        &Report {
            birthday: position.birthday(),
            position,
            grundy_value,
        },
    )
}
