use crate::{Settings, output};
use anyhow::{Context, Result};
use clap::Parser;
use grundy::short::{
    game_tree::GameTree,
    limits::Limits,
    oracle::ShortGameOracle,
    relation::{Outcome, Relation},
};
use serde::Serialize;
use std::fmt::{self, Display};

/// Compare two short games
#[derive(Parser, Debug)]
pub struct Args {
    /// Left hand side of the comparison
    #[arg(long)]
    lhs: String,

    /// Right hand side of the comparison
    #[arg(long)]
    rhs: String,
}

#[derive(Debug, Serialize)]
struct Report {
    lhs: GameTree,
    rhs: GameTree,
    relation: Relation,
    outcome_of_difference: Outcome,
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.relation, self.rhs)
    }
}

fn parse_game(input: &str, limits: &Limits) -> Result<GameTree> {
    GameTree::from_str_with_limits(input, limits)
        .with_context(|| format!("Could not parse game '{}'", input))
}

fn report(lhs: &str, rhs: &str, limits: &Limits) -> Result<Report> {
    let lhs = parse_game(lhs, limits)?;
    let rhs = parse_game(rhs, limits)?;

    let oracle = ShortGameOracle::new(*limits);
    let relation = oracle
        .compare(&lhs, &rhs)
        .with_context(|| format!("Could not compare '{}' with '{}'", lhs, rhs))?;

    // G - H can be born later than the limit allows, but its outcome is decided by the relation
    Ok(Report {
        lhs,
        rhs,
        relation,
        outcome_of_difference: Outcome::from(relation),
    })
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args, settings: &Settings) -> Result<()> {
    output::emit(settings, &report(&args.lhs, &args.rhs, &settings.limits)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_at_depth_limit() {
        let limits = Limits::new(4);
        let equal = report("*3", "*3", &limits).unwrap();
        assert_eq!(equal.relation, Relation::Equivalent);
        assert_eq!(equal.outcome_of_difference, Outcome::P);
        assert_eq!(equal.to_string(), "*3 = *3");

        let hot = report("{1|-1}", "0", &limits).unwrap();
        assert_eq!(hot.relation, Relation::Fuzzy);
        assert_eq!(hot.outcome_of_difference, Outcome::N);

        assert!(report("*5", "0", &limits).is_err());
    }
}
