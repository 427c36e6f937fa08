use crate::{Settings, output};
use anyhow::Result;
use clap::Parser;
use grundy::numeric::nimber::Nimber;
use serde::Serialize;
use std::fmt::{self, Display};

/// Minimum excluded value of a set of naturals
#[derive(Parser, Debug)]
pub struct Args {
    /// Values excluded from the result
    values: Vec<u32>,
}

#[derive(Debug, Serialize)]
struct Report {
    values: Vec<u32>,
    mex: u32,
}

impl Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mex)
    }
}

pub fn run(args: Args, settings: &Settings) -> Result<()> {
    let mex = Nimber::mex(args.values.iter().copied().map(Nimber::new)).value();
    output::emit(
        settings,
        &Report {
            values: args.values,
            mex,
        },
    )
}
