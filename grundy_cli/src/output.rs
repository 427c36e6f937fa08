use crate::Settings;
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::{
    fmt::Display,
    io::{BufWriter, Write},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human readable line
    Text,

    /// Single JSON object
    Json,
}

/// Write command report in the selected format
pub fn emit<R>(settings: &Settings, report: &R) -> Result<()>
where
    R: Serialize + Display,
{
    let mut w = BufWriter::new(
        settings
            .output
            .create()
            .with_context(|| format!("Could not create file '{}'", settings.output))?,
    );

    match settings.format {
        Format::Text => writeln!(w, "{}", report),
        Format::Json => {
            serde_json::to_writer(&mut w, report).context("Could not serialize report")?;
            writeln!(w)
        }
    }
    .and_then(|()| w.flush())
    .with_context(|| format!("Could not write to file '{}'", settings.output))
}
