//! Display utilities

use std::fmt::{self, Display, Write};

/// Write `xs` separated by `separator`
pub fn sep<W, T>(w: &mut W, separator: &str, xs: impl IntoIterator<Item = T>) -> fmt::Result
where
    W: Write,
    T: Display,
{
    for (idx, v) in xs.into_iter().enumerate() {
        if idx != 0 {
            w.write_str(separator)?;
        }
        write!(w, "{}", v)?;
    }
    Ok(())
}

#[inline]
pub fn commas<W, T>(w: &mut W, xs: impl IntoIterator<Item = T>) -> fmt::Result
where
    W: Write,
    T: Display,
{
    sep(w, ", ", xs)
}

fn bracket<W>(
    w: &mut W,
    left: char,
    right: char,
    middle: impl FnOnce(&mut W) -> fmt::Result,
) -> fmt::Result
where
    W: Write,
{
    w.write_char(left)?;
    middle(w)?;
    w.write_char(right)
}

pub fn parens<W>(w: &mut W, middle: impl FnOnce(&mut W) -> fmt::Result) -> fmt::Result
where
    W: Write,
{
    bracket(w, '(', ')', middle)
}

pub fn braces<W>(w: &mut W, middle: impl FnOnce(&mut W) -> fmt::Result) -> fmt::Result
where
    W: Write,
{
    bracket(w, '{', '}', middle)
}
