//! Interactive console prompts

use crate::error::InputError;
use std::io::{self, BufRead, Write};

pub const URL_PROMPT: &str = "Amazon product URL: ";
pub const DROP_PROMPT: &str = "Notify me when price drops by (%): ";
pub const EMAIL_PROMPT: &str = "Your e-mail address: ";

/// Print `label`, read one line and return it trimmed.
///
/// End of input is an error rather than an empty answer.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String, InputError> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no input",
        )));
    }
    Ok(line.trim().to_string())
}

/// Parse a drop percentage such as `15` or `12.5`
pub fn parse_percent(raw: &str) -> Result<f64, InputError> {
    let raw = raw.trim();
    raw.parse::<f64>()
        .map_err(|_| InputError::NotANumber(raw.to_string()))
}
