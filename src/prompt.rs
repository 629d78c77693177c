//! Interactive console prompts. Readers are generic over the input and
//! output streams so the retry logic can be driven in tests.

use crate::error::{LinkerError, LinkerResult};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Attempts allowed for passphrase confirmation before giving up.
pub const MAX_PASSPHRASE_ATTEMPTS: usize = 3;

/// The y/n gate shown before any file is touched.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> LinkerResult<bool> {
    writeln!(output, "Ready to continue? [y or n]")?;
    let answer = read_line(input)?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

/// Ask for the bundle passphrase twice until both entries match, up to
/// [`MAX_PASSPHRASE_ATTEMPTS`] times. A mismatch is not an error, it prints
/// a problem line and retries; only exhausting all attempts fails.
pub fn read_passphrase<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> LinkerResult<String> {
    writeln!(output, "Please enter a password for your zip file.")?;
    for _ in 0..MAX_PASSPHRASE_ATTEMPTS {
        writeln!(output, "Password:")?;
        let first = read_line(input)?;
        writeln!(output, "Re-enter password:")?;
        let second = read_line(input)?;

        if first == second {
            return Ok(first);
        }
        writeln!(
            output,
            "{} Passwords don't match; please try again.",
            "[-]".red().bold()
        )?;
    }

    Err(LinkerError::Bundle(format!(
        "passphrase confirmation failed after {MAX_PASSPHRASE_ATTEMPTS} attempts"
    )))
}

/// Name for a multi-file bundle; re-asks on an empty entry.
pub fn read_bundle_name<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> LinkerResult<String> {
    loop {
        writeln!(output, "Enter a name for the multi-file zip.")?;
        let name = read_line(input)?;
        if !name.is_empty() {
            return Ok(name);
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> LinkerResult<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(LinkerError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed during prompt",
        )));
    }
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}
