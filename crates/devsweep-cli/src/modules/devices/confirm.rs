use std::io::{BufRead, Write};

pub(crate) const CONFIRM_WORD: &str = "yes";

/// Only an explicit `yes`, in any case and with surrounding whitespace
/// ignored, counts as consent.
pub(crate) fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(CONFIRM_WORD)
}

/// Asks before anything is changed. End of input is a refusal.
pub(crate) fn confirm_purge<R, W>(input: &mut R, out: &mut W, count: usize) -> anyhow::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(out, "Delete these {count} devices? (yes/no): ")?;
    out.flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(out)?;
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}
