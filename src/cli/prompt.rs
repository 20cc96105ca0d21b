//! Line-based prompts over stdin.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads one answer per line.
pub struct Prompt<R> {
    lines: Lines<R>,
}

impl Prompt<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Print `question` and read the answer, or `default` when the line is blank.
    ///
    /// Returns `None` at end of input.
    pub async fn ask(&mut self, question: &str, default: &str) -> std::io::Result<Option<String>> {
        let mut stdout = std::io::stdout();
        if default.is_empty() {
            write!(stdout, "{}: ", question)?;
        } else {
            write!(stdout, "{} [{}]: ", question, default)?;
        }
        stdout.flush()?;

        let Some(line) = self.lines.next_line().await? else {
            return Ok(None);
        };
        let answer = line.trim();
        Ok(Some(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        }))
    }
}

/// Parse a positive count, falling back on anything else.
pub fn parse_count(input: &str, fallback: u32) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => fallback,
    }
}

/// Parse a wallet count where `0` is a valid answer; anything else unparseable is `0`.
pub fn parse_wallet_count(input: &str) -> usize {
    input.trim().parse().unwrap_or(0)
}
