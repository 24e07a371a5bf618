use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub type InputLines = Lines<BufReader<Stdin>>;

/// Line reader over stdin. `next_line` is cancel safe, so it can sit in a `select!`.
pub fn input_lines() -> InputLines {
    BufReader::new(tokio::io::stdin()).lines()
}

pub fn prompt() -> Result<(), String> {
    write!(std::io::stdout(), "> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
