//! Line-based prompt and print over async reader/writer pairs.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use marketplace_core::{InputError, ResultTable, parse_number};

use super::ConsoleError;

/// Prompt I/O for the console.
pub struct Prompt<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> Prompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write text as-is and flush.
    pub async fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Read one line without its terminator.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::EndOfInput` once the reader is exhausted.
    pub async fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(ConsoleError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }

    /// Prompt for a free-text field.
    pub async fn ask(&mut self, label: &str) -> Result<String, ConsoleError> {
        self.say(&format!("\t{label}: ")).await?;
        self.read_line().await
    }

    /// Prompt for a numeric field.
    pub async fn ask_number<T: FromStr>(
        &mut self,
        field: &'static str,
        label: &str,
    ) -> Result<T, ConsoleError> {
        let raw = self.ask(label).await?;
        Ok(parse_number(field, &raw)?)
    }

    /// Prompt for a field with its own parser.
    pub async fn ask_parsed<T>(&mut self, label: &str) -> Result<T, ConsoleError>
    where
        T: FromStr<Err = InputError>,
    {
        let raw = self.ask(label).await?;
        Ok(raw.parse()?)
    }

    /// Read a menu choice, re-prompting until it is a number.
    pub async fn choice(&mut self) -> Result<u32, ConsoleError> {
        loop {
            self.say("Please make your choice: ").await?;
            let raw = self.read_line().await?;
            match raw.trim().parse() {
                Ok(choice) => return Ok(choice),
                Err(_) => self.say("Your input is invalid!\n").await?,
            }
        }
    }

    /// Print a result table with a header and row count.
    pub async fn table(&mut self, table: &ResultTable) -> Result<(), ConsoleError> {
        if table.is_empty() {
            return self.say("No rows.\n").await;
        }
        let mut text = table.render(true);
        text.push_str(&format!("total row(s): {}\n", table.len()));
        self.say(&text).await
    }
}
