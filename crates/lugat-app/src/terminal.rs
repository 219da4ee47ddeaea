use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Line-oriented console, generic so tests can script it
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

pub type StdTerminal = Terminal<BufReader<Stdin>, Stdout>;

pub fn stdio() -> StdTerminal {
    Terminal::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next line without its line ending, `None` at end of input
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    pub async fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.write(text).await?;
        self.write("\n").await
    }

    /// Print a question and read the reply
    pub async fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.write(question).await?;
        self.read_line().await
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// `y`/`yes` or Turkish `e`/`evet`, case-insensitive
pub fn is_yes(reply: &str) -> bool {
    matches!(reply.trim().to_lowercase().as_str(), "y" | "yes" | "e" | "evet")
}
