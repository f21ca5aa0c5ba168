use std::io::{self, BufRead, Stdin, Stdout, Write};
use std::path::Path;

/// Things the create operation asks about its surroundings.
pub trait Host {
    fn exists(&self, path: &Path) -> bool;

    /// Asks a yes/no question, `default` is taken when there is no answer.
    fn confirm(&mut self, prompt: &str, default: bool) -> bool;
}

/// Host backed by the real filesystem, asking questions on a terminal.
pub struct PromptHost<I, O> {
    input: I,
    output: O,
}

pub type FsHost = PromptHost<io::BufReader<Stdin>, Stdout>;

impl FsHost {
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<I, O> PromptHost<I, O>
where
    I: BufRead,
    O: Write,
{
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, prompt: &str, default: bool) -> io::Result<Option<bool>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        write!(self.output, "{} {} ", prompt, hint)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(Some(default));
        }

        Ok(match line.trim().to_lowercase().as_str() {
            "" => Some(default),
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        })
    }
}

impl<I, O> Host for PromptHost<I, O>
where
    I: BufRead,
    O: Write,
{
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        loop {
            match self.ask(prompt, default) {
                Ok(Some(answer)) => return answer,
                Ok(None) => continue,
                Err(e) => {
                    warn!("failed to read answer: {}", e);
                    return default;
                }
            }
        }
    }
}
