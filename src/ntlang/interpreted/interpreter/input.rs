use std::io;
use std::io::{BufRead, Write};

/// Where `LEIA` gets its values from. The evaluator only ever sees this
/// trait, so hosts can plug in whatever acquisition strategy their platform
/// needs (the default below blocks on stdin; an embedding host may resolve
/// the line from an event loop before handing it over).
pub trait InputProvider {
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Default provider: prompt on stdout, then read one line from stdin.
pub struct StdinInput;

impl InputProvider for StdinInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_owned())
    }
}
