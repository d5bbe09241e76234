//! Interactive pauses before destructive steps.

use crate::error::ProvisionError;
use std::io::{self, BufRead, BufReader, Stdin, Write};

/// Blocks the workflow until the user is ready to continue.
pub trait Pause: Send {
    fn pause(&mut self, message: &str) -> Result<(), ProvisionError>;
}

/// Prints the message and waits for one line of `input`.
///
/// The read runs under `block_in_place`, so it needs the multi-thread runtime.
pub struct LinePause<R> {
    input: R,
}

impl LinePause<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        LinePause::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead + Send> LinePause<R> {
    pub fn new(input: R) -> Self {
        LinePause { input }
    }
}

impl<R: BufRead + Send> Pause for LinePause<R> {
    fn pause(&mut self, message: &str) -> Result<(), ProvisionError> {
        print!("{message}");
        io::stdout().flush()?;
        let mut line = String::new();
        let read = tokio::task::block_in_place(|| self.input.read_line(&mut line))?;
        log::debug!("pause released after {read} bytes of input");
        Ok(())
    }
}
