//! Process input from a text value

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::posix::PosixCommand;
use crate::error::Result;

/// Temporary file holding a command's input
///
/// The file is created exclusively for one invocation and is readable only
/// by the current user on Unix. It is deleted when this value is dropped, so
/// keep it alive until the process has been spawned.
#[derive(Debug)]
pub struct InputFile {
    file: NamedTempFile,
}

impl InputFile {
    pub fn new(text: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new().prefix("ansible-run-").tempfile()?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Open a fresh read handle positioned at the start of the input.
    pub fn open(&self) -> Result<File> {
        Ok(self.file.reopen()?)
    }
}

impl PosixCommand {
    /// Redirect input from a text value.
    ///
    /// Returns the command together with the file backing its input. The
    /// caller owns the file and decides when it goes away.
    pub fn with_input(self, text: &str) -> Result<(Self, InputFile)> {
        let input = InputFile::new(text)?;
        let command = self.with_stdin_file(input.path());
        Ok((command, input))
    }
}
