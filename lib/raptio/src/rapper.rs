//! Invocation of the `rapper` command of the [Raptor RDF syntax library](https://librdf.org/raptor/rapper.html).
//!
//! The command is always run through a process API with discrete argument
//! arrays. Nothing coming from the caller is ever interpolated into a shell
//! command line.

use crate::error::RapperError;
use crate::format::RdfFormat;
use log::debug;
use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

const RAPPER_COMMAND: &str = "rapper";

/// Checks if the `rapper` command line tool is available.
///
/// Parsing through [`RdfParser`](crate::RdfParser) fails with
/// [`RapperError::NotFound`] when it is not; this probe allows callers (and
/// tests) to find out beforehand.
pub fn is_rapper_available() -> bool {
    Command::new(RAPPER_COMMAND)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

/// Reads the `source` file and writes its statements to `target` as N-Triples.
///
/// With no explicit format, `rapper` guesses it from the content and the
/// file name. A non-zero exit status is fatal: the target file may then stop
/// in the middle of the document and must not be parsed.
pub(crate) fn convert_to_ntriples(
    source: &Path,
    target: &File,
    format: Option<RdfFormat>,
) -> Result<(), RapperError> {
    let mut command = Command::new(RAPPER_COMMAND);
    command.arg("--quiet");
    match format {
        Some(format) => {
            command.args([OsStr::new("-i"), OsStr::new(format.rapper_name())]);
        }
        None => {
            command.arg("--guess");
        }
    }
    command.args([OsStr::new("-o"), OsStr::new("ntriples")]);
    command.arg(source);
    command.stdout(Stdio::from(target.try_clone()?));
    command.stderr(Stdio::piped());
    debug!("converting {} with {command:?}", source.display());
    let output = command.output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            RapperError::NotFound
        } else {
            RapperError::Io(e)
        }
    })?;
    if output.status.success() {
        Ok(())
    } else {
        Err(RapperError::CommandFailed {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
