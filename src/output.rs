use std::io::{self, Write};

/// Write the whole document to stdout in one call.
pub fn write_stdout(doc: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(doc.as_bytes())?;
    out.flush()
}
