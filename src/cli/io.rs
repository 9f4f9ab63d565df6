//! JSON output for CLI
//!
//! One JSON object per line on stdout, UTF-8 only.

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write one value as a JSON line to `writer`
pub fn write_json_line<W: Write, T: Serialize>(writer: &mut W, value: &T) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct Response<'a, T> {
    status: &'static str,
    data: &'a T,
}

/// Write a success summary to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    write_json_line(&mut io::stdout(), &Response { status: "ok", data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line() {
        let mut buffer = Vec::new();
        write_json_line(&mut buffer, &serde_json::json!({"field": "title"})).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "{\"field\":\"title\"}\n");
    }
}
