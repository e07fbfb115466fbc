//!
//! JSON output
//!
//! * `to_json_file`: pretty printed single value
//! * `write_rows`: array with one element per line, handy for `grep`/`jq -c`
//!
use crate::error::Result;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

/// Formatter that breaks lines only between the elements of the outermost array
#[derive(Default)]
struct RowsFormatter {
    depth: usize,
}

impl Formatter for RowsFormatter {
    fn begin_array<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.depth += 1;
        w.write_all(b"[")
    }
    fn end_array<W: ?Sized + Write>(&mut self, w: &mut W) -> io::Result<()> {
        self.depth -= 1;
        if self.depth == 0 {
            w.write_all(b"\n")?;
        }
        w.write_all(b"]")
    }
    fn begin_array_value<W: ?Sized + Write>(&mut self, w: &mut W, first: bool) -> io::Result<()> {
        if !first {
            w.write_all(b",")?;
        }
        if self.depth == 1 {
            w.write_all(b"\n\t")?;
        }
        Ok(())
    }
    fn end_array_value<W: ?Sized + Write>(&mut self, _w: &mut W) -> io::Result<()> {
        Ok(())
    }
}

///
/// Write `rows` as a JSON array, one row per line.
///
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut ser = serde_json::Serializer::with_formatter(writer, RowsFormatter::default());
    let mut seq = ser.serialize_seq(Some(rows.len()))?;
    for row in rows.iter() {
        seq.serialize_element(row)?;
    }
    seq.end()?;
    Ok(())
}

pub fn to_json_file<P: AsRef<std::path::Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(io::BufWriter::new(file), value)?;
    Ok(())
}
