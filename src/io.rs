pub mod cytoscape;
pub mod json;
pub mod newick;

use std::fs::File;
use std::io::prelude::*;

///
/// write string into a file
///
pub fn write_string<P: AsRef<std::path::Path>>(filename: P, string: &str) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(string.as_bytes())?;
    Ok(())
}
