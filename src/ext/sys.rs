use std::{
    io::{BufWriter, Write, stdout},
    fs::{self, File},
    path::{Path, PathBuf},
    ffi::OsStr,
};
use crate::err::{Error, add_path};

/// Finds an executable, and returns Error, if executable is not available.
pub fn find_exe(p: impl AsRef<Path>) -> Result<PathBuf, Error> {
    which::which(p.as_ref()).map_err(|_| Error::NoExec(p.as_ref().to_owned()))
}

/// Creates a buffered file OR stdout if filename is `-`.
pub fn create_uncompressed(filename: &Path) -> Result<Box<dyn Write>, Error> {
    if filename == OsStr::new("-") {
        Ok(Box::new(BufWriter::new(stdout())))
    } else {
        let file = File::create(filename).map_err(add_path!(filename))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Loads JSON file.
pub fn load_json(filename: &Path) -> Result<json::JsonValue, Error> {
    let contents = fs::read_to_string(filename).map_err(add_path!(filename))?;
    Ok(json::parse(&contents)?)
}
