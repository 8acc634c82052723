#![allow(dead_code)]

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use decibinary::{TableConfig, Tables};

pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn open_fixture(name: &str) -> BufReader<File> {
    let path = fixture_root().join(name);
    let file = File::open(&path).unwrap_or_else(|_| panic!("fixture {:?} not found", path));
    BufReader::new(file)
}

/// Tables small enough to cross-check exhaustively.
pub fn small_tables(ceiling: u32) -> Tables {
    Tables::build(&TableConfig::new(ceiling)).expect("small tables build")
}
