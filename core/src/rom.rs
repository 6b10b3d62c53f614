use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::constants::MAX_ROM_SIZE;

#[derive(Debug, Error)]
pub enum RomError {
    #[error("could not read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ROM is too large ({len} bytes), max size is {max} bytes")]
    TooLarge { len: usize, max: usize },
    #[error("invalid hexadecimal digit {found:?} at offset {offset}")]
    InvalidHexDigit { offset: usize, found: char },
    #[error("ROM is empty")]
    Empty,
}

/// How the bytes of a ROM file are encoded
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RomFormat {
    /// Raw big-endian instruction words
    Binary,
    /// Two hexadecimal digits per byte, whitespace allowed between digits
    Hex,
}

/// A program that fits in memory above 0x200
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rom {
    bytes: Vec<u8>,
}

impl Rom {
    /// Reads a ROM from a file
    ///
    /// # Arguments
    /// * `path` the file to read
    /// * `format` how the file contents are encoded
    pub fn open<P: AsRef<Path>>(path: P, format: RomFormat) -> Result<Rom, RomError> {
        let path = path.as_ref();
        let io_error = |source| RomError::Io {
            path: path.to_path_buf(),
            source,
        };
        debug!("reading {:?} ROM from {}", format, path.display());
        match format {
            RomFormat::Binary => Rom::from_bytes(fs::read(path).map_err(io_error)?),
            RomFormat::Hex => Rom::from_hex(&fs::read_to_string(path).map_err(io_error)?),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Rom, RomError> {
        if bytes.is_empty() {
            return Err(RomError::Empty);
        }
        if bytes.len() > MAX_ROM_SIZE {
            return Err(RomError::TooLarge {
                len: bytes.len(),
                max: MAX_ROM_SIZE,
            });
        }
        Ok(Rom { bytes })
    }

    /// Parses hexadecimal text such as `"00E0 1200"` into a ROM.
    /// A dangling final digit is ignored.
    pub fn from_hex(text: &str) -> Result<Rom, RomError> {
        let mut bytes = Vec::with_capacity(text.len() / 2);
        let mut high: Option<u8> = None;

        for (offset, found) in text.char_indices() {
            if found.is_ascii_whitespace() {
                continue;
            }
            let digit = found
                .to_digit(16)
                .ok_or(RomError::InvalidHexDigit { offset, found })? as u8;
            match high.take() {
                Some(high) => bytes.push(high << 4 | digit),
                None => high = Some(digit),
            }
        }

        if high.is_some() {
            warn!("dropping trailing hexadecimal digit");
        }
        Rom::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
