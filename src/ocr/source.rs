//! Producers of raw OCR text.
//!
//! Capturing the card image and running the OCR engine happen outside the
//! crate. The sort session only needs the finished text, one capture per
//! call, through `TextSource`.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{Result, SorterError};

/// Something that yields the OCR text for the card currently in the sorter.
pub trait TextSource {
    /// Capture the current card and return the OCR engine's raw output.
    ///
    /// Returns `Ok(None)` when the source has no more cards.
    fn capture(&mut self) -> Result<Option<String>>;

    /// Capture the same card again after its text could not be routed.
    ///
    /// Sources backed by a live camera take a fresh capture. Sources that
    /// replay stored text return the text of the last capture, so a retry
    /// never consumes the next card.
    fn recapture(&mut self) -> Result<Option<String>> {
        self.capture()
    }
}

/// Reads the same output file on every capture.
///
/// Matches an OCR engine that rewrites a fixed file (e.g. `out.txt`) for
/// each image it processes.
#[derive(Clone, Debug)]
pub struct FileTextSource {
    path: PathBuf,
}

impl FileTextSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for FileTextSource {
    fn capture(&mut self) -> Result<Option<String>> {
        read_text(&self.path).map(Some)
    }
}

/// One card per `.txt` file of a directory, in file name order.
#[derive(Clone, Debug)]
pub struct DirectoryTextSource {
    pending: VecDeque<PathBuf>,
    current: Option<PathBuf>,
}

impl DirectoryTextSource {
    /// List the `.txt` files of `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| {
                SorterError::Config(format!("cannot list OCR directory '{}': {}", dir.display(), e))
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();
        debug!(dir = %dir.display(), files = files.len(), "OCR directory opened");
        Ok(Self {
            pending: files.into(),
            current: None,
        })
    }

    /// Number of captures left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl TextSource for DirectoryTextSource {
    fn capture(&mut self) -> Result<Option<String>> {
        self.current = self.pending.pop_front();
        match &self.current {
            Some(path) => read_text(path).map(Some),
            None => Ok(None),
        }
    }

    fn recapture(&mut self) -> Result<Option<String>> {
        match &self.current {
            Some(path) => read_text(path).map(Some),
            None => Ok(None),
        }
    }
}

/// In-memory captures, consumed in order.
///
/// Every capture takes the next text, retries included, like a camera that
/// produces a new frame each time.
#[derive(Clone, Debug, Default)]
pub struct QueuedTextSource {
    texts: VecDeque<String>,
}

impl QueuedTextSource {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }

    /// Append another capture.
    pub fn push(&mut self, text: impl Into<String>) {
        self.texts.push_back(text.into());
    }
}

impl TextSource for QueuedTextSource {
    fn capture(&mut self) -> Result<Option<String>> {
        Ok(self.texts.pop_front())
    }
}

fn read_text(path: &Path) -> Result<String> {
    // OCR output is not guaranteed to be valid UTF-8.
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
