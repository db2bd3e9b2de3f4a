//! Text recognition: one image file in, one string out.
//!
//! The default engine is the Tesseract command-line tool, invoked as
//! `tesseract <image> stdout -l <lang> [--psm N]`. Running the CLI keeps the
//! crate free of a native link-time dependency on libtesseract/leptonica.

use crate::config::OcrConfig;
use crate::error::RecognizeError;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;
use tracing::debug;

/// An OCR engine.
pub trait TextRecognizer {
    /// Recognise the text in the image at `image_path`.
    fn recognize(&self, image_path: &Path) -> Result<String, RecognizeError>;
}

/// [`TextRecognizer`] that shells out to the `tesseract` executable.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    binary: PathBuf,
    lang: String,
    tessdata_dir: Option<PathBuf>,
    psm: Option<u8>,
}

impl TesseractRecognizer {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.tesseract.clone(),
            lang: config.lang.clone(),
            tessdata_dir: config.tessdata_dir.clone(),
            psm: config.psm,
        }
    }

    fn binary_name(&self) -> String {
        self.binary.display().to_string()
    }

    /// First line of `tesseract --version`, e.g. `tesseract 5.3.4`.
    pub fn version(&self) -> Result<String, RecognizeError> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .map_err(|source| RecognizeError::Launch {
                binary: self.binary_name(),
                source,
            })?;

        // Older releases print the banner on stderr.
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        Ok(text.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Arguments for one recognition call.
    fn args(&self, image_path: &Path) -> Vec<String> {
        let mut args = vec![
            image_path.display().to_string(),
            "stdout".to_string(),
            "-l".to_string(),
            self.lang.clone(),
        ];
        if let Some(psm) = self.psm {
            args.push("--psm".to_string());
            args.push(psm.to_string());
        }
        args
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image_path: &Path) -> Result<String, RecognizeError> {
        if !image_path.is_file() {
            return Err(RecognizeError::Unreadable(format!(
                "{} is not a file",
                image_path.display()
            )));
        }

        let start = Instant::now();
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args(image_path));
        if let Some(dir) = &self.tessdata_dir {
            cmd.env("TESSDATA_PREFIX", dir);
        }

        let output = cmd.output().map_err(|source| RecognizeError::Launch {
            binary: self.binary_name(),
            source,
        })?;

        if !output.status.success() {
            return Err(RecognizeError::Engine {
                binary: self.binary_name(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            "Recognised {} in {} ms ({} chars)",
            image_path.display(),
            start.elapsed().as_millis(),
            text.len()
        );
        Ok(text)
    }
}
