//! Page UI state machine.
//!
//! [`PageState`] is the single record behind the converter page: selected
//! file, target format, dropdown, converter readiness, busy flag, the
//! current message and the last download. Every change goes through one of
//! the transition methods below; the server render and the browser script
//! both draw from the same record.

use crate::core::SupportedFormat;
use std::path::PathBuf;
use thiserror::Error;

/// A user-facing, dismissible page message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Please select a file first")]
    NoFile,

    #[error("The converter is still loading, please wait a moment")]
    ConverterLoading,

    #[error("The converter failed to load: {0}")]
    ConverterUnavailable(String),

    #[error("A conversion is already in progress")]
    Busy,

    #[error("Failed to read file: {0}")]
    ReadFile(String),

    #[error("Conversion failed: {0}")]
    Conversion(String),
}

/// File picked by the user, read only when a conversion starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    /// Size for display, e.g. `12.3 KB`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size as f64 / 1024.0)
    }
}

/// Initialization status of the conversion boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterStatus {
    Loading,
    Ready,
    Failed(String),
}

impl ConverterStatus {
    /// Value of the card's `data-converter` attribute.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

/// Converted output offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub format: SupportedFormat,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Name the output after the input: `photo.png` -> `photo.jpg`.
    pub fn new(input_name: &str, format: SupportedFormat, bytes: Vec<u8>) -> Self {
        let stem = match input_name.rfind('.') {
            Some(pos) => &input_name[..pos],
            None => input_name,
        };
        let stem = if stem.is_empty() { "converted" } else { stem };
        Self {
            file_name: format!("{stem}.{}", format.extension()),
            format,
            bytes,
        }
    }
}

/// Work handed to the conversion boundary once all gates passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub file: SelectedFile,
    pub target: SupportedFormat,
}

/// The page's explicit state record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    file: Option<SelectedFile>,
    format: SupportedFormat,
    dropdown_open: bool,
    converter: ConverterStatus,
    busy: bool,
    error: Option<PageError>,
    download: Option<Download>,
}

impl PageState {
    /// Fresh page: no file, converter still loading.
    pub fn new(format: SupportedFormat) -> Self {
        Self {
            file: None,
            format,
            dropdown_open: false,
            converter: ConverterStatus::Loading,
            busy: false,
            error: None,
            download: None,
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub const fn format(&self) -> SupportedFormat {
        self.format
    }

    pub const fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub const fn converter(&self) -> &ConverterStatus {
        &self.converter
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&PageError> {
        self.error.as_ref()
    }

    #[allow(dead_code)]
    pub fn download(&self) -> Option<&Download> {
        self.download.as_ref()
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    pub fn select_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
        self.error = None;
        self.download = None;
    }

    #[allow(dead_code)]
    pub fn clear_file(&mut self) {
        self.file = None;
        self.download = None;
    }

    #[allow(dead_code)]
    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    #[allow(dead_code)]
    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    /// Pick the target format; closes the menu.
    pub fn choose_format(&mut self, format: SupportedFormat) {
        self.format = format;
        self.dropdown_open = false;
    }

    /// A file could not be read; the previous selection is kept.
    pub fn file_read_failed(&mut self, detail: impl Into<String>) -> PageError {
        let err = PageError::ReadFile(detail.into());
        self.error = Some(err.clone());
        err
    }

    pub fn converter_ready(&mut self) {
        self.converter = ConverterStatus::Ready;
    }

    pub fn converter_failed(&mut self, detail: impl Into<String>) {
        let detail = detail.into();
        self.error = Some(PageError::ConverterUnavailable(detail.clone()));
        self.converter = ConverterStatus::Failed(detail);
    }

    /// Gate and start a conversion.
    ///
    /// Fails without side effects beyond recording the message when a
    /// conversion is already running, no file is selected, or the
    /// converter is not ready.
    pub fn begin_conversion(&mut self) -> Result<ConversionRequest, PageError> {
        let gate = if self.busy {
            Err(PageError::Busy)
        } else if self.file.is_none() {
            Err(PageError::NoFile)
        } else {
            match &self.converter {
                ConverterStatus::Loading => Err(PageError::ConverterLoading),
                ConverterStatus::Failed(detail) => {
                    Err(PageError::ConverterUnavailable(detail.clone()))
                }
                ConverterStatus::Ready => Ok(()),
            }
        };

        if let Err(err) = gate {
            self.error = Some(err.clone());
            return Err(err);
        }

        let file = self.file.clone().ok_or(PageError::NoFile)?;
        self.busy = true;
        self.error = None;
        self.download = None;
        Ok(ConversionRequest {
            file,
            target: self.format,
        })
    }

    /// Record a conversion outcome and leave the busy state.
    pub fn finish_conversion(
        &mut self,
        outcome: Result<Download, PageError>,
    ) -> Result<Download, PageError> {
        self.busy = false;
        match &outcome {
            Ok(download) => self.download = Some(download.clone()),
            Err(err) => self.error = Some(err.clone()),
        }
        outcome
    }

    #[allow(dead_code)]
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> SelectedFile {
        SelectedFile {
            name: "photo.png".into(),
            size: 2048,
            path: PathBuf::from("/tmp/photo.png"),
        }
    }

    #[test]
    fn test_new_state() {
        let state = PageState::new(SupportedFormat::Webp);
        assert_eq!(state.format(), SupportedFormat::Webp);
        assert_eq!(state.converter(), &ConverterStatus::Loading);
        assert!(!state.is_busy());
        assert!(state.file().is_none());
    }

    #[test]
    fn test_conversion_requires_file() {
        let mut state = PageState::new(SupportedFormat::Png);
        state.converter_ready();
        assert_eq!(state.begin_conversion(), Err(PageError::NoFile));
        assert_eq!(
            state.error().map(ToString::to_string).as_deref(),
            Some("Please select a file first")
        );
        assert!(!state.is_busy());
    }

    #[test]
    fn test_conversion_requires_ready_converter() {
        let mut state = PageState::new(SupportedFormat::Png);
        state.select_file(file());
        assert_eq!(state.begin_conversion(), Err(PageError::ConverterLoading));
        assert!(!state.is_busy());

        state.converter_failed("wasm fetch failed");
        assert_eq!(
            state.begin_conversion(),
            Err(PageError::ConverterUnavailable("wasm fetch failed".into()))
        );
    }

    #[test]
    fn test_single_conversion_in_flight() {
        let mut state = PageState::new(SupportedFormat::Jpg);
        state.select_file(file());
        state.converter_ready();

        let request = state.begin_conversion().unwrap();
        assert_eq!(request.target, SupportedFormat::Jpg);
        assert!(state.is_busy());
        assert_eq!(state.begin_conversion(), Err(PageError::Busy));
        assert!(state.is_busy());
    }

    #[test]
    fn test_failure_resets_busy_and_is_dismissible() {
        let mut state = PageState::new(SupportedFormat::Gif);
        state.select_file(file());
        state.converter_ready();
        state.begin_conversion().unwrap();

        let outcome = state.finish_conversion(Err(PageError::Conversion("bad data".into())));
        assert!(outcome.is_err());
        assert!(!state.is_busy());
        assert_eq!(
            state.error().map(ToString::to_string).as_deref(),
            Some("Conversion failed: bad data")
        );

        state.dismiss_error();
        assert!(state.error().is_none());
        assert!(state.begin_conversion().is_ok());
    }

    #[test]
    fn test_success_records_download() {
        let mut state = PageState::new(SupportedFormat::Bmp);
        state.select_file(file());
        state.converter_ready();
        state.begin_conversion().unwrap();

        let download = Download::new("photo.png", SupportedFormat::Bmp, vec![1, 2, 3]);
        state.finish_conversion(Ok(download)).unwrap();
        assert!(!state.is_busy());
        assert_eq!(state.download().unwrap().file_name, "photo.bmp");

        state.select_file(file());
        assert!(state.download().is_none());
    }

    #[test]
    fn test_read_failure_is_a_page_message() {
        let mut state = PageState::new(SupportedFormat::Png);
        state.select_file(file());

        let err = state.file_read_failed("permission denied");
        assert_eq!(err.to_string(), "Failed to read file: permission denied");
        assert_eq!(state.error(), Some(&err));
        assert_eq!(state.file(), Some(&file()));

        state.dismiss_error();
        assert!(state.error().is_none());
    }

    #[test]
    fn test_dropdown_and_format_choice() {
        let mut state = PageState::new(SupportedFormat::Png);
        state.toggle_dropdown();
        assert!(state.dropdown_open());
        state.choose_format(SupportedFormat::Tiff);
        assert!(!state.dropdown_open());
        assert_eq!(state.format(), SupportedFormat::Tiff);
        state.toggle_dropdown();
        state.close_dropdown();
        assert!(!state.dropdown_open());
    }

    #[test]
    fn test_download_names() {
        assert_eq!(
            Download::new("a.b.png", SupportedFormat::Ff, vec![]).file_name,
            "a.b.ff"
        );
        assert_eq!(
            Download::new("noext", SupportedFormat::Jpg, vec![]).file_name,
            "noext.jpg"
        );
        assert_eq!(
            Download::new(".png", SupportedFormat::Ico, vec![]).file_name,
            "converted.ico"
        );
    }

    #[test]
    fn test_size_label() {
        assert_eq!(file().size_label(), "2.0 KB");
    }
}
