//! Async driver around [`PageState`].
//!
//! Converter initialization runs as its own task, so a session is usable
//! (and renderable) immediately. Conversions are gated on readiness and on
//! the busy flag; file reading and the conversion call itself run on the
//! blocking pool.

use super::state::{ConversionRequest, Download, PageError, PageState, SelectedFile};
use crate::convert::{ConvertError, Converter};
use crate::core::SupportedFormat;
use parking_lot::Mutex;
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;

type SharedConverter = Arc<dyn Converter>;

/// A live page: state record plus the conversion boundary once loaded.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<PageState>>,
    converter: Arc<OnceLock<SharedConverter>>,
    settled: watch::Receiver<bool>,
}

impl Session {
    /// Create a session and start loading the converter in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(initial_format: SupportedFormat, init: F) -> Self
    where
        F: Future<Output = Result<SharedConverter, ConvertError>> + Send + 'static,
    {
        let state = Arc::new(Mutex::new(PageState::new(initial_format)));
        let converter = Arc::new(OnceLock::new());
        let (tx, settled) = watch::channel(false);

        tokio::spawn({
            let state = Arc::clone(&state);
            let converter = Arc::clone(&converter);
            async move {
                match init.await {
                    Ok(loaded) => {
                        let _ = converter.set(loaded);
                        state.lock().converter_ready();
                        crate::debug!("session"; "converter ready");
                    }
                    Err(e) => {
                        crate::debug!("session"; "converter init failed: {}", e);
                        state.lock().converter_failed(e.to_string());
                    }
                }
                let _ = tx.send(true);
            }
        });

        Self {
            state,
            converter,
            settled,
        }
    }

    /// Copy of the current state record.
    #[allow(dead_code)]
    pub fn snapshot(&self) -> PageState {
        self.state.lock().clone()
    }

    /// Resolve once converter initialization finished, successfully or not.
    pub async fn wait_until_settled(&self) {
        let mut settled = self.settled.clone();
        // Err only if the init task panicked; the state stays Loading then.
        let _ = settled.wait_for(|done| *done).await;
    }

    /// Select an input file. Only its metadata is read here.
    pub fn select_file(&self, path: &Path) -> Result<(), PageError> {
        let meta = std::fs::metadata(path)
            .map_err(|e| self.state.lock().file_read_failed(e.to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.state.lock().select_file(SelectedFile {
            name,
            size: meta.len(),
            path: path.to_path_buf(),
        });
        Ok(())
    }

    #[allow(dead_code)]
    pub fn clear_file(&self) {
        self.state.lock().clear_file();
    }

    pub fn choose_format(&self, format: SupportedFormat) {
        self.state.lock().choose_format(format);
    }

    #[allow(dead_code)]
    pub fn dismiss_error(&self) {
        self.state.lock().dismiss_error();
    }

    /// Run one conversion of the selected file to the selected format.
    ///
    /// Gate failures return immediately without touching the converter.
    pub async fn convert(&self) -> Result<Download, PageError> {
        let request = self.state.lock().begin_conversion()?;

        let outcome = match self.converter.get().cloned() {
            Some(converter) => run_conversion(converter, request).await,
            None => Err(PageError::ConverterLoading),
        };

        self.state.lock().finish_conversion(outcome)
    }
}

async fn run_conversion(
    converter: SharedConverter,
    request: ConversionRequest,
) -> Result<Download, PageError> {
    let ConversionRequest { file, target } = request;
    crate::debug!("session"; "converting {} -> {}", file.name, target);

    tokio::task::spawn_blocking(move || {
        let input = std::fs::read(&file.path).map_err(|e| PageError::ReadFile(e.to_string()))?;
        let output = converter
            .convert(&input, target)
            .map_err(|e| PageError::Conversion(e.to_string()))?;
        Ok(Download::new(&file.name, target, output))
    })
    .await
    .unwrap_or_else(|e| Err(PageError::Conversion(e.to_string())))
}
