use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Destination for copied snippets.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The OS clipboard. Opened lazily so headless runs never touch it unless asked to copy.
///
/// On Linux the selection is served by this process, so `set_text` blocks until
/// another application takes the clipboard over. Elsewhere it returns at once.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Whether `set_text` keeps running until the copied text is replaced.
    pub fn holds_until_replaced(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("not initialized".to_string()));
        };

        #[cfg(target_os = "linux")]
        let result = {
            use arboard::SetExtLinux;
            clipboard.set().wait().text(text.to_string())
        };
        #[cfg(not(target_os = "linux"))]
        let result = clipboard.set_text(text.to_string());

        result.map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// In-memory clipboard holding the last value written.
    #[derive(Default)]
    pub(crate) struct MemoryClipboard {
        pub(crate) contents: Option<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_memory_clipboard_keeps_last_value() {
        let mut clipboard = MemoryClipboard::default();
        clipboard.set_text("first").unwrap();
        clipboard.set_text("second").unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("second"));
    }

    #[test]
    fn test_system_clipboard_is_lazy_and_holds_on_linux() {
        let clipboard = SystemClipboard::default();
        assert!(clipboard.inner.is_none());
        assert_eq!(clipboard.holds_until_replaced(), cfg!(target_os = "linux"));
    }
}
