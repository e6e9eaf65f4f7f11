use arboard::Clipboard;
use std::sync::{Mutex, OnceLock};

// Linux-specific imports for PRIMARY selection support
#[cfg(target_os = "linux")]
use arboard::{GetExtLinux, LinuxClipboardKind, SetExtLinux};

/// Global clipboard instance that persists for the application lifetime.
/// This ensures clipboard data remains available after write operations.
static CLIPBOARD: OnceLock<Mutex<Clipboard>> = OnceLock::new();

/// Get or initialize the global clipboard instance
fn get_clipboard() -> &'static Mutex<Clipboard> {
    CLIPBOARD.get_or_init(|| Mutex::new(Clipboard::new().expect("Failed to initialize clipboard")))
}

/// Copy text to system clipboard
///
/// On Linux, copies to BOTH CLIPBOARD and PRIMARY selections for
/// compatibility with middle-click paste and Shift+Insert.
pub fn copy(text: String) -> Result<(), String> {
    if text.is_empty() {
        return Err("Cannot copy empty text".to_string());
    }

    #[cfg(target_os = "linux")]
    {
        let mut clipboard = get_clipboard()
            .lock()
            .map_err(|e| format!("Failed to lock clipboard: {}", e))?;

        // Copy to CLIPBOARD selection (Ctrl+C/V)
        clipboard
            .set()
            .clipboard(LinuxClipboardKind::Clipboard)
            .text(text.clone())
            .map_err(|e| format!("Failed to set clipboard text: {}", e))?;

        // PRIMARY may not be supported on some Wayland compositors
        let _ = clipboard
            .set()
            .clipboard(LinuxClipboardKind::Primary)
            .text(text);
    }

    #[cfg(not(target_os = "linux"))]
    {
        let mut clipboard = get_clipboard()
            .lock()
            .map_err(|e| format!("Failed to lock clipboard: {}", e))?;
        clipboard
            .set_text(text)
            .map_err(|e| format!("Failed to set clipboard text: {}", e))?;
    }

    Ok(())
}

/// Paste text from system clipboard
///
/// On Linux, tries CLIPBOARD selection first, then falls back to PRIMARY.
/// Returns None if clipboard is empty or inaccessible.
pub fn paste() -> Option<String> {
    let mut clipboard = get_clipboard().lock().ok()?;

    #[cfg(target_os = "linux")]
    {
        if let Ok(text) = clipboard
            .get()
            .clipboard(LinuxClipboardKind::Clipboard)
            .text()
        {
            if !text.is_empty() {
                return Some(text);
            }
        }

        clipboard
            .get()
            .clipboard(LinuxClipboardKind::Primary)
            .text()
            .ok()
    }

    #[cfg(not(target_os = "linux"))]
    clipboard.get_text().ok()
}
