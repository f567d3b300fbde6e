use anyhow::Context;
use arboard::Clipboard;

/// Put `text` on the system clipboard.
///
/// On X11/Wayland the clipboard is served by the process that set it, so this
/// blocks until another program replaces the contents.
pub fn copy(text: &str) -> anyhow::Result<()> {
    let mut clipboard = Clipboard::new().context("failed to access clipboard")?;
    set_text(&mut clipboard, text).context("failed to copy to clipboard")?;
    Ok(())
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_text(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    eprintln!("Holding the clipboard until something else is copied (Ctrl-C releases it).");
    clipboard.set().wait().text(text.to_owned())
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_text(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}
