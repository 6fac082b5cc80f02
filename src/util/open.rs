//! Opening links in the system browser.

use std::io;
use std::process::{Command, Stdio};

fn opener(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(url);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Opens `url` with the platform opener without waiting for it.
///
/// Output of the opener is discarded so it cannot draw over the TUI.
pub fn open_url(url: &str) -> io::Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a web link: {}", url),
        ));
    }
    opener(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_web_links() {
        let err = open_url("file:///etc/passwd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn opener_receives_url() {
        let cmd = opener("https://example.com/a");
        assert!(
            cmd.get_args()
                .any(|a| a == std::ffi::OsStr::new("https://example.com/a"))
        );
    }
}
