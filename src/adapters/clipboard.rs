use crate::domain::ports::Clipboard;
use crate::utils::error::{ChartError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

fn clipboard_error(message: String) -> ChartError {
    ChartError::ClipboardError { message }
}

/// The desktop clipboard, reached through `arboard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub const NAME: &'static str = "system";
}

impl Clipboard for ArboardClipboard {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| clipboard_error(format!("system clipboard unavailable: {}", e)))?;
        clipboard
            .set_text(text)
            .map_err(|e| clipboard_error(format!("system clipboard rejected the text: {}", e)))
    }
}

/// Clipboard backed by an external program reading the text on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line such as `xclip -selection clipboard` on whitespace.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut parts = command_line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts.map(str::to_string).collect()))
    }

    #[cfg(target_os = "macos")]
    pub fn platform_default() -> Self {
        Self::new("pbcopy", vec![])
    }

    #[cfg(target_os = "windows")]
    pub fn platform_default() -> Self {
        Self::new("clip", vec![])
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    pub fn platform_default() -> Self {
        Self::new("xclip", vec!["-selection".into(), "clipboard".into()])
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| clipboard_error(format!("cannot start '{}': {}", self.program, e)))?;

        // stdin 必須在 wait 之前關閉，否則程式會一直等待輸入
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // 寫入失敗也要回收子程序
        let status = child
            .wait()
            .map_err(|e| clipboard_error(format!("'{}' did not finish: {}", self.program, e)))?;

        written.map_err(|e| clipboard_error(format!("writing to '{}' failed: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(clipboard_error(format!("'{}' exited with {}", self.program, status)))
        }
    }
}

/// A configured clipboard: the desktop clipboard or an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardBackend {
    System(ArboardClipboard),
    Command(CommandClipboard),
}

impl ClipboardBackend {
    pub fn system() -> Self {
        ClipboardBackend::System(ArboardClipboard)
    }

    pub fn platform_command() -> Self {
        ClipboardBackend::Command(CommandClipboard::platform_default())
    }

    /// `system` selects the desktop clipboard; anything else is a command line.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case(ArboardClipboard::NAME) {
            return Some(Self::system());
        }
        CommandClipboard::parse(value).map(ClipboardBackend::Command)
    }
}

impl Clipboard for ClipboardBackend {
    fn name(&self) -> &str {
        match self {
            ClipboardBackend::System(clipboard) => clipboard.name(),
            ClipboardBackend::Command(clipboard) => clipboard.name(),
        }
    }

    fn write_text(&self, text: &str) -> Result<()> {
        match self {
            ClipboardBackend::System(clipboard) => clipboard.write_text(text),
            ClipboardBackend::Command(clipboard) => clipboard.write_text(text),
        }
    }
}

/// Tries `primary`, then `fallback`. Returns the name of the clipboard that
/// accepted the text; fails only when both are rejected.
pub fn copy_with_fallback<'a>(
    primary: &'a dyn Clipboard,
    fallback: &'a dyn Clipboard,
    text: &str,
) -> Result<&'a str> {
    let primary_error = match primary.write_text(text) {
        Ok(()) => return Ok(primary.name()),
        Err(e) => e,
    };
    tracing::warn!(
        "Clipboard '{}' failed ({}), trying '{}'",
        primary.name(),
        primary_error,
        fallback.name()
    );

    match fallback.write_text(text) {
        Ok(()) => Ok(fallback.name()),
        Err(fallback_error) => Err(ChartError::ClipboardError {
            message: format!(
                "{}: {}; {}: {}",
                primary.name(),
                primary_error,
                fallback.name(),
                fallback_error
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct MockClipboard {
        name: &'static str,
        works: bool,
        written: RefCell<Option<String>>,
    }

    impl MockClipboard {
        fn new(name: &'static str, works: bool) -> Self {
            Self {
                name,
                works,
                written: RefCell::new(None),
            }
        }
    }

    impl Clipboard for MockClipboard {
        fn name(&self) -> &str {
            self.name
        }

        fn write_text(&self, text: &str) -> Result<()> {
            if !self.works {
                return Err(ChartError::ClipboardError {
                    message: "unavailable".to_string(),
                });
            }
            *self.written.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_primary_used_when_it_works() {
        let primary = MockClipboard::new("primary", true);
        let fallback = MockClipboard::new("fallback", true);

        let used = copy_with_fallback(&primary, &fallback, "<html>").unwrap();

        assert_eq!(used, "primary");
        assert_eq!(primary.written.borrow().as_deref(), Some("<html>"));
        assert!(fallback.written.borrow().is_none());
    }

    #[test]
    fn test_fallback_used_when_primary_fails() {
        let primary = MockClipboard::new("primary", false);
        let fallback = MockClipboard::new("fallback", true);

        let used = copy_with_fallback(&primary, &fallback, "<html>").unwrap();

        assert_eq!(used, "fallback");
        assert_eq!(fallback.written.borrow().as_deref(), Some("<html>"));
    }

    #[test]
    fn test_both_failing_is_clipboard_error() {
        let primary = MockClipboard::new("primary", false);
        let fallback = MockClipboard::new("fallback", false);

        let result = copy_with_fallback(&primary, &fallback, "<html>");
        match result {
            Err(ChartError::ClipboardError { message }) => {
                assert!(message.contains("primary"));
                assert!(message.contains("fallback"));
            }
            other => panic!("expected clipboard error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_command_line() {
        let clipboard = CommandClipboard::parse("xclip -selection clipboard").unwrap();
        assert_eq!(clipboard.program(), "xclip");
        assert_eq!(clipboard.args, vec!["-selection", "clipboard"]);
        assert!(CommandClipboard::parse("   ").is_none());
    }

    #[test]
    fn test_missing_program_is_clipboard_error() {
        let clipboard = CommandClipboard::new("paste-chart-no-such-clipboard-tool", vec![]);
        assert!(matches!(
            clipboard.write_text("x"),
            Err(ChartError::ClipboardError { .. })
        ));
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!(ClipboardBackend::parse("system"), Some(ClipboardBackend::system()));
        assert_eq!(ClipboardBackend::parse(" System "), Some(ClipboardBackend::system()));
        assert_eq!(
            ClipboardBackend::parse("wl-copy"),
            Some(ClipboardBackend::Command(CommandClipboard::new("wl-copy", vec![])))
        );
        assert!(ClipboardBackend::parse("").is_none());
        assert_eq!(ClipboardBackend::system().name(), "system");
    }

    // Zombie children of this process, read from /proc/<pid>/stat.
    #[cfg(target_os = "linux")]
    fn zombie_children() -> usize {
        let me = std::process::id().to_string();
        let Ok(entries) = std::fs::read_dir("/proc") else {
            return 0;
        };
        entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| std::fs::read_to_string(entry.path().join("stat")).ok())
            .filter(|stat| {
                // the command name may contain spaces, so skip past its closing paren
                let fields: Vec<&str> = stat
                    .rsplit_once(')')
                    .map(|(_, rest)| rest.split_whitespace().collect())
                    .unwrap_or_default();
                fields.first() == Some(&"Z") && fields.get(1) == Some(&me.as_str())
            })
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_write_still_reaps_program() {
        // `true` exits without reading, so a large write hits a closed pipe.
        let clipboard = CommandClipboard::new("true", vec![]);
        let before = zombie_children();

        let result = clipboard.write_text(&"x".repeat(4 << 20));

        match result {
            Err(ChartError::ClipboardError { message }) => {
                assert!(message.contains("writing to 'true' failed"), "{}", message)
            }
            other => panic!("expected clipboard error, got {:?}", other),
        }
        assert!(zombie_children() <= before);
    }
}
