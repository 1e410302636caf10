use crate::consts;
use crate::error::{ErrorKind, Result};
use std::borrow::Cow;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One `dojo.provide` declaration found in a file or buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provide {
    /// The dotted identifier exactly as written, e.g. `com.spam.Eggs`.
    pub qualified: String,
    /// The final dot-separated segment, e.g. `Eggs`.
    pub short: String,
}

/// Returns the final dot-separated segment of a qualified name.
///
/// A name without any period is its own short name.
///
/// # Examples
///
/// ```rust
/// use dojoscout_scan::short_name;
///
/// assert_eq!(short_name("com.spam.Eggs"), "Eggs");
/// assert_eq!(short_name("Eggs"), "Eggs");
/// ```
pub fn short_name(qualified: &str) -> &str {
    match qualified.rsplit_once('.') {
        Some((_, short)) => short,
        None => qualified,
    }
}

/// The line budget of a scan.
///
/// Starts out covering the first hundred lines of a file. Every match
/// recomputes the limit to a handful of lines past the match, so a run of
/// consecutive declarations is followed wherever it leads, but the scan
/// stops shortly after the declarations dry up. The limit is *replaced*,
/// not widened; a match on the very first line narrows the window to the
/// few lines after it.
#[derive(Debug, Clone, Copy)]
pub struct ScanWindow {
    limit: usize,
}

impl ScanWindow {
    pub fn new() -> Self {
        Self { limit: consts::DEFAULT_WINDOW }
    }

    /// Whether the zero-based line index is still inside the window.
    pub fn contains(&self, line: usize) -> bool {
        line <= self.limit
    }

    /// Recompute the limit after a match on `line`.
    pub fn extend_past(&mut self, line: usize) {
        self.limit = line + consts::LOOKAHEAD;
    }
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends every declaration on `line` to `found`; true if there were any.
fn provides_in(line: &str, found: &mut Vec<Provide>) -> bool {
    let mut any = false;
    for captures in consts::PROVIDE_REGEX.captures_iter(line) {
        let qualified = captures[1].to_string();
        found.push(Provide {
            short: short_name(&qualified).to_string(),
            qualified,
        });
        any = true;
    }
    any
}

/// Scans an in-memory buffer for `dojo.provide` declarations.
///
/// Returns the declarations in order of appearance. The scan is windowed:
/// see [`ScanWindow`] for how far into the buffer it is willing to look.
pub fn scan_source(source: &str) -> Vec<Provide> {
    let mut window = ScanWindow::new();
    let mut found = Vec::new();
    for (line, text) in source.lines().enumerate() {
        if !window.contains(line) {
            break;
        }
        if provides_in(text, &mut found) {
            window.extend_past(line);
        }
    }
    found
}

/// Scans a file for `dojo.provide` declarations.
///
/// Reads only as many lines as the [`ScanWindow`] allows, so a large bundle
/// with no declarations near the top costs a hundred lines of I/O, not the
/// whole file. Lines that are not valid UTF-8 are re-decoded as
/// Windows-1252 rather than skipped.
///
/// # Errors
///
/// Fails only if the file cannot be opened or read.
pub async fn scan_file(path: &Path) -> Result<Vec<Provide>> {
    let file = File::open(path).await.map_err(|e| ErrorKind::io(e, path))?;
    let mut reader = BufReader::new(file);
    let mut raw = Vec::new();
    let mut window = ScanWindow::new();
    let mut found = Vec::new();
    let mut line = 0usize;
    loop {
        raw.clear();
        let read = reader.read_until(b'\n', &mut raw).await.map_err(|e| ErrorKind::io(e, path))?;
        if read == 0 || !window.contains(line) {
            break;
        }
        if provides_in(&decode(&raw), &mut found) {
            window.extend_past(line);
        }
        line += 1;
    }
    tracing::trace!(path = %path.display(), declarations = found.len(), "scanned file");
    Ok(found)
}

/// UTF-8 first; anything invalid is re-decoded as Windows-1252, which
/// assigns a character to every byte and therefore cannot fail. The
/// declaration pattern is pure ASCII, so the choice of fallback never
/// changes what matches.
fn decode(raw: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(raw) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _, _) = encoding_rs::WINDOWS_1252.decode(raw);
            text
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("com.spam.Eggs", "Eggs")]
    #[case("a.b", "b")]
    #[case("Eggs", "Eggs")]
    #[case("dijit._base.scroll", "scroll")]
    #[case("a.b.$inner", "$inner")]
    #[case("trailing.", "")]
    fn test_short_name(#[case] qualified: &str, #[case] expected: &str) {
        assert_eq!(short_name(qualified), expected);
    }

    #[rstest]
    #[case("dojo.provide('com.spam.Eggs');", &["com.spam.Eggs"])]
    #[case(r#"dojo.provide("com.spam.Eggs");"#, &["com.spam.Eggs"])]
    // Opening and closing quotes are matched independently.
    #[case(r#"dojo.provide("com.spam.Eggs');"#, &["com.spam.Eggs"])]
    #[case("dojo.provide(  'a.b.C'  );", &["a.b.C"])]
    #[case("dojo.provide('a-b._c.$D2');", &["a-b._c.$D2"])]
    #[case("dojo.provide('a.A'); dojo.provide('a.B');", &["a.A", "a.B"])]
    #[case("if (x) { dojo.provide('a.A'); }", &["a.A"])]
    #[case("dojo.require('a.A');", &[])]
    #[case("dojo.provide(a.A);", &[])]
    #[case("dojo.provide('a A');", &[])]
    #[case("// just a comment", &[])]
    fn test_pattern(#[case] line: &str, #[case] expected: &[&str]) {
        let found = scan_source(line);
        let qualified: Vec<&str> = found.iter().map(|p| p.qualified.as_str()).collect();
        assert_eq!(qualified, expected);
    }

    #[test]
    fn test_empty_source() {
        assert!(scan_source("").is_empty());
    }

    #[test]
    fn test_short_names_recorded() {
        let found = scan_source("dojo.provide('com.spam.Eggs');");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].short, "Eggs");
        assert_eq!(found[0].qualified, "com.spam.Eggs");
    }

    #[test]
    fn test_consecutive_declarations() {
        let source = "dojo.provide(\"a.b.C\");\ndojo.provide('a.b.D');";
        let found = scan_source(source);
        let qualified: Vec<&str> = found.iter().map(|p| p.qualified.as_str()).collect();
        assert_eq!(qualified, ["a.b.C", "a.b.D"]);
    }

    #[test]
    fn test_window_narrows_after_early_match() {
        // A match on line 0 narrows the window to line 4; the declaration
        // on line 50 is never reached.
        let source = format!("dojo.provide('a.A');{}dojo.provide('a.B');", "\n".repeat(50));
        let found = scan_source(&source);
        let qualified: Vec<&str> = found.iter().map(|p| p.qualified.as_str()).collect();
        assert_eq!(qualified, ["a.A"]);
    }

    #[test]
    fn test_window_extends_past_late_match() {
        // Line 99 is inside the default window and pushes the limit to 103,
        // catching the supporting declaration there.
        let source =
            format!("{}dojo.provide('a.A');\n\n\n\ndojo.provide('a.B');", "\n".repeat(99));
        let found = scan_source(&source);
        let qualified: Vec<&str> = found.iter().map(|p| p.qualified.as_str()).collect();
        assert_eq!(qualified, ["a.A", "a.B"]);
    }

    #[test]
    fn test_default_window_boundary() {
        // Line 100 (zero-based) is the last line scanned by default.
        let at_limit = format!("{}dojo.provide('a.A');", "\n".repeat(100));
        assert_eq!(scan_source(&at_limit).len(), 1);
        let past_limit = format!("{}dojo.provide('a.A');", "\n".repeat(101));
        assert!(scan_source(&past_limit).is_empty());
    }

    #[tokio::test]
    async fn test_scan_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "// Spam module").unwrap();
        writeln!(file, "dojo.provide('com.spam.Eggs');").unwrap();
        let found = scan_file(file.path()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].qualified, "com.spam.Eggs");
    }

    #[tokio::test]
    async fn test_scan_file_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let found = scan_file(file.path()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_scan_file_windows_1252_fallback() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // 0xE9 is `é` in Windows-1252 but invalid on its own in UTF-8.
        file.write_all(b"// caf\xE9\ndojo.provide('a.b.C');\n").unwrap();
        file.flush().unwrap();
        let found = scan_file(file.path()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].qualified, "a.b.C");
    }

    #[tokio::test]
    async fn test_scan_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_file(&dir.path().join("nope.js")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }
}
