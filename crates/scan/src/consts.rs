use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Every occurrence on a line counts, whitespace inside the parentheses is
// optional, and the opening and closing quote characters are matched
// independently (`dojo.provide("a.b.C')` is accepted).
regex!(PROVIDE_REGEX, r#"dojo\.provide\(\s*['"]([-a-zA-Z0-9_.$]+)['"]\s*\)"#);

/// Lines scanned from the top of a file before giving up, when no
/// declaration has been found yet.
pub(crate) const DEFAULT_WINDOW: usize = 100;

/// Lines granted past a match to catch trailing supporting declarations.
pub(crate) const LOOKAHEAD: usize = 4;
