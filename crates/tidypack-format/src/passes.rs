//! Rewrite passes applied to a single bundler message.
//!
//! Each pass is a standalone function so it can be tested in isolation.
//! [`MessageFormatter`](crate::MessageFormatter) runs them in a fixed order,
//! and several passes assume the earlier ones already ran (for example the
//! header cleanup expects module-wrapper lines to be gone).

use crate::highlight::Highlight;
use lazy_static::lazy_static;
use regex::{Match, Regex};

/// Label carried by every normalized syntax error.
pub const SYNTAX_ERROR_LABEL: &str = "Syntax error:";

/// Replacement for a missing `node-sass` module.
pub const SASS_HINT: &str = "To import Sass files, you first need to install node-sass.\n\
Run `npm install node-sass` or `yarn add node-sass` inside your workspace.";

const MODULE_NOT_FOUND_PREFIX: &str = "Module not found: ";

lazy_static! {
    static ref MODULE_WRAPPER: Regex = Regex::new(r"Module [A-z ]+\(from").unwrap();
    static ref PARSING_ERROR: Regex =
        Regex::new(r"Line ([0-9]+):(?:([0-9]+):?)?\s*Parsing error: (.+)$").unwrap();
    static ref CSS_SYNTAX_ERROR: Regex =
        Regex::new(r"SyntaxError\s+\(([0-9]+):([0-9]+)\)\s*(.+?)\n").unwrap();
    static ref EXPORT_NOT_FOUND: Regex =
        Regex::new(r"(?m)^.*export '([^']+)' was not found in '(.+?)'.*$").unwrap();
    static ref DEFAULT_EXPORT_NOT_FOUND: Regex = Regex::new(
        r"(?m)^.*export 'default' \(imported as '(.+?)'\) was not found in '(.+?)'.*$"
    )
    .unwrap();
    static ref ALIASED_EXPORT_NOT_FOUND: Regex = Regex::new(
        r"(?m)^.*export '(.+?)' \(imported as '(.+?)'\) was not found in '(.+?)'.*$"
    )
    .unwrap();
    static ref LOCATION_SUFFIX: Regex = Regex::new(r"^(.*) [0-9]+:[0-9]+-[0-9]+$").unwrap();
    static ref SASS_MISSING: Regex = Regex::new(r"Cannot find module.+node-sass").unwrap();
    // The location group is lazy so the webpack check below sees the shortest
    // candidate; any longer one would contain the same positions.
    static ref STACK_FRAME: Regex =
        Regex::new(r"(?m)^\s*at\s(.*?):[0-9]+:[0-9]+[\s)]*(?:\n|$)").unwrap();
    static ref ANONYMOUS_FRAME: Regex = Regex::new(r"(?m)^\s*at\s<anonymous>(?:\n|$)").unwrap();
}

/// Split a message into owned lines on `\n`. Always yields at least one line.
pub fn split_lines(message: &str) -> Vec<String> {
    message.split('\n').map(str::to_owned).collect()
}

/// Drop the `Module Error (from ./loader.js):` style wrapper lines.
pub fn strip_module_wrappers(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !MODULE_WRAPPER.is_match(line))
        .collect()
}

/// Turn a linter `Line N:C Parsing error: msg` line into a syntax error.
///
/// Returns `None` when the line is not a parsing error.
pub fn parsing_error_to_syntax_error(line: &str) -> Option<String> {
    let caps = PARSING_ERROR.captures(line)?;
    let position = match caps.get(2) {
        Some(column) => format!("{}:{}", &caps[1], column.as_str()),
        None => caps[1].to_string(),
    };
    Some(format!("{} {} ({})", SYNTAX_ERROR_LABEL, &caps[3], position))
}

/// Apply [`parsing_error_to_syntax_error`] to every line.
pub fn normalize_parsing_errors(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| parsing_error_to_syntax_error(&line).unwrap_or(line))
        .collect()
}

/// Rewrite `SyntaxError (N:C) msg` (CSS loaders) into the syntax error label.
pub fn smoosh_css_syntax_errors(message: &str) -> String {
    CSS_SYNTAX_ERROR
        .replace_all(message, "Syntax error: ${3} (${1}:${2})\n")
        .into_owned()
}

/// Rewrite the three "export ... was not found" shapes into import errors.
///
/// The plain form cannot capture across a quote, so lines carrying an
/// `(imported as '...')` clause fall through to the dedicated rewrites.
pub fn rewrite_export_errors(message: &str) -> String {
    let message = EXPORT_NOT_FOUND.replace_all(
        message,
        "Attempted import error: '${1}' is not exported from '${2}'.",
    );
    let message = DEFAULT_EXPORT_NOT_FOUND.replace_all(
        &message,
        "Attempted import error: '${2}' does not contain a default export (imported as '${1}').",
    );
    ALIASED_EXPORT_NOT_FOUND
        .replace_all(
            &message,
            "Attempted import error: '${1}' is not exported from '${3}' (imported as '${2}').",
        )
        .into_owned()
}

/// Remove a blank second line when the message has more than two lines.
pub fn remove_leading_blank_line(mut lines: Vec<String>) -> Vec<String> {
    if lines.len() > 2 && lines[1].trim().is_empty() {
        lines.remove(1);
    }
    lines
}

/// Strip the ` 3:10-20` location suffix webpack appends to the file name.
pub fn clean_header_location(mut lines: Vec<String>) -> Vec<String> {
    if let Some(header) = lines.first_mut() {
        let cleaned = LOCATION_SUFFIX
            .captures(header)
            .map(|caps| caps[1].to_string());
        if let Some(cleaned) = cleaned {
            *header = cleaned;
        }
    }
    lines
}

/// Collapse a "Module not found" message to its header and one cleaned line.
pub fn simplify_module_not_found(mut lines: Vec<String>) -> Vec<String> {
    let is_module_not_found = lines
        .get(1)
        .map_or(false, |line| line.starts_with(MODULE_NOT_FOUND_PREFIX));
    if !is_module_not_found {
        return lines;
    }

    if lines.len() > 2 {
        log::trace!(
            "dropping {} resolution line(s) from module-not-found message",
            lines.len() - 2
        );
    }
    lines.truncate(2);
    lines[1] = lines[1].replacen("Error: ", "", 1).replacen(
        "Module not found: Cannot find file:",
        "Cannot find file:",
        1,
    );
    lines
}

/// Replace a missing `node-sass` message with installation instructions.
pub fn add_sass_hint(mut lines: Vec<String>) -> Vec<String> {
    let needs_hint = lines.get(1).map_or(false, |line| SASS_MISSING.is_match(line));
    if needs_hint {
        log::trace!("replacing missing node-sass message with install hint");
        lines[1] = SASS_HINT.to_string();
    }
    lines
}

/// Run the highlighter over the header line only.
pub fn highlight_header<H: Highlight + ?Sized>(
    mut lines: Vec<String>,
    highlighter: &H,
) -> Vec<String> {
    if let Some(header) = lines.first_mut() {
        *header = highlighter.highlight(header);
    }
    lines
}

/// True when some position inside the frame location begins `webpack:`.
///
/// The location is always followed by `:`, so a `webpack:` starting inside it
/// ends at that colon at the latest.
fn location_is_webpack(text: &str, location: Match<'_>) -> bool {
    text[location.start()..=location.end()].contains("webpack:")
}

/// Remove stack frames that do not point into `webpack:` sources, and bare
/// `at <anonymous>` frames.
///
/// A kept frame ends at its own newline, so blank lines after it stay
/// available to the next frame match, which may remove them.
pub fn strip_internal_frames(message: &str) -> String {
    let mut without_frames = String::with_capacity(message.len());
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(caps) = STACK_FRAME.captures_at(message, search_from) {
        let (Some(frame), Some(location)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if location_is_webpack(message, location) {
            search_from = message[location.end()..]
                .find('\n')
                .map_or(message.len(), |offset| location.end() + offset + 1);
        } else {
            without_frames.push_str(&message[copied..frame.start()]);
            copied = frame.end();
            search_from = frame.end();
        }
    }
    without_frames.push_str(&message[copied..]);

    ANONYMOUS_FRAME.replace_all(&without_frames, "").into_owned()
}

/// Drop every blank line that directly follows another blank line.
///
/// The first line is always kept.
pub fn collapse_blank_lines(lines: Vec<String>) -> Vec<String> {
    let mut previous_blank = false;
    lines
        .into_iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let blank = line.trim().is_empty();
            let keep = index == 0 || !blank || !previous_blank;
            previous_blank = blank;
            keep.then_some(line)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::Plain;

    fn lines(text: &str) -> Vec<String> {
        split_lines(text)
    }

    #[test]
    fn test_split_lines_empty() {
        assert_eq!(split_lines(""), vec![String::new()]);
    }

    #[test]
    fn test_strip_module_wrappers() {
        let result = strip_module_wrappers(lines(
            "./src/index.js\nModule Error (from ./node_modules/eslint-loader/index.js):\nreal content",
        ));
        assert_eq!(result, vec!["./src/index.js", "real content"]);
    }

    #[test]
    fn test_strip_module_wrappers_keeps_unrelated() {
        let input = lines("Module not found: Can't resolve 'x'");
        assert_eq!(strip_module_wrappers(input.clone()), input);
    }

    #[test]
    fn test_parsing_error_with_column() {
        assert_eq!(
            parsing_error_to_syntax_error("Line 5:10  Parsing error: Unexpected token").as_deref(),
            Some("Syntax error: Unexpected token (5:10)")
        );
    }

    #[test]
    fn test_parsing_error_without_column() {
        assert_eq!(
            parsing_error_to_syntax_error("Line 12: Parsing error: Unterminated string").as_deref(),
            Some("Syntax error: Unterminated string (12)")
        );
    }

    #[test]
    fn test_parsing_error_replaces_whole_line() {
        let result = normalize_parsing_errors(lines("  prefix Line 1:2: Parsing error: oops\nnext"));
        assert_eq!(result, vec!["Syntax error: oops (1:2)", "next"]);
    }

    #[test]
    fn test_smoosh_css_syntax_error() {
        let result = smoosh_css_syntax_errors("./src/App.css\nSyntaxError (3:7) Unknown word\n\nmore");
        assert_eq!(result, "./src/App.css\nSyntax error: Unknown word (3:7)\n\nmore");
    }

    #[test]
    fn test_smoosh_needs_trailing_newline() {
        let input = "SyntaxError (3:7) Unknown word";
        assert_eq!(smoosh_css_syntax_errors(input), input);
    }

    #[test]
    fn test_export_not_found() {
        assert_eq!(
            rewrite_export_errors("export 'Foo' was not found in './bar'"),
            "Attempted import error: 'Foo' is not exported from './bar'."
        );
    }

    #[test]
    fn test_default_export_not_found() {
        assert_eq!(
            rewrite_export_errors(
                "\"export 'default' (imported as 'App') was not found in './App'"
            ),
            "Attempted import error: './App' does not contain a default export (imported as 'App')."
        );
    }

    #[test]
    fn test_aliased_export_not_found() {
        assert_eq!(
            rewrite_export_errors("export 'Foo' (imported as 'Bar') was not found in './baz'"),
            "Attempted import error: 'Foo' is not exported from './baz' (imported as 'Bar')."
        );
    }

    #[test]
    fn test_export_rewrite_only_touches_matching_line() {
        let result = rewrite_export_errors("./src/a.js\nexport 'x' was not found in 'y'\ntail");
        assert_eq!(
            result,
            "./src/a.js\nAttempted import error: 'x' is not exported from 'y'.\ntail"
        );
    }

    #[test]
    fn test_remove_leading_blank_line() {
        assert_eq!(remove_leading_blank_line(lines("a\n  \nb")), vec!["a", "b"]);
        // Two lines are left alone.
        assert_eq!(remove_leading_blank_line(lines("a\n")), vec!["a", ""]);
        assert_eq!(remove_leading_blank_line(lines("a\nb\n")), vec!["a", "b", ""]);
    }

    #[test]
    fn test_clean_header_location() {
        assert_eq!(
            clean_header_location(lines("file.js 3:10-20\nbody")),
            vec!["file.js", "body"]
        );
        assert_eq!(clean_header_location(lines("file.js 3:10")), vec!["file.js 3:10"]);
        assert_eq!(clean_header_location(Vec::new()), Vec::<String>::new());
    }

    #[test]
    fn test_simplify_module_not_found() {
        let result = simplify_module_not_found(lines(
            "./src/App.js\nModule not found: Error: Can't resolve './missing'\n resolve './missing' in '/app/src'\n  using description file",
        ));
        assert_eq!(
            result,
            vec!["./src/App.js", "Module not found: Can't resolve './missing'"]
        );
    }

    #[test]
    fn test_simplify_module_not_found_file() {
        let result = simplify_module_not_found(lines(
            "./src/App.js\nModule not found: Cannot find file: 'Foo.js' does not match the corresponding name on disk",
        ));
        assert_eq!(
            result[1],
            "Cannot find file: 'Foo.js' does not match the corresponding name on disk"
        );
    }

    #[test]
    fn test_simplify_module_not_found_requires_prefix_at_start() {
        let input = lines("a.js\n  Module not found: x\nmore");
        assert_eq!(simplify_module_not_found(input.clone()), input);
        let single = lines("Module not found: x");
        assert_eq!(simplify_module_not_found(single.clone()), single);
    }

    #[test]
    fn test_sass_hint() {
        let result = add_sass_hint(lines("a.js\nCannot find module 'node-sass'"));
        assert_eq!(result, vec!["a.js".to_string(), SASS_HINT.to_string()]);
        let untouched = lines("a.js\nCannot find module 'sass-loader'");
        assert_eq!(add_sass_hint(untouched.clone()), untouched);
    }

    #[test]
    fn test_highlight_header_only() {
        let shout = |line: &str| line.to_uppercase();
        let result = highlight_header(lines("head\nbody"), &shout);
        assert_eq!(result, vec!["HEAD", "body"]);
        assert_eq!(highlight_header(lines("x"), &Plain), vec!["x"]);
    }

    #[test]
    fn test_strip_internal_frames() {
        let message = "Error\n    at Object.<anonymous> (/app/index.js:10:5)\n    at webpack:///./src/App.js:3:1\n    at <anonymous>\nafter";
        assert_eq!(
            strip_internal_frames(message),
            "Error\n    at webpack:///./src/App.js:3:1\nafter"
        );
    }

    #[test]
    fn test_strip_internal_frames_last_line() {
        assert_eq!(
            strip_internal_frames("Error\n  at run (node:internal/main:1:2)"),
            "Error\n"
        );
    }

    #[test]
    fn test_strip_internal_frames_keeps_prose() {
        let message = "Failed at compile time: see above";
        assert_eq!(strip_internal_frames(message), message);
    }

    #[test]
    fn test_webpack_frame_inside_parens_is_kept() {
        let message = "x\n    at render (webpack:///./src/App.js:7:9)";
        assert_eq!(strip_internal_frames(message), message);
    }

    #[test]
    fn test_kept_frame_does_not_shield_following_blank_line() {
        assert_eq!(
            strip_internal_frames("h\n  at webpack:///a.js:1:2\n\n  at foo (/x.js:1:2)\nnext"),
            "h\n  at webpack:///a.js:1:2\nnext"
        );
    }

    #[test]
    fn test_consecutive_webpack_frames_kept() {
        let message = "h\n  at webpack:///a.js:1:2\n  at webpack:///b.js:3:4\n";
        assert_eq!(strip_internal_frames(message), message);
    }

    #[test]
    fn test_webpack_location_ending_at_colon() {
        let message = "h\n  at webpack:1:2";
        assert_eq!(strip_internal_frames(message), message);
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(
            collapse_blank_lines(lines("a\n\n\n\nb\n \n\nc")),
            vec!["a", "", "b", " ", "c"]
        );
        // Line 0 survives even when blank.
        assert_eq!(collapse_blank_lines(lines("\n\nx")), vec!["", "x"]);
        assert_eq!(collapse_blank_lines(lines("a\nb")), vec!["a", "b"]);
    }
}
