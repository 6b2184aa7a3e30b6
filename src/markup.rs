/*!
 * Inline markup utilities.
 *
 * The canonical model carries HTML-like tags (`<i>`, `<b>`, `<u>`, `<font>`)
 * and may also contain ASS override blocks (`{\an8}`). Handlers use the
 * helpers here to:
 * - strip markup before measuring text
 * - swap italic tags for a private placeholder token and back
 * - repair unbalanced italic tags
 * - re-flow captions that have grown past two lines
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// HTML-like style tags understood by the model
static HTML_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:i|b|u|font)(?:\s[^>]*)?>").expect("Invalid html tag regex")
});

/// ASS/SSA override blocks such as {\an8} or {\i1}
static ASS_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\\[^}]*\}").expect("Invalid ass tag regex")
});

static ITALIC_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(/?)i>").expect("Invalid italic tag regex")
});

pub const ITALIC_OPEN: &str = "<i>";
pub const ITALIC_CLOSE: &str = "</i>";

/// Remove all recognized inline markup
pub fn remove_tags(text: &str) -> String {
    if !text.contains('<') && !text.contains('{') {
        return text.to_string();
    }
    let without_html = HTML_TAG_REGEX.replace_all(text, "");
    ASS_TAG_REGEX.replace_all(&without_html, "").into_owned()
}

/// Count non-overlapping occurrences of `tag` in `text`
pub fn count_tag_in_text(text: &str, tag: &str) -> usize {
    if tag.is_empty() {
        return 0;
    }
    text.matches(tag).count()
}

/// Number of visual lines in `text`
pub fn line_count(text: &str) -> usize {
    count_tag_in_text(text, "\n") + 1
}

/// Length of `text` in characters once markup is removed
pub fn plain_length(text: &str) -> usize {
    remove_tags(text).chars().count()
}

/// Replace italic open and close tags with a single symmetric placeholder.
///
/// Inverse of [`decode_italic_placeholder`] for balanced, non-nested italics.
pub fn encode_italic_placeholder(text: &str, token: &str) -> String {
    ITALIC_TAG_REGEX.replace_all(text, regex::NoExpand(token)).into_owned()
}

/// Replace a symmetric placeholder with alternating `<i>` / `</i>` tags.
///
/// The first occurrence opens, the second closes, and so on. The result
/// is passed through [`fix_invalid_italic_tags`], so an odd number of
/// placeholders still yields balanced markup.
pub fn decode_italic_placeholder(text: &str, token: &str) -> String {
    if token.is_empty() || !text.contains(token) {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut italic_on = false;
    for (i, piece) in text.split(token).enumerate() {
        if i > 0 {
            result.push_str(if italic_on { ITALIC_CLOSE } else { ITALIC_OPEN });
            italic_on = !italic_on;
        }
        result.push_str(piece);
    }

    fix_invalid_italic_tags(&result)
}

/// Make sure every `<i>` has a matching `</i>`.
///
/// Stray closes and nested opens are dropped, a dangling open at the very
/// end is removed, any other unclosed open is closed at the end of the
/// text, and empty pairs disappear. Never fails.
pub fn fix_invalid_italic_tags(text: &str) -> String {
    if !ITALIC_TAG_REGEX.is_match(text) {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len() + ITALIC_CLOSE.len());
    let mut italic_on = false;
    let mut last = 0;

    for caps in ITALIC_TAG_REGEX.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        result.push_str(&text[last..whole.start()]);
        last = whole.end();

        let is_close = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        match (is_close, italic_on) {
            (false, false) => {
                result.push_str(ITALIC_OPEN);
                italic_on = true;
            }
            (true, true) => {
                result.push_str(ITALIC_CLOSE);
                italic_on = false;
            }
            // nested open or orphan close
            _ => {}
        }
    }
    result.push_str(&text[last..]);

    if italic_on {
        let trimmed_len = result.trim_end().len();
        if result[..trimmed_len].ends_with(ITALIC_OPEN) {
            result.truncate(trimmed_len - ITALIC_OPEN.len());
        } else {
            result.push_str(ITALIC_CLOSE);
        }
    }

    let empty_pair = format!("{}{}", ITALIC_OPEN, ITALIC_CLOSE);
    while result.contains(&empty_pair) {
        result = result.replace(&empty_pair, "");
    }

    result
}

/// Collapse all lines into one, single-spaced
fn join_lines(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Break text into at most two lines, as balanced as possible.
///
/// Text that fits on one line is returned joined on a single line. When
/// several split points keep both halves within `max_line_length`, a split
/// right after sentence punctuation is preferred.
pub fn auto_break_line(text: &str, max_line_length: usize) -> String {
    let single = join_lines(text);
    if plain_length(&single) <= max_line_length {
        return single;
    }

    let mut best: Option<(usize, bool, bool, usize)> = None;
    for (index, _) in single.match_indices(' ') {
        let left = &single[..index];
        let right = &single[index + 1..];
        let left_len = plain_length(left);
        let right_len = plain_length(right);
        let fits = left_len <= max_line_length && right_len <= max_line_length;
        let after_sentence = remove_tags(left).ends_with(['.', '!', '?']);
        let imbalance = left_len.abs_diff(right_len);

        let better = match best {
            None => true,
            Some((_, best_fits, best_sentence, best_imbalance)) => {
                (fits, fits && after_sentence, std::cmp::Reverse(imbalance))
                    > (best_fits, best_fits && best_sentence, std::cmp::Reverse(best_imbalance))
            }
        };
        if better {
            best = Some((index, fits, after_sentence, imbalance));
        }
    }

    match best {
        Some((index, ..)) => format!("{}\n{}", &single[..index], &single[index + 1..]),
        None => single,
    }
}

/// Greedy word wrap; a word longer than the limit gets a line of its own
fn wrap_words(text: &str, max_line_length: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if plain_length(&current) + 1 + plain_length(word) <= max_line_length {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

/// Re-flow a caption that has more than two lines.
///
/// Captions with one or two lines are returned untouched. Longer ones are
/// rebalanced onto two lines when that respects `max_line_length`, and
/// otherwise wrapped onto as many lines as the limit needs.
pub fn auto_break_line_more_than_two_lines(text: &str, max_line_length: usize) -> String {
    if line_count(text) <= 2 {
        return text.to_string();
    }

    let two_lines = auto_break_line(text, max_line_length);
    if two_lines.lines().all(|line| plain_length(line) <= max_line_length) {
        return two_lines;
    }

    wrap_words(text, max_line_length)
}
