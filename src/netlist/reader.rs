//! Line cleaning for netlist sources.
//!
//! A netlist is line-oriented: one device per line, `#` introduces a
//! comment that runs to the end of the line. The reader strips comments,
//! trims the ends, and collapses internal whitespace runs so that later
//! stages can split on single spaces.

/// The symbol that introduces a comment.
const COMMENT_SYMBOL: char = '#';

/// Clean a single raw line: drop the comment tail, trim, and collapse
/// internal whitespace to single spaces.
///
/// `"  foo bar    baz  # note"` cleans to `"foo bar baz"`.
pub fn clean(line: &str) -> String {
    let data = match line.find(COMMENT_SYMBOL) {
        Some(i) => &line[..i],
        None => line,
    };
    data.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Iterate over the cleaned content lines of a netlist source.
///
/// Yields `(line_number, cleaned_line)` pairs, 1-indexed against the raw
/// source so errors can cite the original file. Lines that clean to nothing
/// (blank lines, pure comments) are skipped.
pub fn clean_lines(source: &str) -> impl Iterator<Item = (usize, String)> + '_ {
    source
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, clean(line)))
        .filter(|(_, line)| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean("  foo bar    baz  "), "foo bar baz");
        assert_eq!(clean("\tRESISTOR\tr1  a b 100"), "RESISTOR r1 a b 100");
    }

    #[test]
    fn test_clean_strips_inline_comment() {
        assert_eq!(
            clean("  RESISTOR  R1   a  b   100meg   # big R"),
            "RESISTOR R1 a b 100meg"
        );
    }

    #[test]
    fn test_clean_full_comment_line() {
        assert_eq!(clean("# nothing but commentary"), "");
    }

    #[test]
    fn test_clean_lines_keeps_source_line_numbers() {
        let source = "# header\n\nGROUND gnd\n  # noise\nRESISTOR r1 a b 1k # load\n";
        let lines: Vec<_> = clean_lines(source).collect();
        assert_eq!(
            lines,
            vec![
                (3, "GROUND gnd".to_string()),
                (5, "RESISTOR r1 a b 1k".to_string()),
            ]
        );
    }
}
