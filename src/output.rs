const RULE_WIDTH: usize = 80;
const BANNER: &str = "AI Response:";

/// Renders the completion between 80-character rules. The leading newline is
/// part of the block; `print_completion` adds the trailing blank line, so the
/// banner is set off from surrounding terminal output on both sides.
pub fn format_completion(text: &str) -> String {
    let rule = "═".repeat(RULE_WIDTH);
    format!("\n{rule}\n{BANNER}\n{rule}\n{text}\n{rule}")
}

pub fn print_completion(text: &str) {
    println!("{}\n", format_completion(text));
}

#[cfg(test)]
mod tests {
    use super::{BANNER, RULE_WIDTH, format_completion};

    #[test]
    fn wraps_text_between_three_rules() {
        let block = format_completion("hello there");
        let rule = "═".repeat(RULE_WIDTH);
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines, vec!["", rule.as_str(), BANNER, rule.as_str(), "hello there", rule.as_str()]);
    }

    #[test]
    fn preserves_multiline_completions() {
        let block = format_completion("first\nsecond");
        assert!(block.contains("first\nsecond"), "unexpected block: {block}");
    }

    #[test]
    fn rules_are_eighty_characters_wide() {
        let block = format_completion("x");
        let rule_line = block.lines().nth(1).expect("rule line should exist");
        assert_eq!(rule_line.chars().count(), RULE_WIDTH);
    }
}
