/// Word separators: ASCII whitespace including vertical tab.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Greedy word wrap at `column` characters.
///
/// Runs of ASCII whitespace (vertical tab included) separate words and
/// collapse to one space. A word longer than `column` is kept whole on a line
/// of its own.
pub fn wrap(text: &str, column: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0usize;

    for word in text.split(is_separator).filter(|word| !word.is_empty()) {
        let word_width = word.chars().count();
        if line.is_empty() {
            line.push_str(word);
            width = word_width;
        } else if width + 1 + word_width <= column {
            line.push(' ');
            line.push_str(word);
            width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            width = word_width;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Renders the final document: the title, a blank line, then each wrapped
/// paragraph followed by a blank line.
pub fn assemble(title: Option<&str>, paragraphs: &[Vec<String>], column: usize) -> String {
    let mut text = String::new();
    text.push_str(title.unwrap_or_default());
    text.push_str("\n\n");
    for fragments in paragraphs {
        let paragraph = fragments.concat();
        text.push_str(&wrap(&paragraph, column).join("\n"));
        text.push_str("\n\n");
    }
    text
}
