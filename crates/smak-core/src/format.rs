//! Rendering helpers for newline-delimited recipe text.

/// How a stored text block should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBlock {
    /// Single paragraph, rendered as-is
    Paragraph(String),
    /// Discrete trimmed items, rendered as a list
    Items(Vec<String>),
}

/// Split stored text into list items when it holds multiple non-blank lines.
///
/// A single segment stays a paragraph rather than becoming a one-item list.
#[must_use]
pub fn format_multiline(text: &str) -> TextBlock {
    let items: Vec<String> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(std::string::ToString::to_string)
        .collect();

    if items.len() <= 1 {
        TextBlock::Paragraph(text.to_string())
    } else {
        TextBlock::Items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn multiple_lines_become_items() {
        assert_eq!(
            format_multiline("Eggs\nFlour\nSugar"),
            TextBlock::Items(vec![
                "Eggs".to_string(),
                "Flour".to_string(),
                "Sugar".to_string()
            ])
        );
    }

    #[test]
    fn single_line_stays_a_paragraph() {
        assert_eq!(
            format_multiline("Eggs"),
            TextBlock::Paragraph("Eggs".to_string())
        );
    }

    #[test]
    fn blank_lines_are_dropped_from_items() {
        assert_eq!(
            format_multiline("Eggs\n\n  \nFlour"),
            TextBlock::Items(vec!["Eggs".to_string(), "Flour".to_string()])
        );
    }

    #[test]
    fn items_are_trimmed() {
        assert_eq!(
            format_multiline("  Eggs \n Flour  "),
            TextBlock::Items(vec!["Eggs".to_string(), "Flour".to_string()])
        );
    }

    #[test]
    fn one_line_with_trailing_newline_stays_a_paragraph() {
        assert_eq!(
            format_multiline("Eggs\n"),
            TextBlock::Paragraph("Eggs\n".to_string())
        );
    }
}
