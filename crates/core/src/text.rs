/// Uppercase the first character, leaving the rest untouched
///
/// Non-alphabetic first characters and empty strings come back unchanged.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "1 question", "2 questions"
pub fn question_count_label(count: usize) -> String {
    if count == 1 {
        "1 question".to_string()
    } else {
        format!("{count} questions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("Hello"), "Hello");
        assert_eq!(capitalize("123 hello"), "123 hello");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("émile"), "Émile");
    }

    #[test]
    fn test_question_count_label() {
        assert_eq!(question_count_label(0), "0 questions");
        assert_eq!(question_count_label(1), "1 question");
        assert_eq!(question_count_label(7), "7 questions");
    }
}
