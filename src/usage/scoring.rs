use once_cell::sync::Lazy;
use regex::Regex;

use super::round2;

/// A word is a maximal alphanumeric run, joined across interior
/// apostrophes or hyphens ("don't", "well-known"). Leading or trailing
/// separators are not part of the word.
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+(?:['’-][A-Za-z0-9]+)*").expect("valid word pattern"));

const BASE_COST: f64 = 1.0;
const PER_CHARACTER_COST: f64 = 0.05;
const PERIODIC_VOWEL_BONUS: f64 = 0.3;
const LENGTH_PENALTY_THRESHOLD: usize = 100;
const LENGTH_PENALTY: f64 = 5.0;
const UNIQUE_WORDS_DISCOUNT: f64 = 2.0;

/// Derive the credit cost of a message from its text.
///
/// Pure and total: any string, including the empty string, yields a
/// finite cost, rounded to two decimal places. The steps run in a fixed
/// order; the unique-words discount is floored at 1.0 and the palindrome
/// doubling applies last, so the result is always at least 1.0.
pub fn calculate_message_credits(text: &str) -> f64 {
    let char_count = text.chars().count();
    let mut credits = BASE_COST;

    // Per-character cost over the raw text, whitespace included.
    credits += char_count as f64 * PER_CHARACTER_COST;

    let words = tokenize_words(text);
    for word in &words {
        credits += match word.chars().count() {
            0..=3 => 0.1,
            4..=7 => 0.2,
            _ => 0.3,
        };
    }

    // Vowels at 1-indexed positions 3, 6, 9, ...
    for (i, c) in text.chars().enumerate() {
        if (i + 1) % 3 == 0 && is_vowel(c) {
            credits += PERIODIC_VOWEL_BONUS;
        }
    }

    if char_count > LENGTH_PENALTY_THRESHOLD {
        credits += LENGTH_PENALTY;
    }

    // Discount applies only when no word repeats (case-sensitive).
    let unique: std::collections::HashSet<&str> = words.iter().copied().collect();
    if unique.len() == words.len() {
        credits = (credits - UNIQUE_WORDS_DISCOUNT).max(1.0);
    }

    if is_palindrome(text) {
        credits *= 2.0;
    }

    round2(credits)
}

fn tokenize_words(text: &str) -> Vec<&str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Palindrome over the lowercased alphanumeric characters only. The
/// empty string counts as a palindrome.
fn is_palindrome(text: &str) -> bool {
    let cleaned: Vec<char> = text
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_score(text: &str, expected: f64) {
        let score = calculate_message_credits(text);
        assert!(
            (score - expected).abs() < 1e-9,
            "score({text:?}) = {score}, expected {expected}"
        );
    }

    #[test]
    fn test_empty_string_is_a_palindrome() {
        // Base 1.0, no other contributions, doubled by the palindrome rule.
        assert_score("", 2.0);
    }

    #[test]
    fn test_unique_words_discount_floors_at_one() {
        // 1 + 0.05*2 + 0.1 = 1.2, discount floors at 1.0, not a palindrome.
        assert_score("ab", 1.0);
    }

    #[test]
    fn test_repeated_word_skips_discount() {
        // 1 + 0.05*5 + 0.1*2 = 1.45, "bc" repeats so no discount.
        assert_score("bc bc", 1.45);
    }

    #[test]
    fn test_distinct_words_earn_discount() {
        assert_score("bc cd", 1.0);
    }

    #[test]
    fn test_palindrome_doubles_after_floor() {
        // 1 + 0.05*6 + 0.2 = 1.5, floored to 1.0, doubled to 2.0.
        assert_score("kbccbk", 2.0);
    }

    #[test]
    fn test_periodic_vowel_bonus() {
        // "aaa": 1 + 0.15 + 0.1 + 0.3 (vowel at position 3) = 1.55,
        // one word so discount floors at 1.0, palindrome doubles.
        assert_score("aaa", 2.0);
    }

    #[test]
    fn test_length_penalty_kicks_in_above_100_chars() {
        // 100 chars: 1 + 5.0 + 0.3 = 6.3, floor 4.3, palindrome -> 8.6.
        assert_score(&"x".repeat(100), 8.6);
        // 101 chars adds the flat 5.0 penalty: 11.35 -> 9.35 -> 18.7.
        assert_score(&"x".repeat(101), 18.7);
    }

    #[test]
    fn test_interior_separators_join_words() {
        assert_eq!(
            tokenize_words("don't stop the well-known 'tis trailing- act"),
            vec!["don't", "stop", "the", "well-known", "tis", "trailing", "act"]
        );
    }

    #[test]
    fn test_digits_are_word_characters() {
        assert_eq!(tokenize_words("room 101 and a1b2"), vec!["room", "101", "and", "a1b2"]);
    }

    #[test]
    fn test_score_is_deterministic() {
        let text = "Was it a car or a cat I saw?";
        let first = calculate_message_credits(text);
        let second = calculate_message_credits(text);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_score_is_always_positive() {
        for text in ["", "a", "ab", "no no", "Hello, world!", "你好世界"] {
            assert!(calculate_message_credits(text) >= 1.0, "score({text:?}) below floor");
        }
    }

    #[test]
    fn test_case_sensitive_uniqueness() {
        // "Bc bc" are distinct tokens: 1 + 0.25 + 0.2 = 1.45, discount
        // floors at 1.0, "bcbc" is not a palindrome.
        assert_score("Bc bc", 1.0);
    }
}
