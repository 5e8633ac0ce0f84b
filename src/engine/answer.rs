use crate::types::{PresentedQuestion, QuestionType};

/// Lowercases, strips everything outside `[a-z0-9\s]`, then trims. Casing
/// and punctuation are lost on purpose: "Satoshi Nakamoto!" and
/// "satoshi nakamoto" compare equal.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// A normalized input consisting of exactly one letter is a letter choice
/// (A=0, B=1, ...). Anything else is free text.
fn letter_index(normalized: &str) -> Option<usize> {
    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some((c as u8 - b'a') as usize),
        _ => None,
    }
}

/// Checks a user reply against the question as it was presented.
///
/// Free-text matching is deliberately lenient: besides exact equality it
/// accepts the input being a substring of the correct answer and vice
/// versa, so "2008" matches "in 2008". That leniency is a long-standing
/// product decision, not something to tighten here.
///
/// A letter beyond the number of shown options (say "D" on a two-option
/// True/False) is simply an incorrect answer, never an error.
pub fn check_answer(input: &str, presented: &PresentedQuestion) -> bool {
    let given = normalize(input);
    let correct = normalize(&presented.question.correct_answer);

    match presented.question.question_type {
        QuestionType::MultipleChoice => {
            let options = presented.options();
            if let Some(index) = letter_index(&given) {
                return options
                    .get(index)
                    .map_or(false, |option| normalize(option) == correct);
            }
            given == correct || given.contains(&correct) || correct.contains(&given)
        }
        QuestionType::TrueFalse => {
            // Correct-answer text may carry qualifiers, e.g.
            // "False (It is Proof-of-Work)", hence containment.
            if let Some(index) = letter_index(&given) {
                return match index {
                    0 => correct.contains("true"),
                    1 => correct.contains("false"),
                    _ => false,
                };
            }
            correct.contains(&given)
        }
        QuestionType::FillBlank => given == correct || correct.contains(&given),
    }
}
