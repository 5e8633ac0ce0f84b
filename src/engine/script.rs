//! Fixed bot copy: greeting, menus, feedback and the keyed bonus content
//! emitted after a verdict.

pub const GREETING: &str = "Hey there! 👋 Welcome to CryptoQuiz! Ready to test your crypto knowledge? I've got questions on Bitcoin, Ethereum, and blockchain tech.";

pub const MAIN_MENU: &str = "What would you like to do?\n\nA) Random 10-question quiz (Mixed difficulty)\nB) Practice by topic\nC) Choose difficulty level";

pub const TOPIC_MENU: &str =
    "Choose a topic:\n\nA) Bitcoin\nB) Ethereum\nC) Comparison\nD) General Blockchain Tech";

pub const DIFFICULTY_MENU: &str = "Choose difficulty:\n\nA) Easy\nB) Medium\nC) Hard";

pub const CLARIFY_MENU: &str =
    "I didn't quite get that! Please choose A, B, or C from the menu above. 😊";

pub const CLARIFY_TOPIC: &str =
    "I didn't quite get that! Please choose A, B, C, or D from the topic menu. 😊";

pub const CLARIFY_DIFFICULTY: &str =
    "I didn't quite get that! Please choose A, B, or C for the difficulty. 😊";

pub const CLARIFY_COMPLETE: &str =
    "The quiz is over! Type 'restart' or 'new quiz' to play again. 😊";

pub const ENCOURAGEMENTS: [&str; 5] = [
    "🎯 Correct! You're on fire!",
    "✅ Perfect! You know your crypto!",
    "🌟 Excellent! That's right!",
    "🎉 Nice work! Correct answer!",
    "💡 Brilliant! You got it!",
];

/// Bonus trivia keyed by the correct-answer text, emitted after a correct
/// verdict.
pub fn fun_fact(correct_answer: &str) -> Option<&'static str> {
    match correct_answer {
        "Satoshi Nakamoto" => Some("Fun fact: To this day, Satoshi Nakamoto's true identity remains unknown. They disappeared from public view in 2010!"),
        "21 million coins" => Some("Interesting: The last Bitcoin won't be mined until approximately the year 2140!"),
        "Mining" => Some("Did you know: Bitcoin mining consumes about as much electricity as some small countries!"),
        "Vitalik Buterin" => Some("Fun fact: Vitalik was only 19 years old when he co-founded Ethereum!"),
        "Blockchain" => Some("Amazing fact: The first blockchain was conceptualized by Satoshi Nakamoto in 2008!"),
        _ => None,
    }
}

/// Follow-up explanation keyed by the correct-answer text, emitted after
/// an incorrect verdict.
pub fn explanation(correct_answer: &str) -> Option<&'static str> {
    match correct_answer {
        "SHA-256" => Some("SHA-256 is the cryptographic hash function that secures Bitcoin transactions. It's virtually impossible to reverse!"),
        "Proof-of-Stake (PoS)" => Some("Ethereum switched to PoS in 2022, making it much more energy-efficient than Proof-of-Work!"),
        "The Merge" => Some("The Merge reduced Ethereum's energy consumption by over 99%!"),
        _ => None,
    }
}

/// Tiered performance label and emoji for the completion summary.
pub fn performance_tier(percentage: f64) -> (&'static str, &'static str) {
    if percentage >= 90.0 {
        ("Crypto Expert", "🏆")
    } else if percentage >= 70.0 {
        ("Blockchain Scholar", "📚")
    } else if percentage >= 50.0 {
        ("Getting There", "💪")
    } else {
        ("Keep Learning", "🌱")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_tiers() {
        assert_eq!(performance_tier(100.0).0, "Crypto Expert");
        assert_eq!(performance_tier(90.0).0, "Crypto Expert");
        assert_eq!(performance_tier(70.0).0, "Blockchain Scholar");
        assert_eq!(performance_tier(50.0).0, "Getting There");
        assert_eq!(performance_tier(0.0).0, "Keep Learning");
    }

    #[test]
    fn test_keyed_lookups() {
        assert!(fun_fact("Satoshi Nakamoto").is_some());
        assert!(fun_fact("Genesis Block").is_none());
        assert!(explanation("The Merge").is_some());
        assert!(explanation("Halving").is_none());
    }
}
