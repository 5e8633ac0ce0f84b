use crate::error::BankError;
use crate::types::{Difficulty, QuizQuestion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::Path;

/// Target number of questions per quiz. Filtered pools smaller than this
/// yield a shorter quiz.
pub const QUIZ_LENGTH: usize = 10;

/// Predicate for narrowing the question pool before a quiz starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Case-insensitive substring match on the topic field, so "Bitcoin"
    /// covers "Bitcoin Basics", "Bitcoin Tech" and "Bitcoin Concept".
    Topic(String),
    Difficulty(Difficulty),
}

impl Filter {
    pub fn matches(&self, question: &QuizQuestion) -> bool {
        match self {
            Filter::Topic(topic) => question
                .topic
                .to_lowercase()
                .contains(&topic.to_lowercase()),
            Filter::Difficulty(difficulty) => question.difficulty == *difficulty,
        }
    }
}

pub fn load_questions() -> Result<Vec<QuizQuestion>, BankError> {
    load_questions_from("questions.csv")
}

pub fn load_questions_from<P: AsRef<Path>>(path: P) -> Result<Vec<QuizQuestion>, BankError> {
    let mut questions = Vec::new();
    let mut rdr = csv::Reader::from_path(path)?;

    for result in rdr.deserialize() {
        let question: QuizQuestion = result?;
        questions.push(question);
    }
    Ok(questions)
}

/// Filters the pool, produces a uniformly random permutation of the
/// survivors and truncates to [`QUIZ_LENGTH`]. An empty filtered pool
/// returns an empty sequence; the session layer turns that into an
/// immediate 0/0 completion rather than an error.
pub fn select_questions(
    pool: &[QuizQuestion],
    filter: Option<&Filter>,
    rng: &mut StdRng,
) -> Vec<QuizQuestion> {
    let mut picked: Vec<QuizQuestion> = pool
        .iter()
        .filter(|q| filter.map_or(true, |f| f.matches(q)))
        .cloned()
        .collect();

    picked.shuffle(rng);
    picked.truncate(QUIZ_LENGTH);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionType;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn question(id: &str, topic: &str, difficulty: Difficulty) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            topic: topic.to_string(),
            difficulty,
            question_type: QuestionType::MultipleChoice,
            question: format!("question {}", id),
            correct_answer: "right".to_string(),
            option1: "wrong1".to_string(),
            option2: "wrong2".to_string(),
            option3: String::new(),
        }
    }

    fn pool() -> Vec<QuizQuestion> {
        vec![
            question("BTC-1", "Bitcoin Basics", Difficulty::Easy),
            question("BTC-2", "Bitcoin Tech", Difficulty::Medium),
            question("ETH-1", "Ethereum Basics", Difficulty::Easy),
            question("COMP-1", "Comparison", Difficulty::Hard),
        ]
    }

    #[test]
    fn test_topic_filter_matches_substring() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_questions(&pool, Some(&Filter::Topic("Bitcoin".into())), &mut rng);

        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|q| q.topic.contains("Bitcoin")));
    }

    #[test]
    fn test_difficulty_filter_is_exact() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let picked =
            select_questions(&pool, Some(&Filter::Difficulty(Difficulty::Easy)), &mut rng);

        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|q| q.difficulty == Difficulty::Easy));
    }

    #[test]
    fn test_empty_filtered_pool_yields_empty_sequence() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_questions(&pool, Some(&Filter::Topic("Dogecoin".into())), &mut rng);

        assert!(picked.is_empty());
    }

    #[test]
    fn test_selection_truncates_to_quiz_length() {
        let pool: Vec<QuizQuestion> = (0..25)
            .map(|i| question(&format!("Q-{}", i), "Bitcoin Basics", Difficulty::Easy))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = select_questions(&pool, None, &mut rng);

        assert_eq!(picked.len(), QUIZ_LENGTH);
    }

    #[test]
    fn test_selection_is_a_permutation_of_the_pool() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(42);
        let picked = select_questions(&pool, None, &mut rng);

        let before: HashSet<&str> = pool.iter().map(|q| q.id.as_str()).collect();
        let after: HashSet<&str> = picked.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_shuffle_positions_are_roughly_uniform() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(99);
        let trials = 4000;

        // counts[id] = how often that question landed in position 0
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..trials {
            let picked = select_questions(&pool, None, &mut rng);
            *counts.entry(picked[0].id.clone()).or_insert(0) += 1;
        }

        let expected = trials / pool.len() as u32;
        for (id, count) in counts {
            assert!(
                count > expected / 2 && count < expected * 2,
                "question {} held position 0 in {} of {} trials",
                id,
                count,
                trials
            );
        }
    }

    #[test]
    fn test_load_questions_from_csv() -> Result<(), Box<dyn std::error::Error>> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "id,topic,difficulty,type,question,correct_answer,option1,option2,option3"
        )?;
        writeln!(
            temp_file,
            "BTC-001,Bitcoin Basics,Easy,Multiple Choice,Who created Bitcoin?,Satoshi Nakamoto,Vitalik Buterin,Hal Finney,Nick Szabo"
        )?;
        writeln!(
            temp_file,
            "BTC-003,Bitcoin Tech,Easy,True/False,Bitcoin started on PoS.,False (It is Proof-of-Work),,,"
        )?;

        let questions = load_questions_from(temp_file.path())?;

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question_type, QuestionType::MultipleChoice);
        assert_eq!(questions[0].distractors().len(), 3);
        assert_eq!(questions[1].question_type, QuestionType::TrueFalse);
        assert!(questions[1].distractors().is_empty());
        Ok(())
    }
}
