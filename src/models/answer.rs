// src/models/answer.rs
// DOCUMENTATION: Quiz answers submitted by the client
// PURPOSE: Typed question ids and extraction of the three quiz values

use serde::{Deserialize, Serialize};

/// Quiz question identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionId {
    Mood,
    FoodType,
    Budget,
}

/// One submitted answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    pub value: String,
}

impl Answer {
    #[cfg(test)]
    pub fn new(question_id: QuestionId, value: &str) -> Self {
        Self {
            question_id,
            value: value.to_string(),
        }
    }
}

/// The three quiz values the recommender works with
/// DOCUMENTATION: Missing answers become empty strings so partial input
/// still produces recommendations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAnswers {
    pub mood: String,
    pub food_type: String,
    pub budget: String,
}

impl QuizAnswers {
    /// Extract mood, food type and budget; the first answer per question wins
    pub fn from_answers(answers: &[Answer]) -> Self {
        let value_of = |id: QuestionId| {
            answers
                .iter()
                .find(|a| a.question_id == id)
                .map(|a| a.value.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            mood: value_of(QuestionId::Mood),
            food_type: value_of(QuestionId::FoodType),
            budget: value_of(QuestionId::Budget),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_answers_extracts_all_values() {
        let answers = vec![
            Answer::new(QuestionId::Budget, "2만원"),
            Answer::new(QuestionId::Mood, "행복해요"),
            Answer::new(QuestionId::FoodType, " 한식 "),
        ];

        let quiz = QuizAnswers::from_answers(&answers);
        assert_eq!(quiz.mood, "행복해요");
        assert_eq!(quiz.food_type, "한식");
        assert_eq!(quiz.budget, "2만원");
    }

    #[test]
    fn test_missing_answers_default_to_empty() {
        let quiz = QuizAnswers::from_answers(&[Answer::new(QuestionId::FoodType, "중식")]);
        assert_eq!(quiz.mood, "");
        assert_eq!(quiz.food_type, "중식");
        assert_eq!(quiz.budget, "");
    }

    #[test]
    fn test_question_id_wire_names() {
        let json = r#"{"questionId":"foodType","value":"일식"}"#;
        let answer: Answer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.question_id, QuestionId::FoodType);

        let unknown = r#"{"questionId":"drink","value":"콜라"}"#;
        assert!(serde_json::from_str::<Answer>(unknown).is_err());
    }
}
