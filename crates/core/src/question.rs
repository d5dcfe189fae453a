//! Survey questions

use serde::{Deserialize, Serialize};

/// Identifier assigned to a question by the survey API
pub type QuestionId = i64;

/// A single questionnaire entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Identifier used when submitting the answer
    pub id: QuestionId,
    /// Text spoken to the respondent
    pub text: String,
    /// Ordering key, ascending
    pub order_number: i32,
}

impl Question {
    pub fn new(id: QuestionId, text: impl Into<String>, order_number: i32) -> Self {
        Self {
            id,
            text: text.into(),
            order_number,
        }
    }
}

/// Sort questions ascending by their ordering key.
///
/// The sort is stable, so questions sharing a key keep the order in which
/// the source returned them.
pub fn sort_questions(questions: &mut [Question]) {
    questions.sort_by_key(|q| q.order_number);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_by_order_number() {
        let mut questions = vec![
            Question::new(7, "third", 3),
            Question::new(3, "first", 1),
            Question::new(5, "second", 2),
        ];
        sort_questions(&mut questions);

        let texts: Vec<&str> = questions.iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut questions = vec![
            Question::new(1, "a", 1),
            Question::new(2, "b", 0),
            Question::new(3, "c", 1),
        ];
        sort_questions(&mut questions);
        let ids: Vec<QuestionId> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let q: Question =
            serde_json::from_str(r#"{"id": 4, "text": "How is the park?", "orderNumber": 2}"#)
                .unwrap();
        assert_eq!(q, Question::new(4, "How is the park?", 2));
    }
}
