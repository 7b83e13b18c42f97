use serde::{Deserialize, Serialize};

use crate::error::{SourceError, SourceResult};

/// Open Trivia DB base URL
pub const API_BASE: &str = "https://opentdb.com";

/// Smallest batch the API accepts
pub const MIN_AMOUNT: u32 = 1;

/// Largest batch the API accepts
pub const MAX_AMOUNT: u32 = 50;

/// Batch size used when the caller does not ask for one
pub const DEFAULT_AMOUNT: u32 = 50;

/// Question format
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Multiple,
    Boolean,
}

/// Question difficulty
///
/// Values outside the three canonical ones deserialize to `Unrecognized`
/// instead of failing the whole batch. They are kept out of every
/// difficulty count.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[serde(other)]
    Unrecognized,
}

impl Difficulty {
    /// The canonical difficulties, in chart order.
    pub const CANONICAL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Unrecognized => "unrecognized",
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, Difficulty::Unrecognized)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trivia question record as returned by the API
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TriviaQuestion {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
    pub category: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// Raw `api.php` response envelope
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuestionResponse {
    pub response_code: u64,
    pub results: Vec<TriviaQuestion>,
}

/// Status codes carried in the `response_code` field
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Success,
    NoResults,
    InvalidParameter,
    TokenNotFound,
    TokenEmpty,
    RateLimit,
}

impl ResponseCode {
    pub fn description(&self) -> &'static str {
        match self {
            ResponseCode::Success => "Returned results successfully",
            ResponseCode::NoResults => "Not enough questions available for the query",
            ResponseCode::InvalidParameter => "Arguments passed in are not valid",
            ResponseCode::TokenNotFound => "Session token does not exist",
            ResponseCode::TokenEmpty => "Session token has returned all possible questions",
            ResponseCode::RateLimit => "Too many requests, only one request every 5 seconds",
        }
    }
}

impl TryFrom<u64> for ResponseCode {
    type Error = String;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ResponseCode::Success),
            1 => Ok(ResponseCode::NoResults),
            2 => Ok(ResponseCode::InvalidParameter),
            3 => Ok(ResponseCode::TokenNotFound),
            4 => Ok(ResponseCode::TokenEmpty),
            5 => Ok(ResponseCode::RateLimit),
            _ => Err(format!(
                "Invalid response code {code}. API response codes are from 0 to 5 inclusive."
            )),
        }
    }
}

/// Build the `api.php` URL for a batch of `amount` questions
pub fn build_api_url(base: &str, amount: u32) -> String {
    format!("{}/api.php?amount={amount}", base.trim_end_matches('/'))
}

/// Check that `amount` is within the range the API accepts
pub fn validate_amount(amount: u32) -> SourceResult<u32> {
    if (MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
        Ok(amount)
    } else {
        Err(SourceError::InvalidRequestAmount(amount))
    }
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Decode HTML entities in every free-text field of a question
pub fn decode_question(question: TriviaQuestion) -> TriviaQuestion {
    TriviaQuestion {
        category: decode(&question.category),
        question: decode(&question.question),
        correct_answer: decode(&question.correct_answer),
        incorrect_answers: question
            .incorrect_answers
            .iter()
            .map(|a| decode(a))
            .collect(),
        ..question
    }
}

/// Parse and validate an `api.php` response body
///
/// The body must match the envelope shape and carry a success response code.
/// Returned questions have their HTML entities decoded.
pub fn parse_question_response(body: &str) -> SourceResult<Vec<TriviaQuestion>> {
    let response: QuestionResponse =
        serde_json::from_str(body).map_err(|e| SourceError::MalformedPayload(e.to_string()))?;

    let code = ResponseCode::try_from(response.response_code)
        .map_err(SourceError::MalformedPayload)?;
    if code != ResponseCode::Success {
        return Err(SourceError::Rejected(code));
    }

    Ok(response.results.into_iter().map(decode_question).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_BODY: &str = r#"{
        "response_code": 0,
        "results": [
            {
                "type": "multiple",
                "difficulty": "medium",
                "category": "Science &amp; Nature",
                "question": "What is the chemical symbol for &quot;gold&quot;?",
                "correct_answer": "Au",
                "incorrect_answers": ["Ag", "Gd", "G&#039;o"]
            },
            {
                "type": "boolean",
                "difficulty": "easy",
                "category": "History",
                "question": "The Roman Empire fell in 476 AD&#58; true or false&#59;",
                "correct_answer": "True",
                "incorrect_answers": ["False"]
            }
        ]
    }"#;

    #[test]
    fn test_build_api_url() {
        assert_eq!(
            build_api_url(API_BASE, 50),
            "https://opentdb.com/api.php?amount=50"
        );
    }

    #[test]
    fn test_build_api_url_trailing_slash() {
        assert_eq!(
            build_api_url("http://localhost:8080/", 3),
            "http://localhost:8080/api.php?amount=3"
        );
    }

    #[test]
    fn test_validate_amount_bounds() {
        assert_eq!(validate_amount(1), Ok(1));
        assert_eq!(validate_amount(50), Ok(50));
        assert_eq!(validate_amount(0), Err(SourceError::InvalidRequestAmount(0)));
        assert_eq!(
            validate_amount(51),
            Err(SourceError::InvalidRequestAmount(51))
        );
    }

    #[test]
    fn test_response_code_from_number() {
        assert_eq!(ResponseCode::try_from(0u64), Ok(ResponseCode::Success));
        assert_eq!(ResponseCode::try_from(5u64), Ok(ResponseCode::RateLimit));
        let err = ResponseCode::try_from(6u64).unwrap_err();
        assert!(err.contains("from 0 to 5 inclusive"));
    }

    #[test]
    fn test_parse_decodes_html_entities() {
        let questions = parse_question_response(SAMPLE_BODY).unwrap();

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].category, "Science & Nature");
        assert_eq!(
            questions[0].question,
            "What is the chemical symbol for \"gold\"?"
        );
        assert_eq!(questions[0].incorrect_answers[2], "G'o");
        assert_eq!(
            questions[1].question,
            "The Roman Empire fell in 476 AD: true or false;"
        );
    }

    #[test]
    fn test_parse_reads_enums() {
        let questions = parse_question_response(SAMPLE_BODY).unwrap();

        assert_eq!(questions[0].question_type, QuestionType::Multiple);
        assert_eq!(questions[0].difficulty, Difficulty::Medium);
        assert_eq!(questions[1].question_type, QuestionType::Boolean);
        assert_eq!(questions[1].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_parse_unknown_difficulty_is_kept_as_unrecognized() {
        let body = r#"{"response_code":0,"results":[{"type":"boolean","difficulty":"extreme",
            "category":"Art","question":"Q","correct_answer":"True","incorrect_answers":["False"]}]}"#;

        let questions = parse_question_response(body).unwrap();

        assert_eq!(questions[0].difficulty, Difficulty::Unrecognized);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let body = r#"{"response_code":0,"results":[{"type":"boolean","difficulty":"easy"}]}"#;

        let result = parse_question_response(body);

        assert!(matches!(result, Err(SourceError::MalformedPayload(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_question_type() {
        let body = r#"{"response_code":0,"results":[{"type":"essay","difficulty":"easy",
            "category":"Art","question":"Q","correct_answer":"A","incorrect_answers":[]}]}"#;

        assert!(matches!(
            parse_question_response(body),
            Err(SourceError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(
            parse_question_response("<html>Bad Gateway</html>"),
            Err(SourceError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_parse_reports_rejected_code() {
        let body = r#"{"response_code":5,"results":[]}"#;

        assert_eq!(
            parse_question_response(body),
            Err(SourceError::Rejected(ResponseCode::RateLimit))
        );
    }

    #[test]
    fn test_parse_out_of_range_code_is_malformed() {
        let body = r#"{"response_code":9,"results":[]}"#;

        assert!(matches!(
            parse_question_response(body),
            Err(SourceError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert_eq!(Difficulty::Hard.as_str(), "hard");
        assert!(!Difficulty::Unrecognized.is_canonical());
    }
}
