//! http routes of the quiz service

pub const GENERATE_QUIZ: &str = "/generate_quiz";
pub const HISTORY: &str = "/history";
pub const PREVIEW_URL: &str = "/preview_url";
/// router pattern for a single stored quiz
pub const QUIZ_BY_ID: &str = "/quiz/:id";

pub fn quiz_path(id: u64) -> String {
    format!("/quiz/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_path() {
        assert_eq!(quiz_path(42), "/quiz/42");
        assert!(QUIZ_BY_ID.starts_with("/quiz/"));
    }
}
