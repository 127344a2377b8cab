//! Homework review verdicts and status messages.

use std::fmt;
use std::str::FromStr;

use crate::error::{HomeworkError, Result};
use crate::response::HomeworkRecord;

/// Review status of a homework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    /// Every status the API is known to report.
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Status key as it appears in the API response.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Text shown to the student.
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = HomeworkError;

    fn from_str(s: &str) -> Result<Self> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| HomeworkError::UnknownStatus(s.to_string()))
    }
}

/// Turn a homework record into the chat message announcing its status.
///
/// # Errors
/// `MissingField` if the record has no name or status, `UnknownStatus` if
/// the status is not one of [`Verdict::ALL`].
pub fn translate(record: &HomeworkRecord) -> Result<String> {
    let name = record
        .name()
        .ok_or_else(|| HomeworkError::MissingField("homework_name".to_string()))?;
    let status = record
        .status()
        .ok_or_else(|| HomeworkError::MissingField("status".to_string()))?;
    let verdict: Verdict = status.parse()?;

    Ok(format!("Changed status for \"{}\": {}", name, verdict.text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_statuses() {
        for verdict in Verdict::ALL {
            let record = HomeworkRecord::new("hw1", verdict.as_str());
            let message = translate(&record).unwrap();
            assert!(message.contains("\"hw1\""), "{}", message);
            assert!(message.contains(verdict.text()), "{}", message);
        }
    }

    #[test]
    fn test_translate_approved_exact() {
        let message = translate(&HomeworkRecord::new("hw1", "approved")).unwrap();
        assert_eq!(
            message,
            "Changed status for \"hw1\": Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_translate_unknown_status() {
        let err = translate(&HomeworkRecord::new("hw1", "unknown_status")).unwrap_err();
        assert_eq!(err, HomeworkError::UnknownStatus("unknown_status".to_string()));

        // Matching is exact.
        assert!(translate(&HomeworkRecord::new("hw1", "Approved")).is_err());
        assert!(translate(&HomeworkRecord::new("hw1", "")).is_err());
    }

    #[test]
    fn test_translate_missing_fields() {
        let no_name = HomeworkRecord {
            homework_name: None,
            status: Some("approved".to_string()),
        };
        assert_eq!(
            translate(&no_name).unwrap_err(),
            HomeworkError::MissingField("homework_name".to_string())
        );

        let no_status = HomeworkRecord {
            homework_name: Some("hw1".to_string()),
            status: None,
        };
        assert_eq!(
            translate(&no_status).unwrap_err(),
            HomeworkError::MissingField("status".to_string())
        );
    }

    #[test]
    fn test_verdict_round_trip_through_str() {
        for verdict in Verdict::ALL {
            assert_eq!(verdict.to_string().parse::<Verdict>().unwrap(), verdict);
        }
    }
}
