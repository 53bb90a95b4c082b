use serde::{Deserialize, Serialize};

use super::{Movie, MovieDetails};

/// The movie currently being viewed, with its display attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedMovie {
    pub movie: Movie,
    /// Absent when the poster could not be resolved
    pub poster: Option<String>,
    pub details: MovieDetails,
}

/// A ranked neighbor together with its poster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedMovie {
    pub movie: Movie,
    pub score: f32,
    pub poster: Option<String>,
}

/// Per-session navigation state.
///
/// Owned by the caller and replaced wholesale on every successful transition.
/// No history is kept, so there is no way back to a previous selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NavigationState {
    #[default]
    Empty,
    Viewing {
        selected: SelectedMovie,
        recommendations: Vec<RecommendedMovie>,
    },
}

impl NavigationState {
    pub fn selected(&self) -> Option<&SelectedMovie> {
        match self {
            NavigationState::Empty => None,
            NavigationState::Viewing { selected, .. } => Some(selected),
        }
    }

    pub fn recommendations(&self) -> Option<&[RecommendedMovie]> {
        match self {
            NavigationState::Empty => None,
            NavigationState::Viewing {
                recommendations, ..
            } => Some(recommendations),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, NavigationState::Empty)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// User-visible message produced by a transition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Outcome of a navigation operation: the next state plus an optional notice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transition {
    pub state: NavigationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl Transition {
    pub fn to(state: NavigationState) -> Self {
        Self {
            state,
            notice: None,
        }
    }

    pub fn with_notice(state: NavigationState, notice: Notice) -> Self {
        Self {
            state,
            notice: Some(notice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_serialization() {
        let json = serde_json::to_value(NavigationState::Empty).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "empty" }));

        let state: NavigationState = serde_json::from_value(json).unwrap();
        assert!(state.is_empty());
        assert!(state.selected().is_none());
        assert!(state.recommendations().is_none());
    }

    #[test]
    fn test_viewing_accessors() {
        let state = NavigationState::Viewing {
            selected: SelectedMovie {
                movie: Movie::new(603, "The Matrix", 0),
                poster: None,
                details: MovieDetails::unavailable(),
            },
            recommendations: vec![RecommendedMovie {
                movie: Movie::new(604, "The Matrix Reloaded", 1),
                score: 0.42,
                poster: Some("https://image.example/reloaded.jpg".to_string()),
            }],
        };

        assert_eq!(state.selected().unwrap().movie.title, "The Matrix");
        assert_eq!(state.recommendations().unwrap().len(), 1);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "viewing");
        assert_eq!(json["selected"]["details"]["rating"], "N/A");
    }

    #[test]
    fn test_transition_omits_missing_notice() {
        let json = serde_json::to_value(Transition::to(NavigationState::Empty)).unwrap();
        assert!(json.get("notice").is_none());

        let json = serde_json::to_value(Transition::with_notice(
            NavigationState::Empty,
            Notice::warning("Movie not found!"),
        ))
        .unwrap();
        assert_eq!(json["notice"]["level"], "warning");
    }
}
