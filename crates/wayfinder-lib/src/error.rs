use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the wayfinding library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be read from the provided path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when the same location name appears twice in the dataset.
    #[error("duplicate location name in dataset: {name}")]
    DuplicateLocation { name: String },

    /// Raised when two paths connect the same unordered pair of locations.
    #[error("duplicate path between {a} and {b}")]
    DuplicatePath { a: String, b: String },

    /// Raised when a path polyline has fewer than two coordinates.
    #[error("path from {from} to {to} has {points} coordinate(s); at least 2 are required")]
    ShortPolyline {
        from: String,
        to: String,
        points: usize,
    },

    /// Raised when a ward has no indoor steps at all.
    #[error("ward {ward} in {building} has an empty step sequence")]
    EmptyWardSteps { building: String, ward: String },

    /// Raised when a ward's final step is not the arrival marker.
    #[error("ward {ward} in {building} does not end with a 'ward' arrival step")]
    MissingArrivalStep { building: String, ward: String },

    /// Raised when a location name could not be found in the campus graph.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised at the CLI boundary when two locations share no direct path.
    #[error("no direct route between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
