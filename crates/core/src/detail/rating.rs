//! Rating capture step of the watched flow.
//!
//! Marking a movie as watched goes through an explicit [`RatingCapture`]: it is
//! opened by the watched toggle, carries the movie being rated and is consumed
//! by exactly one successful submission (or dropped on cancel).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{MovieDetails, MovieId};
use crate::library::WatchedEntry;

pub const MAX_RATING: u8 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating must be between 0 and 10, got {0}")]
    OutOfRange(u8),
}

/// A validated rating (0 = not rated) with an optional review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSubmission {
    rating: u8,
    review: Option<String>,
}

impl RatingSubmission {
    pub fn new(rating: u8, review: Option<String>) -> Result<Self, RatingError> {
        if rating > MAX_RATING {
            return Err(RatingError::OutOfRange(rating));
        }

        let review = review
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        Ok(Self { rating, review })
    }

    /// Submission without rating or review.
    pub fn unrated() -> Self {
        Self {
            rating: 0,
            review: None,
        }
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn review(&self) -> Option<&str> {
        self.review.as_deref()
    }

    /// Notice shown once the movie has been marked as watched.
    pub fn success_message(&self) -> String {
        if self.rating == 0 {
            "Marked as watched!".to_string()
        } else {
            format!("Marked as watched with {}/{} rating!", self.rating, MAX_RATING)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingColor {
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Emerald,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingInfo {
    pub rating: u8,
    pub label: &'static str,
    pub color: RatingColor,
}

pub fn rating_info(rating: u8) -> RatingInfo {
    let label = match rating {
        0 => "Not Rated",
        1..=2 => "Terrible",
        3..=4 => "Bad",
        5 => "Poor",
        6 => "Okay",
        7 => "Good",
        8 => "Great",
        9 => "Excellent",
        _ => "Masterpiece",
    };
    let color = match rating {
        0 => RatingColor::Gray,
        1..=3 => RatingColor::Red,
        4..=5 => RatingColor::Orange,
        6..=7 => RatingColor::Yellow,
        8 => RatingColor::Green,
        _ => RatingColor::Emerald,
    };

    RatingInfo {
        rating,
        label,
        color,
    }
}

/// Open capture step for one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingCapture {
    pub movie_id: MovieId,
    pub title: String,
    /// Poster reference, empty when the movie has none.
    pub poster: String,
}

impl RatingCapture {
    pub fn for_movie(movie: &MovieDetails) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            poster: movie.poster_ref().to_string(),
        }
    }

    pub fn preview(&self, rating: u8) -> RatingInfo {
        rating_info(rating.min(MAX_RATING))
    }

    /// Watched-list record for `submission`.
    pub fn entry(&self, submission: &RatingSubmission) -> WatchedEntry {
        WatchedEntry {
            movie_id: self.movie_id,
            movie_title: self.title.clone(),
            movie_poster: self.poster.clone(),
            rating: submission.rating,
            review: submission.review.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_validation() {
        assert_eq!(RatingSubmission::new(11, None), Err(RatingError::OutOfRange(11)));

        let s = RatingSubmission::new(10, Some("  Loved it ".to_string())).unwrap();
        assert_eq!(s.rating(), 10);
        assert_eq!(s.review(), Some("Loved it"));

        let blank = RatingSubmission::new(3, Some("   ".to_string())).unwrap();
        assert_eq!(blank.review(), None);
    }

    #[test]
    fn test_success_message() {
        assert_eq!(RatingSubmission::unrated().success_message(), "Marked as watched!");
        let seven = RatingSubmission::new(7, None).unwrap();
        assert_eq!(seven.success_message(), "Marked as watched with 7/10 rating!");
    }

    #[test]
    fn test_rating_info_bands() {
        let cases = [
            (0, "Not Rated", RatingColor::Gray),
            (2, "Terrible", RatingColor::Red),
            (3, "Bad", RatingColor::Red),
            (4, "Bad", RatingColor::Orange),
            (5, "Poor", RatingColor::Orange),
            (6, "Okay", RatingColor::Yellow),
            (7, "Good", RatingColor::Yellow),
            (8, "Great", RatingColor::Green),
            (9, "Excellent", RatingColor::Emerald),
            (10, "Masterpiece", RatingColor::Emerald),
        ];
        for (rating, label, color) in cases {
            let info = rating_info(rating);
            assert_eq!(info.label, label, "label for {}", rating);
            assert_eq!(info.color, color, "color for {}", rating);
        }
    }

    #[test]
    fn test_capture_entry() {
        let movie = MovieDetails {
            id: MovieId(550),
            title: "Fight Club".to_string(),
            ..Default::default()
        };
        let capture = RatingCapture::for_movie(&movie);
        assert_eq!(capture.poster, "");

        let entry = capture.entry(&RatingSubmission::new(8, Some("Great".to_string())).unwrap());
        assert_eq!(entry.movie_id, MovieId(550));
        assert_eq!(entry.movie_title, "Fight Club");
        assert_eq!(entry.rating, 8);
        assert_eq!(entry.review.as_deref(), Some("Great"));
        assert_eq!(capture.preview(42).label, "Masterpiece");
    }
}
