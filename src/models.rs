use serde::Deserialize;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Fields of a movie imported from TMDB, before it has an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: String,
    pub description: String,
    pub img_url: String,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct FindQuery {
    pub id_json: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectForm {
    #[serde(rename = "movie-title", default)]
    pub movie_title: String,
}

/// Raw edit form. Both fields arrive as text so a bad rating can be
/// reported on the form instead of being rejected by the extractor.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub new_rating: String,
    #[serde(default)]
    pub new_review: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RatingUpdate {
    pub rating: f64,
    /// `None` keeps the stored review.
    pub review: Option<String>,
}

impl EditForm {
    pub fn validate(&self) -> Result<RatingUpdate, String> {
        let raw = self.new_rating.trim();
        if raw.is_empty() {
            return Err("Rating is required".to_string());
        }

        let rating: f64 = raw.parse().map_err(|_| format!("\"{raw}\" is not a number"))?;
        if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(format!("Rating must be between {MIN_RATING} and {MAX_RATING}"));
        }

        let review = self.new_review.trim();
        let review = (!review.is_empty()).then(|| review.to_string());

        Ok(RatingUpdate { rating, review })
    }
}
