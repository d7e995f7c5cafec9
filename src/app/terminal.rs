use crate::domain::model::{Hero, ItemSummary, MovieDetails};
use crate::domain::ports::Renderer;
use crate::utils::error::Result;
use std::io::Write;

const NOT_AVAILABLE: &str = "N/A";

/// Plain-text rendering of the catalogue views.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn item_line(&mut self, position: usize, item: &ItemSummary) -> Result<()> {
        writeln!(
            self.out,
            "  {:>2}. {} ({}) ★ {:.1}  [#{}]",
            position, item.title, item.year, item.score, item.id
        )?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn hero(&mut self, hero: &Result<Hero>) -> Result<()> {
        match hero {
            Ok(hero) => {
                writeln!(self.out, "== {} ==", hero.movie.title)?;
                writeln!(self.out, "{}", hero.movie.image_url)?;
                let description = hero.details.description.as_deref().unwrap_or(NOT_AVAILABLE);
                writeln!(self.out, "{}", description)?;
                writeln!(self.out, "More: juststreamit details {}", hero.movie.id)?;
            }
            Err(e) => writeln!(
                self.out,
                "== Best movie unavailable: {} ==",
                e.user_friendly_message()
            )?,
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn carousel(&mut self, title: &str, items: &Result<Vec<ItemSummary>>) -> Result<()> {
        writeln!(self.out, "{} movies", title)?;
        match items {
            Ok(items) if items.is_empty() => writeln!(self.out, "  (no titles)")?,
            Ok(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.item_line(index + 1, item)?;
                }
            }
            Err(e) => writeln!(self.out, "  (unavailable: {})", e.user_friendly_message())?,
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn details(&mut self, details: &MovieDetails) -> Result<()> {
        let view = DetailsView::from(details);
        writeln!(self.out, "{}", details.title)?;
        writeln!(self.out, "{}", details.image_url)?;
        for (label, value) in view.rows() {
            writeln!(self.out, "{:<11} {}", label, value)?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", view.summary)?;
        Ok(())
    }

    fn list(&mut self, items: &[ItemSummary]) -> Result<()> {
        if items.is_empty() {
            writeln!(self.out, "(no titles)")?;
        }
        for (index, item) in items.iter().enumerate() {
            self.item_line(index + 1, item)?;
        }
        Ok(())
    }
}

/// Display strings of the details view.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub year: String,
    pub duration: String,
    pub genres: String,
    pub score: String,
    pub rating: String,
    pub directors: String,
    pub cast: String,
    pub countries: String,
    pub box_office: String,
    pub summary: String,
}

impl DetailsView {
    fn rows(&self) -> [(&'static str, &str); 9] {
        [
            ("Year", self.year.as_str()),
            ("Duration", self.duration.as_str()),
            ("Genres", self.genres.as_str()),
            ("IMDb", self.score.as_str()),
            ("Rated", self.rating.as_str()),
            ("Directors", self.directors.as_str()),
            ("Cast", self.cast.as_str()),
            ("Country", self.countries.as_str()),
            ("Box office", self.box_office.as_str()),
        ]
    }
}

impl From<&MovieDetails> for DetailsView {
    fn from(details: &MovieDetails) -> Self {
        let duration = details
            .duration
            .map(|minutes| format!("{} min", minutes))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let rating = details
            .rated
            .as_ref()
            .map(|rated| rated.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let box_office = match (details.worldwide_gross_income, &details.budget_currency) {
            (Some(income), Some(currency)) => format!("{} {}", income, currency),
            (Some(income), None) => income.to_string(),
            (None, _) => NOT_AVAILABLE.to_string(),
        };

        // 長描述沒有任何字母時視為缺失
        let summary = details
            .long_description
            .as_deref()
            .filter(|text| text.chars().any(|c| c.is_alphabetic()))
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        Self {
            year: details.year.to_string(),
            duration,
            genres: details.genres.join(", "),
            score: format!("{} / 10", details.score),
            rating,
            directors: details.directors.join(", "),
            cast: format!("{}...", details.actors.join(", ")),
            countries: details.countries.join(", "),
            box_office,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Rating;
    use crate::utils::error::CatalogueError;

    fn details() -> MovieDetails {
        serde_json::from_value(serde_json::json!({
            "id": 1508669,
            "title": "Hopeful Notes",
            "image_url": "https://img.example/1508669.jpg",
            "url": "http://localhost:8000/api/v1/titles/1508669",
            "imdb_score": "9.6",
            "year": 2010,
            "duration": 90,
            "genres": ["Drama", "Music"],
            "directors": ["Valentina Kupriyanova"],
            "actors": ["Anna Ruth", "Marc Vidal"],
            "countries": ["Italy"],
            "rated": "Not rated or unkown rating",
            "worldwide_gross_income": 13000,
            "budget_currency": "USD",
            "long_description": "A story told through music."
        }))
        .unwrap()
    }

    fn item(id: u64, title: &str) -> ItemSummary {
        ItemSummary {
            id,
            title: title.to_string(),
            image_url: String::new(),
            detail_url: String::new(),
            score: 8.4,
            year: 1994,
            duration: None,
        }
    }

    #[test]
    fn test_details_view_formats_fields() {
        let view = DetailsView::from(&details());

        assert_eq!(view.duration, "90 min");
        assert_eq!(view.score, "9.6 / 10");
        assert_eq!(view.genres, "Drama, Music");
        assert_eq!(view.cast, "Anna Ruth, Marc Vidal...");
        assert_eq!(view.box_office, "13000 USD");
        assert_eq!(view.rating, "Not rated or unkown rating");
        assert_eq!(view.summary, "A story told through music.");
    }

    #[test]
    fn test_details_view_fallbacks() {
        let mut movie = details();
        movie.rated = Some(Rating::MinimumAge(16));
        movie.worldwide_gross_income = None;
        movie.long_description = Some("|".to_string());
        movie.duration = None;

        let view = DetailsView::from(&movie);

        assert_eq!(view.rating, "16+");
        assert_eq!(view.box_office, "N/A");
        assert_eq!(view.summary, "N/A");
        assert_eq!(view.duration, "N/A");
    }

    #[test]
    fn test_carousel_renders_items_in_order() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer
            .carousel("Romance", &Ok(vec![item(1, "First"), item(2, "Second")]))
            .unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let first = output.find("First").unwrap();
        let second = output.find("Second").unwrap();
        assert!(output.starts_with("Romance movies\n"));
        assert!(first < second);
    }

    #[test]
    fn test_failed_carousel_renders_placeholder() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let failure = Err(CatalogueError::HttpStatus {
            status: 502,
            url: "http://localhost:8000/api/v1/titles/".to_string(),
        });
        renderer.carousel("Mystery", &failure).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Mystery movies"));
        assert!(output.contains("unavailable: The catalogue service answered with status 502"));
    }

    #[test]
    fn test_details_render_contains_rows() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        renderer.details(&details()).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.starts_with("Hopeful Notes\n"));
        assert!(output.contains("Duration    90 min"));
        assert!(output.contains("Box office  13000 USD"));
    }
}
