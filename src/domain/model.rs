use serde::{Deserialize, Deserializer, Serialize};

/// One title as listed in a collection page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(rename = "url", default)]
    pub detail_url: String,
    #[serde(rename = "imdb_score", deserialize_with = "score_from_number_or_string")]
    pub score: f64,
    #[serde(default)]
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// One server response page: `{ count, next, previous, results }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn next_page_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|url| !url.is_empty())
    }
}

/// Query parameters for the titles collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleQuery {
    pub genre: Option<String>,
    pub title_contains: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl TitleQuery {
    /// Empty genre means no filter.
    pub fn genre(genre: &str) -> Self {
        Self {
            genre: Some(genre.to_string()).filter(|g| !g.is_empty()),
            ..Self::default()
        }
    }

    pub fn search(title: &str, page: u32) -> Self {
        Self {
            title_contains: Some(title.to_string()),
            page: Some(page),
            ..Self::default()
        }
    }
}

/// Age rating as served by the catalogue: either a label ("PG-13",
/// "Not rated") or a minimum age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    MinimumAge(u32),
    Label(String),
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::MinimumAge(age) => write!(f, "{}+", age),
            Rating::Label(label) => f.write_str(label),
        }
    }
}

/// Full record served by `GET {base_url}{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(rename = "url", default)]
    pub detail_url: String,
    #[serde(rename = "imdb_score", deserialize_with = "score_from_number_or_string")]
    pub score: f64,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub writers: Vec<String>,
    #[serde(default)]
    pub countries: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "list_from_string_or_list")]
    pub company: Vec<String>,
    #[serde(default)]
    pub rated: Option<Rating>,
    #[serde(default, deserialize_with = "optional_score")]
    pub avg_vote: Option<f64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub votes: Option<u64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub budget: Option<u64>,
    #[serde(default)]
    pub budget_currency: Option<String>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub usa_gross_income: Option<u64>,
    #[serde(default, deserialize_with = "optional_amount")]
    pub worldwide_gross_income: Option<u64>,
}

impl MovieDetails {
    pub fn summary(&self) -> ItemSummary {
        ItemSummary {
            id: self.id,
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            detail_url: self.detail_url.clone(),
            score: self.score,
            year: self.year,
            duration: self.duration,
        }
    }
}

/// One carousel the home page asks for. `category` is a genre name or
/// the `best` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselRequest {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub skip: usize,
    pub total: usize,
}

/// Best movie shown at the top of the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    pub movie: ItemSummary,
    pub details: MovieDetails,
}

/// One carousel of the home page. A failed fetch stays attached to its
/// section so the others still render.
#[derive(Debug)]
pub struct Carousel {
    pub title: String,
    pub genre: String,
    pub items: crate::utils::error::Result<Vec<ItemSummary>>,
}

#[derive(Debug)]
pub struct HomePage {
    pub hero: Option<crate::utils::error::Result<Hero>>,
    pub carousels: Vec<Carousel>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn parse_score<E: serde::de::Error>(text: &str) -> std::result::Result<f64, E> {
    text.trim()
        .parse::<f64>()
        .map_err(|e| E::custom(format!("invalid score '{}': {}", text, e)))
}

// 分數可能是數字 (8.1) 或字串 ("8.1")
fn score_from_number_or_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => parse_score(&text),
    }
}

fn optional_score<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(text)) => parse_score(&text).map(Some),
    }
}

// 金額與票數：數字、"1234567"、"$ 1,234,567" 皆可；無法解析視為缺值
fn optional_amount<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrText::Number(value)) if value >= 0.0 => Some(value as u64),
        Some(NumberOrText::Number(_)) => None,
        Some(NumberOrText::Text(text)) => {
            let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse::<u64>().ok()
        }
    };
    Ok(amount)
}

fn list_from_string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let values = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) if value.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    };
    Ok(values)
}
