use crate::domain::model::{ItemSummary, TitleQuery};
use crate::domain::ports::Catalogue;
use crate::utils::error::{CatalogueError, Result};

pub const DEFAULT_TOTAL: usize = 18;

/// Label that stands for the unfiltered, globally top-sorted collection.
pub const BEST_CATEGORY: &str = "best";

/// Maps a category label to the genre filter sent to the catalogue.
pub fn genre_filter(category: &str) -> &str {
    if category.eq_ignore_ascii_case(BEST_CATEGORY) {
        ""
    } else {
        category
    }
}

/// Fetches the top-scored titles of a genre, at most two pages deep.
pub struct GenreFetcher<'a, C: Catalogue + ?Sized> {
    catalogue: &'a C,
}

impl<'a, C: Catalogue + ?Sized> GenreFetcher<'a, C> {
    pub fn new(catalogue: &'a C) -> Self {
        Self { catalogue }
    }

    /// Returns `min(total, available)` items: page 1 minus its first
    /// `skip` items, topped up from the page behind page 1's `next` link.
    pub async fn fetch(&self, genre: &str, skip: usize, total: usize) -> Result<Vec<ItemSummary>> {
        if total == 0 {
            return Err(CatalogueError::InvalidConfigValueError {
                field: "total".to_string(),
                value: total.to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }

        let first = self.catalogue.titles(&TitleQuery::genre(genre)).await?;
        let next = first.next_page_url().map(str::to_string);
        let first_len = first.results.len();

        let mut items: Vec<ItemSummary> = first.results.into_iter().skip(skip).collect();
        items.truncate(total);
        tracing::debug!(
            "Genre '{}': page 1 had {} items, {} left after skipping {}",
            genre,
            first_len,
            items.len(),
            skip
        );

        if items.len() < total {
            match next {
                Some(url) => {
                    let second = self.catalogue.follow(&url).await?;
                    let missing = total - items.len();
                    tracing::debug!(
                        "Genre '{}': taking up to {} of {} items from page 2",
                        genre,
                        missing,
                        second.results.len()
                    );
                    items.extend(second.results.into_iter().take(missing));
                }
                None => {
                    tracing::debug!(
                        "Genre '{}': no next page, returning {} of {} requested",
                        genre,
                        items.len(),
                        total
                    );
                }
            }
        }

        Ok(items)
    }
}
