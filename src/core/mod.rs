pub mod fetcher;
pub mod service;

pub use crate::domain::model::{CarouselRequest, ItemSummary, MovieDetails, Page, TitleQuery};
pub use crate::domain::ports::{Catalogue, ConfigProvider, Renderer};
pub use crate::utils::error::Result;
