use crate::core::fetcher::{BEST_CATEGORY, DEFAULT_TOTAL};
use crate::core::ConfigProvider;
use crate::domain::model::CarouselRequest;
use crate::utils::error::{CatalogueError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1/titles/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub home: HomeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    pub page_size: Option<u32>,
    #[serde(default = "default_sort_field")]
    pub sort_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeConfig {
    #[serde(default = "default_true")]
    pub hero: bool,
    #[serde(default = "default_carousel_size")]
    pub carousel_size: usize,
    #[serde(default = "default_carousels")]
    pub carousels: Vec<CarouselConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub skip: usize,
    pub total: Option<usize>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    crate::adapters::http::DEFAULT_TIMEOUT_SECONDS
}

fn default_sort_field() -> String {
    crate::adapters::http::DEFAULT_SORT_FIELD.to_string()
}

fn default_true() -> bool {
    true
}

fn default_carousel_size() -> usize {
    DEFAULT_TOTAL
}

fn default_carousels() -> Vec<CarouselConfig> {
    // 首頁預設的四個分類；最佳分類跳過第一部（已在首圖顯示）
    vec![
        CarouselConfig {
            title: "Best-rated".to_string(),
            genre: BEST_CATEGORY.to_string(),
            skip: 1,
            total: None,
        },
        CarouselConfig {
            title: "Romance".to_string(),
            genre: "Romance".to_string(),
            skip: 0,
            total: None,
        },
        CarouselConfig {
            title: "Sci-Fi".to_string(),
            genre: "Sci-Fi".to_string(),
            skip: 0,
            total: None,
        },
        CarouselConfig {
            title: "Mystery".to_string(),
            genre: "Mystery".to_string(),
            skip: 0,
            total: None,
        },
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            page_size: None,
            sort_field: default_sort_field(),
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            hero: true,
            carousel_size: default_carousel_size(),
            carousels: default_carousels(),
        }
    }
}

impl HomeConfig {
    pub fn carousel_requests(&self) -> Vec<CarouselRequest> {
        self.carousels
            .iter()
            .map(|c| CarouselRequest {
                title: c.title.clone(),
                category: c.genre.clone(),
                skip: c.skip,
                total: c.total.unwrap_or(self.carousel_size),
            })
            .collect()
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogueError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogueError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOGUE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogueError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("environment pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_collection_url("api.base_url", &self.api.base_url)?;
        validation::validate_range("api.timeout_seconds", self.api.timeout_seconds, 1, 300)?;
        validation::validate_non_empty_string("api.sort_field", &self.api.sort_field)?;
        if let Some(page_size) = self.api.page_size {
            validation::validate_positive_number("api.page_size", page_size as usize, 1)?;
        }

        validation::validate_positive_number("home.carousel_size", self.home.carousel_size, 1)?;
        for carousel in &self.home.carousels {
            validation::validate_non_empty_string("home.carousels.title", &carousel.title)?;
            if let Some(total) = carousel.total {
                validation::validate_positive_number("home.carousels.total", total, 1)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.api.timeout_seconds
    }

    fn page_size(&self) -> Option<u32> {
        self.api.page_size
    }

    fn sort_field(&self) -> &str {
        &self.api.sort_field
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
