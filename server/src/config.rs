use std::path::PathBuf;

use anyhow::Result;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub dataset_path: PathBuf,
    pub dashboard_title: String,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let dataset_path = std::env::var("DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("promotion_clean.csv"));

        let dashboard_title =
            std::env::var("DASHBOARD_TITLE").unwrap_or_else(|_| "Promotion Dashboard".into());

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            dataset_path,
            dashboard_title,
            cors_allowed_origins,
        })
    }
}
