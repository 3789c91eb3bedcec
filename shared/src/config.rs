use std::path::PathBuf;

use anyhow::Result;

pub const DEFAULT_DATA_DIR: &str = ".";

pub struct AppConfig {
    pub storage: StorageConfig,
    pub admin: Option<AdminConfig>,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let storage = StorageConfig {
            data_dir: std::env::var("SMART_PARK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
        };
        // 片方だけ設定されている場合も管理者ログインは無効
        let admin = match (
            std::env::var("SMART_PARK_ADMIN_USERNAME"),
            std::env::var("SMART_PARK_ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminConfig { username, password })
            }
            _ => None,
        };
        Ok(Self { storage, admin })
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join("users.txt")
    }

    pub fn vehicles_path(&self) -> PathBuf {
        self.data_dir.join("vehicles.txt")
    }

    pub fn slots_path(&self) -> PathBuf {
        self.data_dir.join("slots.txt")
    }

    pub fn reservations_path(&self) -> PathBuf {
        self.data_dir.join("reservations.txt")
    }

    pub fn payments_path(&self) -> PathBuf {
        self.data_dir.join("payments.txt")
    }
}

#[derive(Clone)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl AdminConfig {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}
