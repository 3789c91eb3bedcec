pub mod payment;
pub mod report;
pub mod reservation;
pub mod slot;
pub mod user;
pub mod vehicle;

#[cfg(test)]
pub(crate) mod fixture {
    use adapter::database::{Database, Tables};
    use chrono::{NaiveDate, NaiveDateTime};
    use registry::AppRegistry;
    use shared::config::{AdminConfig, AppConfig, StorageConfig};

    pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    pub fn app_config(admin: bool) -> AppConfig {
        AppConfig {
            storage: StorageConfig::new("."),
            admin: admin.then(|| AdminConfig {
                username: "admin".into(),
                password: "123".into(),
            }),
        }
    }

    /// An empty lot that never writes to disk.
    pub fn registry() -> AppRegistry {
        AppRegistry::new(
            Database::in_memory(Tables::with_initial_slots()),
            app_config(true),
        )
    }
}
