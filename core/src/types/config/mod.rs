mod app;

pub use app::{
    ApiConfig, AppConfig, AppConfigError, HealthConfig, RecordsConfig, UserConfig,
};
