mod settings;

pub use settings::{
    Config, ConfigError, TomlAssetsConfig, TomlCardConfig, TomlConfig, TomlNotifyConfig,
    ENV_PUBLIC_KEY, ENV_SERVICE_ID, ENV_TEMPLATE_ID, EXAMPLE_CONFIG,
};
