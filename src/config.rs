/// Configuration system
///
/// - `macros`: the `config_struct!` macro (struct + embedded defaults)
/// - `schemas`: every configuration structure with its defaults
/// - `utils`: loading from TOML and process-wide access helpers
mod macros;
mod schemas;
mod utils;

pub use schemas::{Config, HubConfig, WebSocketConfig, WebserverConfig};
pub use utils::{
    get_config_clone, load_config, load_config_from_path, parse_config, with_config,
    CONFIG, CONFIG_FILE_PATH,
};
