use crate::conf::ConfigError;

pub fn print_config_error(err: &ConfigError) {
    eprintln!("{err}");
    if let Some(hint) = config_error_hint(err) {
        eprintln!();
        eprintln!("{hint}");
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::Parse { .. } => Some(
            "The config file must be HCL with optional `report`, `analysis` and `logging` blocks.\n\
             \n\
             Example:\n\
             \n\
             report {\n\
             \x20 top_n         = 10\n\
             \x20 recent_errors = 10\n\
             }",
        ),

        ConfigError::Invalid {
            field: "logging.level",
            ..
        } => Some(
            "Log levels use tracing filter syntax.\n\
             \n\
             Examples: \"info\", \"warn\", \"logtally_core=debug\"",
        ),

        ConfigError::Invalid {
            field: "logging.file",
            ..
        } => Some(
            "The log file must name a file, not a directory.\n\
             \n\
             Example: file = \"/var/log/logtally.log\"",
        ),

        ConfigError::Invalid { .. } => Some(
            "Rankings and worker counts must be at least 1.\n\
             \n\
             Check the config file and the --top / --jobs flags.",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
