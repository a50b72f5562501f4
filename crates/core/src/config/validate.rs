use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Task limits, worker count, queue capacity and HTTP timeout are non-zero
/// - At least one file extension is allowed
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(invalid("server.port cannot be 0"));
    }

    if config.tasks.max_active_tasks == 0 {
        return Err(invalid("tasks.max_active_tasks cannot be 0"));
    }

    if config.tasks.max_files_per_task == 0 {
        return Err(invalid("tasks.max_files_per_task cannot be 0"));
    }

    if config.tasks.allowed_extensions.is_empty() {
        return Err(invalid("tasks.allowed_extensions cannot be empty"));
    }

    if config.workers.count == 0 {
        return Err(invalid("workers.count cannot be 0"));
    }

    if config.workers.queue_capacity == 0 {
        return Err(invalid("workers.queue_capacity cannot be 0"));
    }

    if config.http.timeout_secs == 0 {
        return Err(invalid("http.timeout_secs cannot be 0"));
    }

    Ok(())
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::ValidationError(msg.to_string())
}
