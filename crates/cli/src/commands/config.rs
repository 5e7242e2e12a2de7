use pricely_core::config::{AppConfig, LoadOptions, LogFormat};

/// Prints the effective configuration after the full load pipeline, one
/// `section.key = value` line per setting. Secrets are redacted; presence is
/// still reported so operators can tell "unset" from "hidden".
pub fn run() -> String {
    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => render(&config),
        Err(error) => format!("configuration failed to load: {error}"),
    }
}

fn render(config: &AppConfig) -> String {
    let token_display = match &config.collaborators.auth_token {
        Some(_) => "<redacted>",
        None => "<unset>",
    };
    let format = match config.logging.format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    };

    [
        format!("server.bind_address = {}", config.server.bind_address),
        format!("server.port = {}", config.server.port),
        format!("server.graceful_shutdown_secs = {}", config.server.graceful_shutdown_secs),
        format!("collaborators.product_service_url = {}", config.collaborators.product_service_url),
        format!("collaborators.admin_service_url = {}", config.collaborators.admin_service_url),
        format!("collaborators.auth_token = {token_display}"),
        format!("collaborators.timeout_secs = {}", config.collaborators.timeout_secs),
        format!("logging.level = {}", config.logging.level),
        format!("logging.format = {format}"),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use pricely_core::config::AppConfig;

    use super::render;

    #[test]
    fn renders_every_section_and_redacts_the_token() {
        let mut config = AppConfig::default();
        config.collaborators.auth_token = Some("super-secret".to_string().into());

        let output = render(&config);
        assert!(output.contains("server.port = 8086"));
        assert!(output.contains("collaborators.auth_token = <redacted>"));
        assert!(!output.contains("super-secret"));
        assert!(output.contains("logging.format = compact"));
    }

    #[test]
    fn unset_token_is_distinguishable_from_a_redacted_one() {
        let output = render(&AppConfig::default());
        assert!(output.contains("collaborators.auth_token = <unset>"));
    }
}
