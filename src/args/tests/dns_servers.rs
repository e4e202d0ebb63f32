use super::*;
use crate::args::parse_dns_server;

#[test]
fn dns_server_defaults_port_53() -> AppResult<()> {
    let server = parse_dns_server("8.8.8.8")?;
    if server.host() != "8.8.8.8" || server.port() != 53 {
        return Err(AppError::validation(format!("Unexpected server: {}", server)));
    }
    Ok(())
}

#[test]
fn dns_server_keeps_explicit_port() -> AppResult<()> {
    let server = parse_dns_server("resolver.local:5353")?;
    if server.host() != "resolver.local" || server.port() != 5353 {
        return Err(AppError::validation(format!("Unexpected server: {}", server)));
    }
    Ok(())
}

#[test]
fn dns_server_accepts_ipv6_forms() -> AppResult<()> {
    let bare = parse_dns_server("2001:4860:4860::8888")?;
    if bare.host() != "2001:4860:4860::8888" || bare.port() != 53 {
        return Err(AppError::validation(format!("Unexpected server: {}", bare)));
    }
    let bracketed = parse_dns_server("[::1]:8053")?;
    if bracketed.host() != "::1" || bracketed.port() != 8053 {
        return Err(AppError::validation(format!(
            "Unexpected server: {}",
            bracketed
        )));
    }
    if bracketed.to_string() != "[::1]:8053" {
        return Err(AppError::validation(format!(
            "Unexpected display: {}",
            bracketed
        )));
    }
    Ok(())
}

#[test]
fn dns_server_rejects_bad_port() -> AppResult<()> {
    if parse_dns_server("8.8.8.8:dns").is_ok() {
        return Err(AppError::validation("Expected bad port to be rejected"));
    }
    if parse_dns_server("8.8.8.8:70000").is_ok() {
        return Err(AppError::validation("Expected out-of-range port"));
    }
    if parse_dns_server(":53").is_ok() {
        return Err(AppError::validation("Expected empty host to be rejected"));
    }
    Ok(())
}

#[test]
fn dns_server_list_skips_blank_entries() -> AppResult<()> {
    let servers = parse_dns_servers(&["8.8.8.8,".to_owned(), " ".to_owned()])?;
    if servers.len() != 1 {
        return Err(AppError::validation(format!(
            "Expected one server, got {}",
            servers.len()
        )));
    }
    Ok(())
}
