mod support_single;

use std::fs;

use tempfile::tempdir;

use support_single::{run_lbcheck, spawn_http_server};

fn failure_output(output: &std::process::Output) -> String {
    format!(
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_check_reports_json_summary() -> Result<(), String> {
    let (url, server) = spawn_http_server("200 OK")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;

    let output = run_lbcheck(
        dir.path(),
        [
            "-u",
            url.as_str(),
            "-n",
            "3",
            "-c",
            "2",
            "-i",
            "5ms",
            "--timeout",
            "2s",
            "--output-format",
            "json",
        ],
    )?;
    if !output.status.success() {
        return Err(failure_output(&output));
    }

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("invalid json summary: {}\n{}", err, failure_output(&output)))?;
    if summary.get("successes").and_then(serde_json::Value::as_u64) != Some(3) {
        return Err(format!("Unexpected summary: {}", summary));
    }
    let candidates = summary
        .get("candidates")
        .and_then(serde_json::Value::as_array)
        .ok_or("Missing candidates")?;
    if candidates.len() != 1
        || candidates.first().and_then(serde_json::Value::as_str) != Some("127.0.0.1")
    {
        return Err(format!("Unexpected candidates: {:?}", candidates));
    }
    if server.hits() < 3 {
        return Err(format!("Expected at least 3 requests, server saw {}", server.hits()));
    }
    Ok(())
}

#[test]
fn e2e_check_reads_default_config_file() -> Result<(), String> {
    let (url, _server) = spawn_http_server("404 Not Found")?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config = format!(
        "url = \"{}\"\nrequests = 2\ninterval = \"5ms\"\nquiet_responses = true\n",
        url
    );
    fs::write(dir.path().join("lbcheck.toml"), config)
        .map_err(|err| format!("write config failed: {}", err))?;

    let output = run_lbcheck(dir.path(), Vec::<&str>::new())?;
    if !output.status.success() {
        return Err(failure_output(&output));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Successful: 2 of 2 requested") {
        return Err(failure_output(&output));
    }
    Ok(())
}

#[test]
fn e2e_missing_url_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_lbcheck(dir.path(), ["-n", "1"])?;
    if output.status.success() {
        return Err("Expected failure without a URL".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_malformed_dns_server_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let output = run_lbcheck(
        dir.path(),
        ["-u", "http://127.0.0.1:1/", "--dns", "1.1.1.1:notaport"],
    )?;
    if output.status.success() {
        return Err("Expected failure for a malformed DNS server".to_owned());
    }
    Ok(())
}
