#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(30);

#[allow(dead_code)]
pub const TLD_LIST: &str =
    "# Version 2024101600, Last Updated Wed Oct 16 07:07:01 2024 UTC\nCOM\nIO\nDEV\n";

/// Create a `tldseek` command isolated from the caller's environment.
#[allow(dead_code)]
pub fn tldseek_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tldseek"));
    cmd.timeout(CMD_TIMEOUT);
    for var in [
        "CONFIG",
        "CACHE",
        "TLDSEEK_TLD_LIST_URL",
        "TLDSEEK_PROBE_TEMPLATE",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

/// `tldseek_cmd` pointed at a mock server for the TLD list and probes.
#[allow(dead_code)]
pub fn tldseek_against(server: &MockServer) -> Command {
    let mut cmd = tldseek_cmd();
    cmd.env("TLDSEEK_TLD_LIST_URL", format!("{}/tlds.txt", server.uri()))
        .env(
            "TLDSEEK_PROBE_TEMPLATE",
            format!("{}/probe/{{label}}.{{tld}}", server.uri()),
        )
        .args(["--timeout", "2"]);
    cmd
}

#[allow(dead_code)]
pub fn b64(text: &str) -> String {
    STANDARD.encode(text)
}

#[allow(dead_code)]
pub async fn mount_tld_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tlds.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TLD_LIST))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_probe(server: &MockServer, host: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/probe/{host}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
