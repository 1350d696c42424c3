//! MyFoodRepo smoke test
//!
//! Runs a short session against a live server and reports whether each step
//! behaved as expected. Configuration comes from `MFR_*` environment
//! variables; `MFR_API_KEY` is required.

use std::collections::BTreeMap;

use tracing_subscriber::EnvFilter;

use mfr::build_info;
use mfr::models::{new_installation_uuid, Login, User};
use mfr::{ApiResult, ClientConfig, MfrClient};

/// Outcome of one step of the session
struct Check {
    step: &'static str,
    should_succeed: bool,
    result: Result<String, String>,
}

impl Check {
    fn new<T, F>(step: &'static str, should_succeed: bool, result: &ApiResult<T>, describe: F) -> Self
    where
        F: FnOnce(&T) -> String,
    {
        let result = match result {
            Ok(value) => Ok(describe(value)),
            Err(e) => Err(e.to_string()),
        };
        Self {
            step,
            should_succeed,
            result,
        }
    }

    fn as_expected(&self) -> bool {
        self.result.is_ok() == self.should_succeed
    }

    fn print(&self) {
        let verdict = if self.as_expected() { "EXPECTED" } else { "UNEXPECTED" };
        match &self.result {
            Ok(detail) => println!("[{}] {}: ok ({})", verdict, self.step, detail),
            Err(error) => println!("[{}] {}: failed ({})", verdict, self.step, error),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mfr=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner("smoke test");

    let config = ClientConfig::from_env()?;
    eprintln!("Server: {}", config.api_base());

    let uuid = config
        .installation_uuid
        .clone()
        .unwrap_or_else(new_installation_uuid);
    let mut client = MfrClient::new(&config)?;
    let mut checks = Vec::new();

    let result = client.report_installation(&uuid, BTreeMap::new()).await;
    checks.push(Check::new("report installation", true, &result, |r| {
        format!("env {:?}", r.meta.env)
    }));

    let result = client.log_in(&User::new(Login::anonymous())).await;
    checks.push(Check::new("anonymous login", true, &result, |_| {
        "session opened".to_string()
    }));

    let result = client.get_user(None).await;
    let user_id = result.as_ref().ok().and_then(|r| r.data.user.profile.id);
    checks.push(Check::new("get current user", true, &result, |r| {
        r.data
            .user
            .profile
            .id
            .map(|id| format!("id {}", id))
            .unwrap_or_else(|| "no id".to_string())
    }));

    match user_id {
        Some(id) => {
            let result = client.get_user(Some(id)).await;
            checks.push(Check::new("get user by id", true, &result, |r| {
                let auth_type = r.data.user.auth_type.map(|t| t.as_str()).unwrap_or("unknown");
                format!("auth type {}", auth_type)
            }));
        }
        None => eprintln!("Skipping lookup by id, current user unknown"),
    }

    let result = client.log_out().await;
    checks.push(Check::new("logout", true, &result, |_| "session closed".to_string()));

    let result = client.get_user(None).await;
    checks.push(Check::new("get user after logout", false, &result, |_| {
        "user still visible".to_string()
    }));

    println!();
    for check in &checks {
        check.print();
    }

    let unexpected = checks.iter().filter(|c| !c.as_expected()).count();
    println!();
    println!("{} steps, {} unexpected", checks.len(), unexpected);

    if unexpected > 0 {
        std::process::exit(1);
    }
    Ok(())
}
