//! `ccsync check`: print the resolved configuration, secrets redacted.

use ccsync_core::{SyncConfig, TlsVerification};

pub fn handle(config: &SyncConfig) {
    let controller = &config.controller;
    let repo = &config.repo;
    let tls = match &controller.tls {
        TlsVerification::SystemDefaults => "system roots".to_owned(),
        TlsVerification::CustomCa(path) => format!("custom CA {}", path.display()),
        TlsVerification::DangerAcceptInvalid => "verification disabled".to_owned(),
    };

    println!("Catalyst Center  {} (user {}, TLS {tls})", controller.url, controller.username);
    println!("  project        {}", controller.project);
    println!("GitHub           {} (owner {}, branch {})", repo.api_url, repo.owner, repo.branch);
    println!("  templates repo {} -> {}", repo.templates_repo, config.templates_dir.display());
    println!("  state repo     {} <- {}", repo.state_repo, config.state_dir.display());
    println!(
        "Task polling     {} attempts, {:?} initial, {:?} max, {:?} settle",
        config.task_policy.max_attempts,
        config.task_policy.initial_delay,
        config.task_policy.max_delay,
        config.task_policy.settle_delay
    );
}
