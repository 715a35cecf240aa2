//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use navdesk::config::schema::AppConfig;

/// Navigation document shaped like the production menu, plus a nested `url`.
pub const NAV_JSON: &str = r#"{
    "collapsible": "icon",
    "user": {"name": "tester", "email": "t@example.com", "avatar": "/a.jpg"},
    "teams": [{"name": "Team", "logo": "Command", "plan": "Free"}],
    "navMain": [
        {
            "title": "Automation",
            "url": {"path": "/auto", "redirect": "/auto/video"},
            "icon": "SquareTerminal",
            "isActive": true,
            "items": [
                {"title": "Video", "url": {"path": "/auto/video", "component": "Video"}},
                {"title": "Second", "url": {"path": "/auto/auto2", "component": "Auto2"}}
            ]
        },
        {
            "title": "Reports",
            "url": {"path": "/reports", "component": "Reports", "children": [{"url": "/reports/daily"}]}
        }
    ]
}"#;

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Config running `script_body` through `sh`, with user data under `dir`.
pub fn sh_config(dir: &Path, script_body: &str, timeout_secs: u64) -> AppConfig {
    let script = write_file(dir, "script.sh", script_body);
    let mut config = AppConfig::default();
    config.processor.interpreter = "sh".to_string();
    config.processor.interpreter_args = Vec::new();
    config.processor.script_path = Some(script);
    config.processor.timeout_secs = timeout_secs;
    config.app.user_data_dir = Some(dir.join("user-data"));
    config
}
