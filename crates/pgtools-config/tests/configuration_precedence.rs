//! Behavioural coverage for layered configuration loading.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use pgtools_config::{
    Config, FrameTerminator, default_frame_terminator, default_log_filter, default_log_format,
    default_max_content_length,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    config_lines: RefCell<Vec<String>>,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let env_guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            config_lines: RefCell::new(Vec::new()),
            cli_args: RefCell::new(vec![OsString::from("pgtoolsd")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_guard: env_guard,
        }
    }

    fn add_config_line(&self, line: String) {
        self.config_lines.borrow_mut().push(line);
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Environment mutation is `unsafe` on newer toolchains; `Drop` restores
        // the previous value and `ENV_MUTEX` serialises the harnesses.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let mut args = self.cli_args.borrow().clone();
        let lines = self.config_lines.borrow();
        if !lines.is_empty() {
            let path = self.temp_dir.path().join("pgtools.toml");
            if let Err(error) = fs::write(&path, lines.join("\n")) {
                panic!("failed to write configuration: {error}");
            }
            args.insert(1, OsString::from("--config-path"));
            args.insert(2, path.into_os_string());
        }

        match Config::load_from_iter(args) {
            Ok(config) => *self.loaded.borrow_mut() = Some(config),
            Err(error) => *self.error.borrow_mut() = Some(error.to_string()),
        }
    }

    fn config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            if let Some(os_value) = value {
                unsafe { std::env::set_var(&key, os_value) };
            } else {
                unsafe { std::env::remove_var(&key) };
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the log filter to \"{filter}\"")]
fn given_log_filter_file(harness: &Harness, filter: String) {
    harness.add_config_line(format!("log_filter = \"{filter}\""));
}

#[given("a configuration file setting the frame terminator to \"{terminator}\"")]
fn given_terminator_file(harness: &Harness, terminator: String) {
    harness.add_config_line(format!("frame_terminator = \"{terminator}\""));
}

#[given("the environment overrides the log filter to \"{filter}\"")]
fn given_environment_override(harness: &Harness, filter: String) {
    harness.set_env("PGTOOLS_LOG_FILTER", &filter);
}

#[when("the CLI sets the log filter to \"{filter}\"")]
fn when_cli_override(harness: &Harness, filter: String) {
    harness.push_cli_arg("--log-filter");
    harness.push_cli_arg(OsString::from(&filter));
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the log filter to \"{filter}\"")]
fn then_resolved_filter(harness: &Harness, filter: String) {
    assert_eq!(harness.config().log_filter(), filter);
}

#[then("loading the configuration resolves the frame terminator to \"{terminator}\"")]
fn then_resolved_terminator(harness: &Harness, terminator: String) {
    let expected = match terminator.parse::<FrameTerminator>() {
        Ok(value) => value,
        Err(error) => panic!("invalid expected terminator '{terminator}': {error}"),
    };
    assert_eq!(harness.config().frame_terminator(), expected);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.config();
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config.frame_terminator(), default_frame_terminator());
    assert_eq!(config.max_content_length(), default_max_content_length());
    assert!(config.log_file().is_none());
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply when nothing is overridden"
)]
fn defaults_apply(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Environment overrides the configuration file"
)]
fn environment_overrides_file(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "CLI flags override the environment"
)]
fn cli_overrides_environment(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Frame terminator is read from the configuration file"
)]
fn terminator_from_file(#[from(harness)] harness: Harness) {
    drop(harness);
}
