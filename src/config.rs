use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use cross_xdg::BaseDirs;
use tracing::{debug, warn};

use crate::program::SizePolicy;

/// When to color diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color only when stderr is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(ColorChoice::Auto),
            "always" => Some(ColorChoice::Always),
            "never" => Some(ColorChoice::Never),
            _ => None,
        }
    }

    /// Resolve `Auto` against the actual stderr.
    pub fn enabled(self) -> bool {
        use std::io::IsTerminal;
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        }
    }
}

fn parse_size_policy(value: &str) -> Option<SizePolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "truncate" => Some(SizePolicy::Truncate),
        "reject" => Some(SizePolicy::Reject),
        _ => None,
    }
}

/// Interpreter settings, resolved from defaults, `bf.toml`, then `BF_*`
/// environment variables. Command-line flags are applied on top by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub max_steps: Option<u64>,
    pub oversized: SizePolicy,
    pub color: ColorChoice,
}

impl Settings {
    /// Load from the config file and the process environment.
    pub fn load() -> Self {
        let mut settings = config_path()
            .and_then(|path| {
                debug!(path = %path.display(), "reading config");
                fs::read_to_string(path).ok()
            })
            .map(|content| Settings::from_toml_str(&content))
            .unwrap_or_default();
        settings.apply_env(|key| std::env::var(key).ok());
        settings
    }

    /// Parse the `[interpreter]` and `[diagnostics]` sections of a config
    /// file. Values may be quoted or bare; anything unrecognised is skipped.
    pub fn from_toml_str(content: &str) -> Self {
        let mut section = String::new();
        let mut map: HashMap<String, String> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') { continue; }
            if line.starts_with('[') && line.ends_with(']') {
                section = line[1..line.len() - 1].trim().to_string();
                continue;
            }
            if let Some(eq) = line.find('=') {
                let key = line[..eq].trim();
                let Some(val) = parse_value(line[eq + 1..].trim()) else {
                    warn!(key = %key, "ignoring malformed config value");
                    continue;
                };
                map.insert(format!("{section}.{key}"), val.to_string());
            }
        }

        let mut settings = Settings::default();
        for (key, val) in &map {
            let applied = match key.as_str() {
                "interpreter.max_steps" => settings.set_max_steps(val),
                "interpreter.oversized" => {
                    parse_size_policy(val).map(|p| settings.oversized = p).is_some()
                }
                "diagnostics.color" => {
                    ColorChoice::parse(val).map(|c| settings.color = c).is_some()
                }
                _ => {
                    debug!(key = %key, "skipping unknown config key");
                    continue;
                }
            };
            if !applied {
                warn!(key = %key, value = %val, "ignoring invalid config value");
            }
        }
        settings
    }

    /// Override from `BF_MAX_STEPS`, `BF_OVERSIZED` and `BF_COLOR`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BF_MAX_STEPS") {
            if !self.set_max_steps(&v) {
                warn!(value = %v, "ignoring invalid BF_MAX_STEPS");
            }
        }
        if let Some(p) = lookup("BF_OVERSIZED").as_deref().and_then(parse_size_policy) {
            self.oversized = p;
        }
        if let Some(c) = lookup("BF_COLOR").as_deref().and_then(ColorChoice::parse) {
            self.color = c;
        }
    }

    /// `0` or `unlimited` clears the limit.
    fn set_max_steps(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value.eq_ignore_ascii_case("unlimited") {
            self.max_steps = None;
            return true;
        }
        match value.replace('_', "").parse::<u64>() {
            Ok(0) => { self.max_steps = None; true }
            Ok(n) => { self.max_steps = Some(n); true }
            Err(_) => false,
        }
    }
}

/// `BF_CONFIG` if set, otherwise `bf.toml` in the XDG config home.
fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("BF_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");
    Some(path)
}

/// Value text after `=`: either a quoted string or a bare word, optionally
/// followed by a `#` comment. `None` if a quote is left open or something
/// other than a comment trails the closing quote.
fn parse_value(raw: &str) -> Option<&str> {
    if let Some(rest) = raw.strip_prefix('"') {
        let close = rest.find('"')?;
        let trailing = rest[close + 1..].trim_start();
        if !trailing.is_empty() && !trailing.starts_with('#') {
            return None;
        }
        return Some(&rest[..close]);
    }
    match raw.find('#') {
        Some(i) => Some(raw[..i].trim_end()),
        None => Some(raw),
    }
}
