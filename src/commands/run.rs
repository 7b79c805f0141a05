use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;

use crate::cli_util::{print_error, print_exec_error};
use crate::config::{ColorChoice, Settings};
use crate::engine::Engine;
use crate::program::{Program, SizePolicy};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Program source file
    #[arg(value_name = "PROGRAM")]
    pub source: Option<PathBuf>,

    /// Abort after N instructions (fallback BF_MAX_STEPS; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<u64>,

    /// Fail instead of truncating sources larger than 64 KiB
    #[arg(long = "strict-size")]
    pub strict_size: bool,

    /// Color diagnostics (fallback BF_COLOR; default auto)
    #[arg(long = "color", value_name = "WHEN", value_enum)]
    pub color: Option<ColorChoice>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

impl RunArgs {
    /// Flags win over the environment and the config file.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(n) = self.max_steps {
            settings.max_steps = (n > 0).then_some(n);
        }
        if self.strict_size {
            settings.oversized = SizePolicy::Reject;
        }
        if let Some(c) = self.color {
            settings.color = c;
        }
    }
}

/// Load and execute the program named in `args`. Returns the exit status.
pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let Some(source) = args.source.as_ref() else {
        usage_and_exit(program, 1);
    };

    let mut settings = Settings::load();
    args.apply_to(&mut settings);
    let color = settings.color.enabled();

    let code = match Program::load(source, settings.oversized) {
        Ok(code) => code,
        Err(e) => {
            print_error(Some(program), &e.to_string(), color);
            return 1;
        }
    };
    info!(
        path = %source.display(),
        bytes = code.len(),
        max_steps = ?settings.max_steps,
        "running program"
    );

    let mut engine = Engine::new(&code).with_max_steps(settings.max_steps);
    match engine.run_stdio() {
        Ok(()) => 0,
        Err(err) => {
            print_exec_error(Some(program), code.as_bytes(), &err, color);
            1
        }
    }
}

pub fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [OPTIONS] <PROGRAM>   # Run the Brainfuck program stored in PROGRAM

Options:
  --max-steps <N>     Abort after N instructions (0 = unlimited)
  --strict-size       Fail instead of truncating sources larger than 64 KiB
  --color <WHEN>      Color diagnostics: auto, always or never
  --verbose, -v       Log more to stderr (repeat for more detail)
  --help,    -h       Show this help

Notes:
- Input (`,`) reads a single byte from stdin; on EOF the current cell is set to 0.
- Output (`.`) writes the raw cell byte to stdout; nothing else is written there.
- `#` prints the non-empty rows of the tape to stderr.
- Any other character is ignored.
- The tape holds 65536 cells; moving off either end is an error.

Environment:
  BF_CONFIG     Config file (default: bf.toml in the XDG config home)
  BF_MAX_STEPS  Default for --max-steps
  BF_OVERSIZED  `truncate` (default) or `reject`
  BF_COLOR      Default for --color
  BF_LOG        Log filter, e.g. `debug`
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            source: None,
            max_steps: None,
            strict_size: false,
            color: None,
            verbose: 0,
            help: false,
        }
    }

    #[test]
    fn flags_override_settings() {
        let mut settings = Settings { max_steps: Some(5), ..Settings::default() };
        let a = RunArgs {
            max_steps: Some(9),
            strict_size: true,
            color: Some(ColorChoice::Never),
            ..args()
        };
        a.apply_to(&mut settings);
        assert_eq!(settings.max_steps, Some(9));
        assert_eq!(settings.oversized, SizePolicy::Reject);
        assert_eq!(settings.color, ColorChoice::Never);
    }

    #[test]
    fn zero_max_steps_flag_clears_limit() {
        let mut settings = Settings { max_steps: Some(5), ..Settings::default() };
        RunArgs { max_steps: Some(0), ..args() }.apply_to(&mut settings);
        assert_eq!(settings.max_steps, None);
    }

    #[test]
    fn absent_flags_leave_settings_alone() {
        let mut settings = Settings { max_steps: Some(5), ..Settings::default() };
        args().apply_to(&mut settings);
        assert_eq!(settings.max_steps, Some(5));
        assert_eq!(settings.oversized, SizePolicy::Truncate);
    }
}
