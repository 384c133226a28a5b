//! Actions that run external commands built from a template.
//!
//! Templates are split into argv with shell quoting rules and executed
//! directly; no shell is involved. `{name}` placeholders are filled from the
//! invocation (`kind`, `direction`, `amount`, `sign`, `x`, `y`) and the
//! action's bound arguments before splitting.

use anyhow::{anyhow, bail, Context, Result};
use pagedeck::{invocation_fields, Action, Invocation};
use regex::Regex;
use serde_json::{Map, Value};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::OnceLock;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunMode {
    /// Block until the command exits and fail on a non-zero status.
    Wait,
    /// Start the command and return immediately.
    Spawn,
}

pub(crate) fn shell_action(
    name: &str,
    template: &'static str,
    args: Value,
    mode: RunMode,
) -> Action {
    let label = name.to_string();
    Action::call(name, args, move |invocation, args| {
        run_template(&label, template, invocation, args, mode)
    })
}

fn run_template(
    name: &str,
    template: &str,
    invocation: &Invocation,
    args: &Value,
    mode: RunMode,
) -> Result<()> {
    let fields = invocation_fields(invocation, args);
    let line = expand(template, &fields)?;
    let argv =
        shell_words::split(&line).with_context(|| format!("unbalanced quoting in {line:?}"))?;
    let Some((program, rest)) = argv.split_first() else {
        bail!("{name}: empty command");
    };
    tracing::info!(action = name, command = %line, "running command");
    let mut command = Command::new(program);
    command
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    match mode {
        RunMode::Spawn => {
            spawn_reaped(&mut command, program)?;
        }
        RunMode::Wait => {
            let status = command
                .status()
                .with_context(|| format!("failed to run {program}"))?;
            if !status.success() {
                bail!("{program} exited with {status}");
            }
        }
    }
    Ok(())
}

/// Start `command` and wait for it on a background thread so it never lingers as a zombie.
fn spawn_reaped(command: &mut Command, program: &str) -> Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = command
        .spawn()
        .with_context(|| format!("failed to start {program}"))?;
    let program = program.to_string();
    let handle = thread::Builder::new()
        .name(format!("reap-{program}"))
        .spawn(move || match child.wait() {
            Ok(status) => {
                tracing::debug!(program = %program, %status, "spawned command exited");
                Some(status)
            }
            Err(err) => {
                tracing::warn!(program = %program, error = %err, "failed to reap command");
                None
            }
        })
        .context("failed to start reaper thread")?;
    Ok(handle)
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([^{}]*)\}").expect("placeholder regex should compile")
    })
}

/// Replace `{name}` with the named field. `{{` and `}}` are literal braces.
pub(crate) fn expand(template: &str, fields: &Map<String, Value>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in placeholder_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_literal(&mut out, &template[last..whole.start()], template)?;
        last = whole.end();
        match (whole.as_str(), caps.get(1)) {
            ("{{", _) => out.push('{'),
            ("}}", _) => out.push('}'),
            (_, Some(key)) => {
                let key = key.as_str();
                let value = fields
                    .get(key)
                    .ok_or_else(|| anyhow!("no value for {{{key}}} in {template:?}"))?;
                match value {
                    Value::String(text) => out.push_str(text),
                    Value::Null => {}
                    other => out.push_str(&other.to_string()),
                }
            }
            _ => {}
        }
    }
    push_literal(&mut out, &template[last..], template)?;
    Ok(out)
}

fn push_literal(out: &mut String, text: &str, template: &str) -> Result<()> {
    if text.contains(['{', '}']) {
        bail!("unbalanced brace in {template:?}");
    }
    out.push_str(text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagedeck::Direction;
    use serde_json::json;

    #[test]
    fn expands_rotation_into_volume_step() {
        let fields = invocation_fields(
            &Invocation::Rotate {
                direction: Direction::Left,
                amount: 5,
            },
            &json!({"sink": "@DEFAULT_SINK@"}),
        );
        assert_eq!(
            expand("pactl set-sink-volume {sink} {sign}{amount}%", &fields).unwrap(),
            "pactl set-sink-volume @DEFAULT_SINK@ -5%"
        );
    }

    #[test]
    fn doubled_braces_are_literal() {
        let fields = invocation_fields(&Invocation::Trigger, &Value::Null);
        assert_eq!(expand("echo {{{kind}}}", &fields).unwrap(), "echo {trigger}");
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let fields = invocation_fields(&Invocation::Trigger, &Value::Null);
        assert!(expand("echo {amount}", &fields).is_err());
        assert!(expand("echo {kind", &fields).is_err());
    }

    #[test]
    fn missing_program_reports_error_without_panicking() {
        let result = run_template(
            "ghost",
            "pagedeck-no-such-program --flag",
            &Invocation::Trigger,
            &Value::Null,
            RunMode::Wait,
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_template_is_rejected() {
        let result = run_template(
            "blank",
            "   ",
            &Invocation::Trigger,
            &Value::Null,
            RunMode::Spawn,
        );
        assert!(result.is_err());
    }

    #[test]
    fn stray_brace_is_an_error() {
        let fields = invocation_fields(&Invocation::Trigger, &Value::Null);
        assert!(expand("echo }", &fields).is_err());
    }

    #[test]
    fn spawned_command_is_waited_on() {
        let mut command = Command::new("true");
        command.stdin(Stdio::null()).stdout(Stdio::null());
        let handle = spawn_reaped(&mut command, "true").unwrap();
        let status = handle.join().unwrap();
        assert!(status.is_some_and(|status| status.success()));
    }

    #[test]
    fn repeated_spawns_leave_no_unreaped_children() {
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let mut command = Command::new("true");
                spawn_reaped(&mut command, "true").unwrap()
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_some());
        }
    }
}
