// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8PathBuf;
use std::{
    borrow::Cow,
    collections::HashMap,
    ffi::OsString,
    fmt,
    io::{ErrorKind, Write},
    process::{Command, ExitStatus, Stdio},
};

#[derive(Clone, Debug)]
pub struct CargoPspecCli {
    bin: Utf8PathBuf,
    args: Vec<String>,
    envs: HashMap<OsString, OsString>,
    cwd: Option<Utf8PathBuf>,
    stdin: String,
    unchecked: bool,
}

impl CargoPspecCli {
    pub fn new() -> Self {
        Self {
            bin: env!("CARGO_BIN_EXE_cargo-pspec").into(),
            args: vec!["pspec".to_owned()],
            envs: HashMap::new(),
            cwd: None,
            stdin: String::new(),
            unchecked: false,
        }
    }

    pub fn args(&mut self, arg: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(arg.into_iter().map(Into::into));
        self
    }

    pub fn env(&mut self, k: impl Into<OsString>, v: impl Into<OsString>) -> &mut Self {
        self.envs.insert(k.into(), v.into());
        self
    }

    pub fn cwd(&mut self, cwd: impl Into<Utf8PathBuf>) -> &mut Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn stdin(&mut self, stdin: impl Into<String>) -> &mut Self {
        self.stdin = stdin.into();
        self
    }

    pub fn unchecked(&mut self, unchecked: bool) -> &mut Self {
        self.unchecked = unchecked;
        self
    }

    pub fn output(&self) -> CargoPspecOutput {
        let mut command = Command::new(&self.bin);
        command
            .args(&self.args)
            // Keep output stable regardless of the environment the tests run in.
            .env("CARGO_TERM_COLOR", "never")
            .env_remove("PSPEC_VERBOSE")
            .env_remove("PSPEC_CONFIG_FILE")
            .env_remove("PSPEC_LOG")
            .envs(&self.envs)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let mut child = command.spawn().expect("failed to execute");
        let mut stdin = child.stdin.take().expect("stdin is piped");
        // The process may exit before reading its input, e.g. on usage errors.
        if let Err(err) = stdin.write_all(self.stdin.as_bytes()) {
            assert_eq!(err.kind(), ErrorKind::BrokenPipe, "error writing stdin");
        }
        drop(stdin);
        let output = child.wait_with_output().expect("process exited");

        let ret = CargoPspecOutput {
            command,
            exit_status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        };

        if !self.unchecked && !output.status.success() {
            panic!("command failed:\n\n{ret}");
        }

        ret
    }
}

pub struct CargoPspecOutput {
    pub command: Command,
    pub exit_status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CargoPspecOutput {
    pub fn stdout_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_status.code()
    }
}

impl fmt::Display for CargoPspecOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command: {:?}\nexit code: {:?}\n\
                   --- stdout ---\n{}\n\n--- stderr ---\n{}\n\n",
            self.command,
            self.exit_status.code(),
            String::from_utf8_lossy(&self.stdout),
            String::from_utf8_lossy(&self.stderr)
        )
    }
}

// Make Debug output the same as Display output, so `.expect()` is nicer.
impl fmt::Debug for CargoPspecOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
