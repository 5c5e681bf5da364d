//! # Dynamical oracle
//!
//! Pruning needs an answer to one question about a candidate model: does it still
//! oscillate? The answer comes from outside (a simulator) as a [`DampingVerdict`]:
//! `damped` means the oscillation decays to a steady state, `to_infinity` means some
//! species grows without bound. A model "still works" only when neither is reported.
//!
//! Implementations:
//! - `CommandOracle` runs an external program, passes the model text on stdin and reads
//!   a JSON verdict `{"damped": false, "toInfinity": false}` from stdout
//! - `ReplayOracle` answers from a recorded list of verdicts, in order
use super::errors::NetworkError;
use enum_dispatch::enum_dispatch;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DampingVerdict {
    pub damped: bool,
    #[serde(rename = "toInfinity")]
    pub to_infinity: bool,
}

impl DampingVerdict {
    pub fn new(damped: bool, to_infinity: bool) -> Self {
        Self {
            damped,
            to_infinity,
        }
    }
    pub fn sustains_oscillation(&self) -> bool {
        !self.damped && !self.to_infinity
    }
}

#[enum_dispatch]
pub trait DampingOracle {
    /// one simulation of the model text; the text itself is not modified
    fn is_damped(&mut self, model_text: &str) -> Result<DampingVerdict, NetworkError>;
}

#[enum_dispatch(DampingOracle)]
#[derive(Debug, Clone)]
pub enum Oracle {
    Command(CommandOracle),
    Replay(ReplayOracle),
}

/// external simulator started once per question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOracle {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandOracle {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
        }
    }
}

impl DampingOracle for CommandOracle {
    fn is_damped(&mut self, model_text: &str) -> Result<DampingVerdict, NetworkError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| NetworkError::Oracle(format!("failed to start '{}': {}", self.program, e)))?;
        let failed = |e: io::Error| NetworkError::Oracle(format!("'{}': {}", self.program, e));
        let stdin = child.stdin.take();
        // stdout and stderr are drained while the model is still being written
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(model_text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (written, output)
        });
        let output = output.map_err(failed)?;
        if !output.status.success() {
            return Err(NetworkError::Oracle(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        // a simulator may answer without reading the whole model
        match written {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(failed(e)),
            _ => {}
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let verdict: DampingVerdict = serde_json::from_str(stdout.trim()).map_err(|e| {
            NetworkError::Oracle(format!("unreadable verdict '{}': {}", stdout.trim(), e))
        })?;
        debug!("oracle verdict {:?}", verdict);
        Ok(verdict)
    }
}

/// answers from a fixed sequence of verdicts, e.g. recorded from an earlier run
#[derive(Debug, Clone, Default)]
pub struct ReplayOracle {
    verdicts: VecDeque<DampingVerdict>,
    pub calls: usize,
}

impl ReplayOracle {
    pub fn new(verdicts: Vec<DampingVerdict>) -> Self {
        Self {
            verdicts: verdicts.into(),
            calls: 0,
        }
    }
    /// JSON array of verdicts
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, NetworkError> {
        let content = fs::read_to_string(path)?;
        let verdicts: Vec<DampingVerdict> = serde_json::from_str(&content)?;
        Ok(Self::new(verdicts))
    }
    pub fn remaining(&self) -> usize {
        self.verdicts.len()
    }
}

impl DampingOracle for ReplayOracle {
    fn is_damped(&mut self, _model_text: &str) -> Result<DampingVerdict, NetworkError> {
        self.calls += 1;
        self.verdicts.pop_front().ok_or_else(|| {
            NetworkError::Oracle(format!("no recorded verdict for call {}", self.calls))
        })
    }
}
