//! Out-of-process core host: spawn + stdio line protocol.
//!
//! - the core location names the program to run (optionally through a runner
//!   such as `sh` or `node`)
//! - load waits for `{"op":"ready"}` and checks the protocol version
//! - every request gets exactly one reply, read synchronously
//! - the child is killed when the handle goes away

use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use crate::kernel::services::ports::{
    CoreError, CoreInstance, CoreLoader, CoreModule, CoreStart, LoadError, LoadFuture,
};
use crate::kernel::wire::{
    decode_line, encode_line, CoreReply, CoreRequest, MAX_LINE_BYTES, PROTOCOL_VERSION,
};
use crate::kernel::{Effect, Geometry, Message};

#[derive(Debug, Clone, Default)]
pub struct ProcessCoreLoader {
    runner: Vec<String>,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl ProcessCoreLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the core location as an argument of `runner` instead of executing it.
    pub fn with_runner(mut self, runner: Vec<String>) -> Self {
        self.runner = runner;
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    fn command(&self, location: &str) -> Command {
        let mut cmd = match self.runner.split_first() {
            Some((program, runner_args)) => {
                let mut cmd = Command::new(program);
                cmd.args(runner_args).arg(location);
                cmd
            }
            None => Command::new(location),
        };
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl CoreLoader for ProcessCoreLoader {
    fn load<'a>(&'a self, location: &'a str) -> LoadFuture<'a> {
        Box::pin(async move {
            let metadata = tokio::fs::metadata(location)
                .await
                .map_err(|source| LoadError::Unreachable {
                    location: location.to_string(),
                    source,
                })?;
            if !metadata.is_file() {
                return Err(LoadError::Invalid {
                    location: location.to_string(),
                    reason: "not a file".to_string(),
                });
            }

            let mut child = self
                .command(location)
                .spawn()
                .map_err(|source| LoadError::Spawn {
                    location: location.to_string(),
                    source,
                })?;
            forward_stderr(location, &mut child);
            let pipes = take_pipes(&mut child);
            let guard = ChildGuard(child);
            let (stdin, stdout) = pipes.map_err(LoadError::Handshake)?;

            // The guard stays on this side: if the load is abandoned (timeout),
            // dropping it kills the child and unblocks the reader.
            let (stdout, reply) = tokio::task::spawn_blocking(move || {
                let mut stdout = stdout;
                let reply = read_reply(&mut stdout);
                (stdout, reply)
            })
            .await
            .map_err(|e| LoadError::Handshake(e.to_string()))?;

            match reply.map_err(|e| LoadError::Handshake(e.to_string()))? {
                CoreReply::Ready { protocol } if protocol == PROTOCOL_VERSION => {}
                CoreReply::Ready { protocol } => {
                    return Err(LoadError::ProtocolMismatch {
                        expected: PROTOCOL_VERSION,
                        found: protocol,
                    });
                }
                other => {
                    return Err(LoadError::Handshake(format!(
                        "expected ready, got {other:?}"
                    )));
                }
            }

            tracing::info!(location, "core process ready");
            let channel = CoreChannel {
                stdin,
                stdout,
                _child: guard,
            };
            Ok(Box::new(ProcessCoreModule { channel }) as Box<dyn CoreModule>)
        })
    }
}

struct ProcessCoreModule {
    channel: CoreChannel,
}

impl CoreModule for ProcessCoreModule {
    fn initialize(self: Box<Self>, geometry: Geometry) -> Result<CoreStart, CoreError> {
        let mut channel = self.channel;
        let effects = channel.request(&CoreRequest::Initialize { geometry })?;
        Ok(CoreStart::new(Box::new(ProcessCoreInstance { channel })).with_effects(effects))
    }
}

struct ProcessCoreInstance {
    channel: CoreChannel,
}

impl CoreInstance for ProcessCoreInstance {
    fn update(&mut self, message: &Message) -> Result<Vec<Effect>, CoreError> {
        self.channel.request(&CoreRequest::Send {
            message: message.clone(),
        })
    }
}

// Field order matters: stdin closes before the guard reaps the child.
struct CoreChannel {
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    _child: ChildGuard,
}

impl CoreChannel {
    fn request(&mut self, request: &CoreRequest) -> Result<Vec<Effect>, CoreError> {
        let bytes = encode_line(request)?;
        self.stdin.write_all(&bytes)?;
        self.stdin.flush()?;

        match read_reply(&mut self.stdout)? {
            CoreReply::Effects { effects } => Ok(effects),
            CoreReply::Error { message } => Err(CoreError::Rejected(message)),
            CoreReply::Ready { .. } => Err(CoreError::Rejected(
                "unexpected ready frame".to_string(),
            )),
        }
    }
}

struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(None) = self.0.try_wait() {
            let _ = self.0.kill();
        }
        let _ = self.0.wait();
    }
}

fn take_pipes(child: &mut Child) -> Result<(ChildStdin, BufReader<ChildStdout>), String> {
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| "core stdin unavailable".to_string())?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| "core stdout unavailable".to_string())?;
    Ok((stdin, BufReader::new(stdout)))
}

fn forward_stderr(location: &str, child: &mut Child) {
    let Some(stderr) = child.stderr.take() else {
        return;
    };
    let location = location.to_string();
    let spawned = std::thread::Builder::new()
        .name("htom-core-stderr".to_string())
        .spawn(move || {
            for line in BufReader::new(stderr).lines().map_while(Result::ok) {
                tracing::debug!(core = %location, "{line}");
            }
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "core stderr is not forwarded");
    }
}

/// Frames may be up to `MAX_LINE_BYTES` plus the newline. An oversized frame
/// is discarded through its newline so the next read starts on a frame boundary.
fn read_reply(reader: &mut impl BufRead) -> Result<CoreReply, CoreError> {
    let mut line = Vec::new();
    let limit = MAX_LINE_BYTES as u64 + 1;
    let n = reader.by_ref().take(limit).read_until(b'\n', &mut line)?;
    if n == 0 {
        return Err(CoreError::Closed);
    }
    if n as u64 == limit && line.last() != Some(&b'\n') {
        reader.skip_until(b'\n')?;
        return Err(CoreError::Oversized {
            limit: MAX_LINE_BYTES,
        });
    }
    let line = std::str::from_utf8(&line)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(decode_line(line)?)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/process_core.rs"]
mod tests;
