use std::{
  io,
  process::{Child, Command, ExitStatus},
  time::Duration,
};

use wait_timeout::ChildExt as WaitExt;

use crate::compile::CompileError;

#[extend::ext]
pub impl ExitStatus {
  fn check_success(&self) -> Result<(), CompileError> {
    if !self.success() {
      return Err(CompileError::Status(*self));
    }

    Ok(())
  }
}

#[extend::ext]
pub impl Child {
  /// Waits for the child to exit. With a timeout, the child is killed and
  /// reaped once it elapses, and `Ok(None)` is returned.
  fn wait_or_kill(&mut self, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
      return self.wait().map(Some);
    };

    if let Some(status) = self.wait_timeout(timeout)? {
      return Ok(Some(status));
    }

    self.kill()?;
    self.wait()?;

    Ok(None)
  }
}

#[extend::ext]
pub impl Command {
  /// Spawns the command and blocks until it exits successfully.
  fn check_success_timeout(&mut self, timeout: Option<Duration>) -> Result<(), CompileError> {
    let mut child = self.spawn().map_err(CompileError::Spawn)?;

    let status = child
      .wait_or_kill(timeout)
      .map_err(|source| CompileError::Io { action: "wait for compiler", source })?;

    match status {
      Some(status) => status.check_success(),
      None => Err(CompileError::Timeout(timeout.unwrap_or_default())),
    }
  }
}
