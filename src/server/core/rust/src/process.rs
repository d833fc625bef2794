/* src/server/core/rust/src/process.rs */

// Bounded subprocess execution shared by runtime probing and SSR invocation.

use std::fmt;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

#[derive(Debug)]
pub(crate) struct Captured {
  pub status: ExitStatus,
  pub stdout: String,
  pub stderr: String,
}

#[derive(Debug)]
pub(crate) enum RunError {
  Spawn(std::io::Error),
  Io(std::io::Error),
  TimedOut(Duration),
}

impl fmt::Display for RunError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Spawn(e) => write!(f, "failed to start process: {e}"),
      Self::Io(e) => write!(f, "failed to read process output: {e}"),
      Self::TimedOut(limit) => write!(f, "process timed out after {} seconds", limit.as_secs()),
    }
  }
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
  let mut buf = Vec::new();
  if let Some(mut pipe) = pipe {
    pipe.read_to_end(&mut buf).await?;
  }
  Ok(buf)
}

/// Kill the child and everything it started, then reap the child.
/// `group` is the pid taken at spawn; the child may already be reaped while
/// its descendants still hold the output pipes.
async fn kill_tree(child: &mut Child, group: Option<u32>) {
  #[cfg(unix)]
  if let Some(pid) = group.and_then(|pid| i32::try_from(pid).ok()) {
    // SAFETY: plain syscall; the child leads its own group, so -pid targets only its tree.
    unsafe {
      libc::kill(-pid, libc::SIGKILL);
    }
  }
  let _ = child.kill().await;
}

/// Run `cmd` to completion, capturing stdout and stderr.
///
/// On unix the child leads a fresh process group. On timeout the whole group
/// is killed and the child reaped before returning, so nothing the child
/// spawned outlives the deadline.
pub(crate) async fn run_with_timeout(
  mut cmd: Command,
  timeout: Duration,
) -> Result<Captured, RunError> {
  cmd.stdin(Stdio::null());
  cmd.stdout(Stdio::piped());
  cmd.stderr(Stdio::piped());
  cmd.kill_on_drop(true);
  #[cfg(unix)]
  cmd.process_group(0);

  let mut child = cmd.spawn().map_err(RunError::Spawn)?;
  let group = child.id();
  let stdout = child.stdout.take();
  let stderr = child.stderr.take();

  let result = tokio::time::timeout(timeout, async {
    let (out, err, status) = tokio::join!(read_pipe(stdout), read_pipe(stderr), child.wait());
    Ok::<_, std::io::Error>((out?, err?, status?))
  })
  .await;

  match result {
    Ok(Ok((out, err, status))) => Ok(Captured {
      status,
      stdout: String::from_utf8_lossy(&out).into_owned(),
      stderr: String::from_utf8_lossy(&err).into_owned(),
    }),
    Ok(Err(e)) => {
      kill_tree(&mut child, group).await;
      Err(RunError::Io(e))
    }
    Err(_) => {
      kill_tree(&mut child, group).await;
      Err(RunError::TimedOut(timeout))
    }
  }
}

#[cfg(all(test, unix))]
mod tests {
  use super::*;

  fn sh(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", script]);
    cmd
  }

  #[tokio::test]
  async fn captures_both_streams() {
    let out = run_with_timeout(sh("echo out; echo err >&2"), Duration::from_secs(5)).await.unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, "out\n");
    assert_eq!(out.stderr, "err\n");
  }

  #[tokio::test]
  async fn reports_non_zero_exit() {
    let out = run_with_timeout(sh("exit 3"), Duration::from_secs(5)).await.unwrap();
    assert_eq!(out.status.code(), Some(3));
  }

  #[tokio::test]
  async fn missing_binary_is_spawn_error() {
    let cmd = Command::new("/definitely/not/a/binary");
    let err = run_with_timeout(cmd, Duration::from_secs(5)).await.unwrap_err();
    assert!(matches!(err, RunError::Spawn(_)));
  }

  #[tokio::test]
  async fn timeout_kills_child() {
    let started = std::time::Instant::now();
    let err = run_with_timeout(sh("exec sleep 10"), Duration::from_millis(200)).await.unwrap_err();
    assert!(matches!(err, RunError::TimedOut(_)));
    assert!(started.elapsed() < Duration::from_secs(5));
  }

  /// Live (non-zombie) process check via procfs.
  #[cfg(target_os = "linux")]
  fn running(pid: &str) -> bool {
    std::fs::read_to_string(format!("/proc/{pid}/stat"))
      .map(|stat| stat.rsplit(')').next().is_some_and(|rest| !rest.trim_start().starts_with('Z')))
      .unwrap_or(false)
  }

  #[cfg(target_os = "linux")]
  async fn assert_descendant_killed(script: &str) {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = sh(script);
    cmd.current_dir(dir.path());
    let err = run_with_timeout(cmd, Duration::from_millis(500)).await.unwrap_err();
    assert!(matches!(err, RunError::TimedOut(_)));

    let pid = std::fs::read_to_string(dir.path().join("bgpid")).unwrap();
    let pid = pid.trim();
    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while running(pid) && std::time::Instant::now() < deadline {
      tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(!running(pid), "background process {pid} survived the timeout");
  }

  #[cfg(target_os = "linux")]
  #[tokio::test]
  async fn timeout_kills_background_descendants() {
    assert_descendant_killed("sleep 30 & echo $! > bgpid; exec sleep 10").await;
  }

  #[cfg(target_os = "linux")]
  #[tokio::test]
  async fn timeout_kills_descendants_of_exited_child() {
    // The child exits at once; the background sleep keeps stdout open.
    assert_descendant_killed("sleep 30 & echo $! > bgpid; exit 0").await;
  }
}
