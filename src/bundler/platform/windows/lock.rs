//! Launching the frozen executable so the OS locks the files it loads.
//!
//! There is no readiness signal from the application. After the fixed delay
//! the holder is only checked for liveness: if it already exited, nothing
//! is locked and trimming would gut the tree. A holder that is alive but has
//! not finished loading its libraries is not detectable.

use crate::bundler::error::{Error, Result};
use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};
use tokio::process::{Child, Command};

/// `DETACHED_PROCESS`: the holder gets no console of its own.
#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;

/// A running process holding locks on the files it loaded.
#[derive(Debug)]
pub struct LockHolder {
    child: Child,
    executable: PathBuf,
}

impl LockHolder {
    /// OS process id, if the process has not been reaped.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Kills the holder. The pipeline itself leaves it running.
    pub async fn kill(mut self) -> Result<()> {
        self.child.kill().await?;
        Ok(())
    }
}

/// Starts `executable` detached, waits `delay`, and checks it is still alive.
pub async fn launch_lock_holder(executable: &Path, delay: Duration) -> Result<LockHolder> {
    let mut command = Command::new(executable);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    if let Some(dir) = executable.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        command.current_dir(dir);
    }
    #[cfg(windows)]
    command.creation_flags(DETACHED_PROCESS);

    let mut child = command.spawn().map_err(|error| Error::CommandFailed {
        command: executable.display().to_string(),
        error,
    })?;
    log::info!(
        "Launched {} (pid {:?}), waiting {:?} for it to load its libraries",
        executable.display(),
        child.id(),
        delay
    );

    tokio::time::sleep(delay).await;

    if let Some(status) = child.try_wait()? {
        return Err(Error::LockHolderExited {
            executable: executable.to_path_buf(),
            status,
        });
    }

    Ok(LockHolder {
        child,
        executable: executable.to_path_buf(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn running_holder_is_returned() {
        // `yes` with stdout discarded runs until killed.
        let yes = which::which("yes").unwrap();
        let holder = launch_lock_holder(&yes, Duration::from_millis(100))
            .await
            .unwrap();
        assert!(holder.id().is_some());
        assert_eq!(holder.executable(), yes.as_path());
        holder.kill().await.unwrap();
    }

    #[tokio::test]
    async fn early_exit_is_an_error() {
        let exits = which::which("true").unwrap();
        let err = launch_lock_holder(&exits, Duration::from_millis(500))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::LockHolderExited { .. }));
    }

    #[tokio::test]
    async fn missing_executable_fails_to_spawn() {
        let temp = tempfile::tempdir().unwrap();
        let err = launch_lock_holder(&temp.path().join("missing.exe"), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
