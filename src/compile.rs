use std::{
  fs, io,
  path::{Path, PathBuf},
  process::{Command, ExitStatus},
  time::{Duration, Instant},
};

use tempfile::TempDir;

use crate::ext::CommandExt;

pub const SOURCE_NAME: &str = "test.c";
pub const BINARY_NAME: &str = "test";

/// Quadratic sort over a million `rand()` values. Only its compile time is
/// measured; the program is never executed.
pub const C_SOURCE: &str = r#"
#include <stdio.h>
#include <stdlib.h>

int main() {
    int n = 1000000;
    int* arr = (int*)malloc(n * sizeof(int));
    for (int i = 0; i < n; i++) {
        arr[i] = rand();
    }
    for (int i = 0; i < n; i++) {
        for (int j = i + 1; j < n; j++) {
            if (arr[i] > arr[j]) {
                int temp = arr[i];
                arr[i] = arr[j];
                arr[j] = temp;
            }
        }
    }
    printf("%d\n", arr[n/2]);
    free(arr);
    return 0;
}
"#;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
  #[error("failed to {action}: {source}")]
  Io {
    action: &'static str,
    #[source]
    source: io::Error,
  },
  #[error("failed to spawn compiler: {0}")]
  Spawn(#[source] io::Error),
  #[error("compiler exited with non-zero status {0}")]
  Status(ExitStatus),
  #[error("compiler did not finish within {0:?}")]
  Timeout(Duration),
}

/// Something that can turn C source into a binary and report how long that
/// took.
pub trait Compiler {
  fn compile(&self, source: &str) -> Result<Duration, CompileError>;
}

/// Where the probe writes its source and binary.
#[derive(Clone, Debug)]
pub enum WorkDir {
  /// An existing directory. Only `test.c` and `test` are cleaned up.
  Path(PathBuf),
  /// A fresh temporary directory per compile, removed with everything in it.
  Isolated,
}

/// Invokes a native compiler as `<compiler> -O2 test.c -o test`.
#[derive(Clone, Debug)]
pub struct Gcc {
  compiler: PathBuf,
  work_dir: WorkDir,
  timeout: Option<Duration>,
}

impl Gcc {
  pub fn new(compiler: PathBuf, work_dir: WorkDir, timeout: Option<Duration>) -> Self {
    Self {
      compiler,
      work_dir,
      timeout,
    }
  }

  fn compile_in(&self, dir: &Path, source: &str) -> Result<Duration, CompileError> {
    let source_path = dir.join(SOURCE_NAME);
    let binary_path = dir.join(BINARY_NAME);

    fs::write(&source_path, source).map_err(|source| CompileError::Io {
      action: "write source",
      source,
    })?;

    eprintln!("compiling {SOURCE_NAME} with {:?} in {dir:?}", self.compiler);

    let start = Instant::now();
    let result = Command::new(&self.compiler)
      .current_dir(dir)
      .args(["-O2", SOURCE_NAME, "-o", BINARY_NAME])
      .check_success_timeout(self.timeout);
    let elapsed = start.elapsed();

    // cleanup runs even when the compiler failed; a compile error wins over a
    // cleanup error
    let cleanup = remove_if_exists(&source_path, "remove source")
      .and_then(|()| remove_if_exists(&binary_path, "remove binary"));

    result?;
    cleanup?;

    Ok(elapsed)
  }
}

impl Compiler for Gcc {
  fn compile(&self, source: &str) -> Result<Duration, CompileError> {
    match &self.work_dir {
      WorkDir::Path(dir) => self.compile_in(dir, source),
      WorkDir::Isolated => {
        let tempdir = TempDir::with_prefix("cpu-bench-").map_err(|source| CompileError::Io {
          action: "create tempdir",
          source,
        })?;

        let elapsed = self.compile_in(tempdir.path(), source)?;

        tempdir.close().map_err(|source| CompileError::Io {
          action: "remove tempdir",
          source,
        })?;

        Ok(elapsed)
      }
    }
  }
}

fn remove_if_exists(path: &Path, action: &'static str) -> Result<(), CompileError> {
  match fs::remove_file(path) {
    Ok(()) => Ok(()),
    Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(source) => Err(CompileError::Io { action, source }),
  }
}
