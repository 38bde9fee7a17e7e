use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::ToolRunner;
use crate::error::ModuleListError;

/// Runs the tool as a child process.
#[derive(Debug, Clone)]
pub struct ProcessTool {
    name: String,
    path: PathBuf,
}

impl ProcessTool {
    pub fn new(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn launch_error(&self, source: io::Error) -> ModuleListError {
        ModuleListError::Launch {
            tool: self.name.clone(),
            source,
        }
    }
}

impl ToolRunner for ProcessTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(
        &self,
        out: &mut (dyn Write + Send),
        err: &mut (dyn Write + Send),
        args: &[String],
    ) -> Result<i32, ModuleListError> {
        let mut child = Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.launch_error(e))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        // Both pipes are drained at once so a full stderr buffer cannot stall
        // a child that is still writing stdout.
        let copied = std::thread::scope(|s| {
            let out_pump = s.spawn(move || pump(stdout, out));
            let err_result = pump(stderr, err);
            let out_result = match out_pump.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            };
            out_result.and(err_result)
        });

        let status = child.wait().map_err(|e| self.launch_error(e))?;
        copied.map_err(|e| self.launch_error(e))?;

        Ok(status.code().unwrap_or(-1))
    }
}

fn pump<R: Read>(pipe: Option<R>, sink: &mut (dyn Write + Send)) -> io::Result<()> {
    if let Some(mut pipe) = pipe {
        io::copy(&mut pipe, sink)?;
    }
    sink.flush()
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use super::*;
    use tempfile::TempDir;

    fn script(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("fake-jdeps");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_captures_both_streams_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ProcessTool::new(
            "jdeps",
            script(&dir, "echo \"$1 $2\"\necho oops >&2\nexit 3"),
        );

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = tool
            .run(&mut out, &mut err, &args(&["--print-module-deps", "/app.jar"]))
            .unwrap();

        assert_eq!(code, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "--print-module-deps /app.jar\n");
        assert_eq!(String::from_utf8(err).unwrap(), "oops\n");
    }

    #[test]
    fn test_arguments_with_spaces_stay_single_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ProcessTool::new("jdeps", script(&dir, "echo $#"));

        let mut out = Vec::new();
        let mut err = Vec::new();
        tool.run(&mut out, &mut err, &args(&["--class-path", "/my libs/a.jar"]))
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap().trim(), "2");
    }

    #[test]
    fn test_large_stderr_does_not_block() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ProcessTool::new(
            "jdeps",
            script(
                &dir,
                "i=0\nwhile [ $i -lt 5000 ]; do echo \"warning line $i\" >&2; i=$((i+1)); done\necho java.base",
            ),
        );

        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = tool.run(&mut out, &mut err, &[]).unwrap();

        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "java.base\n");
        assert_eq!(String::from_utf8(err).unwrap().lines().count(), 5000);
    }

    #[test]
    fn test_missing_binary_is_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ProcessTool::new("jdeps", dir.path().join("absent"));

        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = tool.run(&mut out, &mut err, &[]);
        assert!(matches!(result, Err(ModuleListError::Launch { .. })));
    }
}
