use super::ToolRunner;
use crate::error::ModuleListError;
use crate::models::Version;

/// Ask the tool for its version with `--version`.
///
/// Stdout is captured and parsed, stderr goes straight to the process's own
/// stderr. The exit status of this call is not consulted: a tool that cannot
/// answer `--version` also prints nothing parseable.
pub fn detect<T: ToolRunner + ?Sized>(tool: &T) -> Result<Version, ModuleListError> {
    let mut captured: Vec<u8> = Vec::new();
    let mut stderr = std::io::stderr();
    tool.run(&mut captured, &mut stderr, &["--version".to_string()])?;

    let text = String::from_utf8_lossy(&captured);
    let trimmed = text.trim();
    Version::parse(trimmed).map_err(|source| ModuleListError::VersionUnparseable {
        tool: tool.name().to_string(),
        output: trimmed.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    struct Answers(&'static str);

    impl ToolRunner for Answers {
        fn name(&self) -> &str {
            "jdeps"
        }

        fn run(
            &self,
            out: &mut (dyn Write + Send),
            _err: &mut (dyn Write + Send),
            args: &[String],
        ) -> Result<i32, ModuleListError> {
            assert_eq!(args, ["--version"]);
            out.write_all(self.0.as_bytes()).unwrap();
            Ok(0)
        }
    }

    #[test]
    fn test_detect_trims_output() {
        let version = detect(&Answers("  17.0.2\n")).unwrap();
        assert_eq!(version.feature(), 17);
        assert_eq!(version.to_string(), "17.0.2");
    }

    #[test]
    fn test_detect_rejects_garbage() {
        let err = detect(&Answers("Usage: jdeps <options>\n")).unwrap_err();
        match err {
            ModuleListError::VersionUnparseable { output, .. } => {
                assert_eq!(output, "Usage: jdeps <options>")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_detect_rejects_empty_output() {
        assert!(matches!(
            detect(&Answers("")),
            Err(ModuleListError::VersionUnparseable { .. })
        ));
    }
}
