//! GitHub Actions host adapter
//!
//! Inputs arrive as `INPUT_<NAME>` environment variables (name upper-cased, spaces
//! replaced by `_`). Failures and masks are emitted as workflow commands on stdout.

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use mdsbom_core::host::{ActionHost, InputSource};

/// Environment variable holding the named input.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Escape a workflow command payload.
pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Runner-backed [`ActionHost`].
pub struct GithubHost<W: Write + Send> {
    out: Mutex<W>,
    failed: AtomicBool,
}

impl GithubHost<std::io::Stdout> {
    /// Host writing workflow commands to stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> GithubHost<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            failed: AtomicBool::new(false),
        }
    }

    /// Whether `set_failed` has been called.
    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn line(&self, line: &str) {
        // A closed job log must not abort the action
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{line}");
            let _ = out.flush();
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> InputSource for GithubHost<W> {
    fn raw_input(&self, name: &str) -> Option<String> {
        std::env::var(input_env_name(name)).ok()
    }
}

impl<W: Write + Send> ActionHost for GithubHost<W> {
    fn info(&self, message: &str) {
        self.line(message);
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.line(&format!("::error::{}", escape_data(message)));
    }

    fn mask(&self, secret: &str) {
        self.line(&format!("::add-mask::{}", escape_data(secret)));
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn output(host: GithubHost<Vec<u8>>) -> String {
        String::from_utf8(host.into_inner()).expect("valid UTF-8")
    }

    #[test]
    fn test_input_env_name() {
        assert_eq!(input_env_name("mayhem-token"), "INPUT_MAYHEM-TOKEN");
        assert_eq!(input_env_name("fail on defects"), "INPUT_FAIL_ON_DEFECTS");
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
        assert_eq!(escape_data("plain"), "plain");
    }

    #[test]
    fn test_set_failed_emits_error_command() {
        let host = GithubHost::new(Vec::new());
        assert!(!host.has_failed());

        host.set_failed("line one\nline two");

        assert!(host.has_failed());
        assert_eq!(output(host), "::error::line one%0Aline two\n");
    }

    #[test]
    fn test_info_and_mask() {
        let host = GithubHost::new(Vec::new());
        host.mask("tok123");
        host.info("mdsbom action failed with: boom");

        assert!(!host.has_failed());
        assert_eq!(
            output(host),
            "::add-mask::tok123\nmdsbom action failed with: boom\n"
        );
    }

    #[test]
    #[serial]
    fn test_reads_inputs_from_environment() {
        // SAFETY: serialised with other environment tests
        unsafe { std::env::set_var("INPUT_WORKSPACE", "  ACME ") };
        let host = GithubHost::new(Vec::new());
        assert_eq!(host.raw_input("workspace").as_deref(), Some("  ACME "));
        assert_eq!(host.input("workspace").as_deref(), Some("ACME"));
        unsafe { std::env::remove_var("INPUT_WORKSPACE") };
    }

    #[test]
    #[serial]
    fn test_missing_input_is_none() {
        unsafe { std::env::remove_var("INPUT_IMAGE") };
        let host = GithubHost::new(Vec::new());
        assert_eq!(host.input("image"), None);
    }
}
