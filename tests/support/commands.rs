//! Command helper methods for Test.

use super::{Test, PASSWORD};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a sigkey command with an isolated environment.
    ///
    /// Every variable the locator may consult points into the temp home,
    /// sigkey's own overrides are cleared and colors are off.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("sigkey").expect("failed to find sigkey binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("APPDATA", self.home.path().join("AppData").join("Roaming"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SIGKEY_CONFIG");
        cmd.env_remove("SIGKEY_PASSWORD_FILE");
        cmd.env_remove("SIGKEY_LOG");
        cmd.current_dir(self.home.path());
        cmd
    }

    /// A command decrypting with the fixture password (macOS parameters).
    pub fn unlocked(&self) -> Command {
        let password = self.write_password(PASSWORD);
        let mut cmd = self.cmd();
        cmd.arg("--password-file")
            .arg(password)
            .args(["--iterations", "1003"]);
        cmd
    }

    /// Run `unlocked()` with extra arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.unlocked()
            .args(args)
            .output()
            .expect("failed to run sigkey")
    }
}
