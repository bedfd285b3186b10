//! 外部コマンド実行 (git / zenn)

use std::path::Path;
use std::process::Command;

/// 外部コマンドの実行結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// ユーザーに見せるエラーテキスト (stderr が空なら stdout)
    pub fn error_text(&self) -> String {
        let stderr = self.stderr.trim();
        let stdout = self.stdout.trim();
        let text = if stderr.is_empty() { stdout } else { stderr };

        if text.is_empty() {
            match self.code {
                Some(code) => format!("終了コード {}", code),
                None => "シグナルにより終了しました".to_string(),
            }
        } else {
            text.to_string()
        }
    }
}

/// 外部コマンドを実行する機能
///
/// 実行ファイルが見つからない場合は `ErrorKind::NotFound` の I/O エラーを返す。
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> std::io::Result<CommandOutput>;
}

/// `std::process::Command` による実装
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> std::io::Result<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args).current_dir(cwd);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(0x08000000); // CREATE_NO_WINDOW
        }

        tracing::debug!("実行: {} {:?} (cwd: {:?})", program, args, cwd);
        let output = command.output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Windows では `zenn.cmd` のようなバッチを解決するため `cmd /C` 経由にする
pub fn shell_invocation(program: &str, args: &[String]) -> (String, Vec<String>) {
    if cfg!(windows) {
        let mut wrapped = vec!["/C".to_string(), program.to_string()];
        wrapped.extend(args.iter().cloned());
        ("cmd".to_string(), wrapped)
    } else {
        (program.to_string(), args.to_vec())
    }
}

/// 表示用のコマンドライン文字列
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_prefers_stderr() {
        let output = CommandOutput {
            success: false,
            code: Some(1),
            stdout: "nothing to commit\n".to_string(),
            stderr: "fatal: rejected\n".to_string(),
        };
        assert_eq!(output.error_text(), "fatal: rejected");
    }

    #[test]
    fn error_text_falls_back_to_stdout_then_exit_code() {
        let output = CommandOutput {
            success: false,
            code: Some(1),
            stdout: "nothing to commit, working tree clean\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.error_text(), "nothing to commit, working tree clean");

        let output = CommandOutput {
            success: false,
            code: Some(128),
            ..Default::default()
        };
        assert_eq!(output.error_text(), "終了コード 128");
    }

    #[test]
    fn displays_command_line() {
        let args = vec!["commit".to_string(), "-m".to_string(), "msg".to_string()];
        assert_eq!(display_command("git", &args), "git commit -m msg");
    }

    #[cfg(not(windows))]
    #[test]
    fn system_runner_reports_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemCommandRunner
            .run("apostle-no-such-program", &[], dir.path())
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[cfg(not(windows))]
    #[test]
    fn system_runner_captures_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let args = vec!["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()];
        let output = SystemCommandRunner.run("sh", &args, dir.path()).unwrap();

        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }
}
