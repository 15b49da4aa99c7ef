use askama::Template;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;
use winguest_core::{
    CommandOutput, Communicator, CommunicatorConfig, OutputLine, Result, WinGuestError, WqlResult,
};

use crate::wql::parse_wql_output;

#[derive(Template)]
#[template(path = "wql_query.ps1", escape = "none")]
struct WqlQueryTemplate<'a> {
    query: &'a str,
}

/// Runs PowerShell on the guest through the OpenSSH client.
///
/// Each command is fed to `powershell -Command -` on stdin, so multi-line
/// scripts need no quoting.
pub struct SshCommunicator {
    machine_name: String,
    ssh_binary: PathBuf,
    host: String,
    port: u16,
    user: String,
    key_path: Option<PathBuf>,
}

impl SshCommunicator {
    pub fn new(machine_name: String, config: &CommunicatorConfig) -> Result<Self> {
        let ssh_binary = which::which("ssh").map_err(|e| WinGuestError::CommandFailed {
            machine: machine_name.clone(),
            message: format!("ssh client not found: {e}"),
        })?;

        Ok(Self {
            machine_name,
            ssh_binary,
            host: config.host.clone(),
            port: config.port,
            user: config.user.clone(),
            key_path: config.key_path.clone(),
        })
    }

    fn ssh_command(&self) -> Command {
        let mut ssh_cmd = Command::new(&self.ssh_binary);
        ssh_cmd
            .arg("-o")
            .arg("StrictHostKeyChecking=no")
            .arg("-o")
            .arg("UserKnownHostsFile=/dev/null")
            .arg("-o")
            .arg("LogLevel=ERROR")
            .arg("-p")
            .arg(self.port.to_string());

        if let Some(key) = &self.key_path {
            ssh_cmd.arg("-i").arg(key);
        }

        ssh_cmd
            .arg(format!("{}@{}", self.user, self.host))
            .arg("powershell -NoLogo -NoProfile -NonInteractive -Command -");
        ssh_cmd
    }

    fn failure(&self, message: String) -> WinGuestError {
        WinGuestError::CommandFailed {
            machine: self.machine_name.clone(),
            message,
        }
    }

    /// Runs `command` and returns raw stdout and stderr.
    async fn run(&self, command: &str) -> Result<(String, String)> {
        debug!(
            "Executing command via SSH {}:{}: {}",
            self.host, self.port, command
        );

        let mut child = self
            .ssh_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.failure(format!("Failed to start ssh: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            // PowerShell reading from stdin needs a blank line to end a block
            stdin
                .write_all(format!("{command}\r\n\r\n").as_bytes())
                .await
                .map_err(|e| self.failure(format!("Failed to send command: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| self.failure(format!("Failed to read command output: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(self.failure(format!("SSH command failed: {stderr}")));
        }

        Ok((stdout, stderr))
    }
}

#[async_trait]
impl Communicator for SshCommunicator {
    async fn execute(&self, command: &str) -> Result<CommandOutput> {
        let (stdout, stderr) = self.run(command).await?;
        Ok(collect_lines(&stdout, &stderr))
    }

    async fn wql(&self, query: &str) -> Result<WqlResult> {
        let script = render_wql_script(query)?;
        let (stdout, _) = self.run(&script).await?;
        parse_wql_output(&self.machine_name, query, &stdout)
    }
}

/// PowerShell 2.0 compatible script that prints the rows of `query` as CSV.
pub(crate) fn render_wql_script(query: &str) -> Result<String> {
    let escaped = query.replace('"', "`\"");
    let script = WqlQueryTemplate { query: &escaped }
        .render()
        .map_err(|e| WinGuestError::TemplateError {
            template: "wql_query".to_string(),
            message: e.to_string(),
        })?;
    Ok(script.trim_end().to_string())
}

/// Splits raw process output into tagged lines, stdout first.
pub(crate) fn collect_lines(stdout: &str, stderr: &str) -> CommandOutput {
    let lines = stdout
        .lines()
        .map(OutputLine::stdout)
        .chain(stderr.lines().map(OutputLine::stderr))
        .collect();
    CommandOutput::new(lines)
}
