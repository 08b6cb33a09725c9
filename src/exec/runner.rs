/// Blocking command execution through the platform shell.
/// The calling thread blocks for the child's entire lifetime: while a
/// command runs, no frames are drawn and no input is handled.

use crate::config::ShellConfig;
use std::io::Read;
use std::process::{Command, Stdio};

/// Read granularity for the child's stdout pipe.
const CHUNK_SIZE: usize = 128;

/// Log entry produced when the shell itself cannot be started.
pub const SPAWN_ERROR_LINE: &str = "Error: Failed to execute command.";

pub struct CommandRunner {
    program: String,
    args: Vec<String>,
}

impl CommandRunner {
    pub fn new(shell: &ShellConfig) -> Self {
        Self {
            program: shell.program.clone(),
            args: shell.args.clone(),
        }
    }

    /// Run `cmd` through the shell, block until it exits, and return its
    /// captured stdout as whole lines. The command string reaches the
    /// shell verbatim; sanitizing is not a terminal's job. stderr passes
    /// through to the parent's; stdin is closed.
    pub fn run(&self, cmd: &str) -> Vec<String> {
        log::info!("running `{}` via {}", cmd, self.program);

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn();

        let mut child = match child {
            Ok(c) => c,
            Err(e) => {
                log::warn!("failed to spawn {}: {}", self.program, e);
                return vec![SPAWN_ERROR_LINE.to_string()];
            }
        };

        let mut lines = Vec::new();
        let mut assembler = LineAssembler::new();

        if let Some(mut stdout) = child.stdout.take() {
            let mut chunk = [0u8; CHUNK_SIZE];
            loop {
                match stdout.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => assembler.push_chunk(&chunk[..n], &mut lines),
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::warn!("error reading command output: {}", e);
                        break;
                    }
                }
            }
        }
        assembler.finish(&mut lines);

        match child.wait() {
            Ok(status) => log::debug!("`{}` exited with {}", cmd, status),
            Err(e) => log::warn!("failed to reap child: {}", e),
        }

        lines
    }
}

/// Reassembles logical lines from fixed-size pipe chunks: a line split
/// across a chunk boundary still becomes one entry, and the trailing
/// newline is not part of it.
pub struct LineAssembler {
    partial: Vec<u8>,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self {
            partial: Vec::new(),
        }
    }

    pub fn push_chunk(&mut self, chunk: &[u8], out: &mut Vec<String>) {
        for &byte in chunk {
            if byte == b'\n' {
                out.push(take_lossy(&mut self.partial));
            } else {
                self.partial.push(byte);
            }
        }
    }

    /// Flush a final unterminated line, if any.
    pub fn finish(mut self, out: &mut Vec<String>) {
        if !self.partial.is_empty() {
            out.push(take_lossy(&mut self.partial));
        }
    }
}

fn take_lossy(bytes: &mut Vec<u8>) -> String {
    let s = String::from_utf8_lossy(bytes).into_owned();
    bytes.clear();
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> CommandRunner {
        CommandRunner::new(&ShellConfig::default())
    }

    #[test]
    fn test_echo_captures_line() {
        let lines = runner().run("echo hello");
        assert_eq!(lines, vec!["hello"]);
    }

    #[test]
    fn test_multiple_lines_in_order() {
        let lines = runner().run("printf '1\\n2\\n3\\n'");
        assert_eq!(lines, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_unterminated_line_is_flushed() {
        let lines = runner().run("printf 'no newline'");
        assert_eq!(lines, vec!["no newline"]);
    }

    #[test]
    fn test_long_line_reassembled_across_chunks() {
        // 300 characters, far past the 128-byte read chunk.
        let lines = runner().run("printf '%0300d' 7");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 300);
        assert!(lines[0].ends_with('7'));
    }

    #[test]
    fn test_unknown_command_produces_no_entries() {
        // The shell starts fine and prints its complaint to stderr,
        // which is not captured.
        let lines = runner().run("definitely-not-a-command-12345");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_spawn_failure_produces_error_line() {
        let broken = CommandRunner::new(&ShellConfig {
            program: "/nonexistent/shell-binary".into(),
            args: vec!["-c".into()],
        });
        let lines = broken.run("echo hello");
        assert_eq!(lines, vec![SPAWN_ERROR_LINE]);
    }

    #[test]
    fn test_empty_command_is_harmless() {
        let lines = runner().run("");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_stdin_is_closed() {
        // `cat` sees EOF immediately instead of waiting for input.
        let lines = runner().run("cat");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_assembler_splits_on_newline() {
        let mut out = Vec::new();
        let mut asm = LineAssembler::new();
        asm.push_chunk(b"one\ntwo\n", &mut out);
        asm.finish(&mut out);
        assert_eq!(out, vec!["one", "two"]);
    }

    #[test]
    fn test_assembler_joins_across_chunks() {
        let mut out = Vec::new();
        let mut asm = LineAssembler::new();
        asm.push_chunk(b"hel", &mut out);
        asm.push_chunk(b"lo\nwor", &mut out);
        assert_eq!(out, vec!["hello"]);
        asm.push_chunk(b"ld", &mut out);
        asm.finish(&mut out);
        assert_eq!(out, vec!["hello", "world"]);
    }

    #[test]
    fn test_assembler_empty_lines_kept() {
        let mut out = Vec::new();
        let mut asm = LineAssembler::new();
        asm.push_chunk(b"a\n\nb\n", &mut out);
        asm.finish(&mut out);
        assert_eq!(out, vec!["a", "", "b"]);
    }

    #[test]
    fn test_assembler_lossy_on_invalid_utf8() {
        let mut out = Vec::new();
        let mut asm = LineAssembler::new();
        asm.push_chunk(&[b'a', 0xff, b'b', b'\n'], &mut out);
        asm.finish(&mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with('a') && out[0].ends_with('b'));
    }

    #[test]
    fn test_assembler_finish_without_partial() {
        let mut out = Vec::new();
        let asm = LineAssembler::new();
        asm.finish(&mut out);
        assert!(out.is_empty());
    }
}
