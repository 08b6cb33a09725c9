/// Session state: the live input line, the append-only output log, and
/// the key-event transitions that drive them. All mutation goes through
/// `handle_key` so the event loop owns no ambient state of its own.

const PROMPT_SUFFIX: &str = "@quadterm:~$ ";

/// A key event at the level the session cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// Printable ASCII, already case-mapped by the keymap
    Char(char),
    Backspace,
    Enter,
    /// Ctrl+C
    Interrupt,
}

/// What the event loop must do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing beyond the state change already applied
    None,
    /// Run this command line synchronously and append its output
    Submit(String),
    /// Exit the event loop
    Close,
}

pub struct Session {
    username: String,
    input: String,
    output: Vec<String>,
}

impl Session {
    pub fn new(username: String) -> Self {
        Self {
            username,
            input: String::new(),
            output: Vec::new(),
        }
    }

    /// Apply one key press and report the required follow-up.
    pub fn handle_key(&mut self, key: KeyPress) -> Transition {
        match key {
            KeyPress::Char(ch) => {
                if ch == ' ' || ch.is_ascii_graphic() {
                    self.input.push(ch);
                }
                Transition::None
            }
            KeyPress::Backspace => {
                self.input.pop();
                Transition::None
            }
            KeyPress::Interrupt => Transition::Close,
            KeyPress::Enter => {
                // Exact, case-sensitive match against the raw line; no
                // command runs and nothing reaches the log.
                if self.input == "exit" || self.input == "quit" {
                    return Transition::Close;
                }
                let cmd = self.input.trim().to_string();
                self.input.clear();
                Transition::Submit(cmd)
            }
        }
    }

    pub fn append_output(&mut self, lines: Vec<String>) {
        self.output.extend(lines);
    }

    /// Chronological command output, oldest first.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The prompt with the live input appended, rebuilt every frame.
    pub fn prompt_line(&self) -> String {
        let mut line = String::with_capacity(
            self.username.len() + PROMPT_SUFFIX.len() + self.input.len(),
        );
        line.push_str(&self.username);
        line.push_str(PROMPT_SUFFIX);
        line.push_str(&self.input);
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new("tester".into())
    }

    fn type_str(s: &mut Session, text: &str) {
        for ch in text.chars() {
            assert_eq!(s.handle_key(KeyPress::Char(ch)), Transition::None);
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut s = session();
        type_str(&mut s, "ls -la");
        assert_eq!(s.input(), "ls -la");
    }

    #[test]
    fn test_backspace_removes_last() {
        let mut s = session();
        type_str(&mut s, "ab");
        s.handle_key(KeyPress::Backspace);
        assert_eq!(s.input(), "a");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut s = session();
        assert_eq!(s.handle_key(KeyPress::Backspace), Transition::None);
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_exit_closes_without_running() {
        let mut s = session();
        type_str(&mut s, "exit");
        assert_eq!(s.handle_key(KeyPress::Enter), Transition::Close);
        assert!(s.output().is_empty());
    }

    #[test]
    fn test_quit_closes_without_running() {
        let mut s = session();
        type_str(&mut s, "quit");
        assert_eq!(s.handle_key(KeyPress::Enter), Transition::Close);
        assert!(s.output().is_empty());
    }

    #[test]
    fn test_exit_match_is_case_sensitive() {
        let mut s = session();
        type_str(&mut s, "EXIT");
        assert_eq!(
            s.handle_key(KeyPress::Enter),
            Transition::Submit("EXIT".into())
        );
    }

    #[test]
    fn test_padded_exit_is_a_command() {
        // Only the exact line matches; " exit" is submitted (trimmed).
        let mut s = session();
        type_str(&mut s, " exit");
        assert_eq!(
            s.handle_key(KeyPress::Enter),
            Transition::Submit("exit".into())
        );
    }

    #[test]
    fn test_enter_submits_and_clears() {
        let mut s = session();
        type_str(&mut s, "echo hello");
        assert_eq!(
            s.handle_key(KeyPress::Enter),
            Transition::Submit("echo hello".into())
        );
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_enter_trims_command() {
        let mut s = session();
        type_str(&mut s, "  date  ");
        assert_eq!(
            s.handle_key(KeyPress::Enter),
            Transition::Submit("date".into())
        );
    }

    #[test]
    fn test_empty_enter_submits_empty() {
        let mut s = session();
        assert_eq!(s.handle_key(KeyPress::Enter), Transition::Submit("".into()));
    }

    #[test]
    fn test_interrupt_closes_with_pending_input() {
        let mut s = session();
        type_str(&mut s, "sleep 100");
        assert_eq!(s.handle_key(KeyPress::Interrupt), Transition::Close);
    }

    #[test]
    fn test_control_chars_not_appended() {
        let mut s = session();
        s.handle_key(KeyPress::Char('\t'));
        s.handle_key(KeyPress::Char('\x07'));
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_output_is_append_only_chronological() {
        let mut s = session();
        s.append_output(vec!["one".into(), "two".into()]);
        s.append_output(vec!["three".into()]);
        assert_eq!(s.output(), &["one", "two", "three"]);
    }

    #[test]
    fn test_prompt_line_format() {
        let mut s = session();
        type_str(&mut s, "ls");
        assert_eq!(s.prompt_line(), "tester@quadterm:~$ ls");
    }
}
