//! Yes/no confirmation prompt with bounded retries

use crate::error::{CliError, Result};
use std::io::{self, BufRead, Write};

/// Unrecognized answers tolerated before giving up
const MAX_ATTEMPTS: usize = 3;

/// Ask `prompt` on stdout and read the answer from stdin
pub fn confirm(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    confirm_with(prompt, &mut stdin.lock(), &mut stdout.lock())
}

/// Ask `prompt` on stderr, keeping stdout free for structured output
pub fn confirm_on_stderr(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    let stderr = io::stderr();
    confirm_with(prompt, &mut stdin.lock(), &mut stderr.lock())
}

/// Ask `prompt` on `output` and read answers from `input`.
///
/// `y`/`yes` and `n`/`no` are accepted in any case. Invalid UTF-8 counts as an
/// unrecognized answer. A read error or end of input fails immediately.
pub fn confirm_with<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> Result<bool> {
    let io_err = |e: io::Error| CliError::PromptIo {
        message: e.to_string(),
    };

    for _ in 0..MAX_ATTEMPTS {
        write!(output, "{} [y/n]: ", prompt).map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = Vec::new();
        if input.read_until(b'\n', &mut line).map_err(io_err)? == 0 {
            return Err(CliError::PromptIo {
                message: "unexpected end of input".to_string(),
            });
        }

        match String::from_utf8_lossy(&line).trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer with yes or no.").map_err(io_err)?,
        }
    }

    Err(CliError::ConfirmationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str) -> (Result<bool>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = confirm_with("Destroy mydb?", &mut reader, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        for input in ["y\n", "Y\n", "yes\n", "YES\n", "  Yes  \n"] {
            assert!(answer(input).0.unwrap(), "input {:?}", input);
        }
    }

    #[test]
    fn test_no_answers() {
        for input in ["n\n", "no\n", "NO\n"] {
            assert!(!answer(input).0.unwrap(), "input {:?}", input);
        }
    }

    #[test]
    fn test_reprompts_then_accepts() {
        let (result, out) = answer("maybe\nyes\n");
        assert!(result.unwrap());
        assert_eq!(out.matches("Destroy mydb? [y/n]: ").count(), 2);
        assert!(out.contains("Please answer with yes or no."));
    }

    #[test]
    fn test_three_unrecognized_answers_fail() {
        let (result, out) = answer("a\nb\nc\ny\n");
        assert!(matches!(result, Err(CliError::ConfirmationFailed)));
        assert_eq!(out.matches("[y/n]").count(), 3);
    }

    #[test]
    fn test_end_of_input_fails_immediately() {
        let (result, out) = answer("");
        assert!(matches!(result, Err(CliError::PromptIo { .. })));
        assert_eq!(out.matches("[y/n]").count(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_unrecognized_answer() {
        let mut reader = Cursor::new(b"\xff\xfe\nyes\n".to_vec());
        let mut out = Vec::new();
        let result = confirm_with("Destroy mydb?", &mut reader, &mut out);

        assert!(result.unwrap());
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("[y/n]").count(), 2);
        assert!(out.contains("Please answer with yes or no."));
    }

    #[test]
    fn test_answer_without_trailing_newline() {
        assert!(answer("y").0.unwrap());
    }
}
