use anyhow::Result;
use dialoguer::Input;
use is_terminal::IsTerminal;
use std::io::{self, BufRead, Write};

/// The only answer that approves a destructive action
const APPROVAL_ANSWER: &str = "yes";

/// Ask the user to approve a destructive action by typing "yes"
///
/// # Arguments
/// * `prompt` - The question to ask, e.g. "wipe all 12 messages?"
///
/// # Returns
/// * `Ok(true)` only if the user typed "yes" (case-insensitive, trimmed)
/// * `Ok(false)` for any other answer, including an empty one
///
/// When stdin is not a terminal (e.g. `echo yes | slack-wipe ...`) one line
/// is read from it instead of showing an interactive prompt.
pub fn approval_prompt(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return read_approval(prompt, stdin.lock(), io::stdout());
    }

    let answer = Input::<String>::new()
        .with_prompt(question(prompt))
        .allow_empty(true)
        .interact_text()?;

    Ok(is_approval(&answer))
}

/// Write the prompt to `output` and read one answer line from `input`.
/// End of input counts as a refusal.
pub fn read_approval<R: BufRead, W: Write>(prompt: &str, mut input: R, mut output: W) -> Result<bool> {
    write!(output, "{}: ", question(prompt))?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_approval(&answer))
}

fn question(prompt: &str) -> String {
    format!("{} (only the answer \"{}\" will be accepted)", prompt, APPROVAL_ANSWER)
}

pub fn is_approval(answer: &str) -> bool {
    answer.trim().to_lowercase() == APPROVAL_ANSWER
}
