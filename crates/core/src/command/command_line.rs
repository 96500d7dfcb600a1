//! User command lines

use crate::error::{Error, Result};

/// Append `-b <file>` so the builder reads the user's build file even when it
/// does not carry the default name
pub fn append_build_file(command_line: &str, file_name: &str) -> String {
    let file_arg = quote_arg(file_name);

    if command_line.trim().is_empty() {
        format!("-b {file_arg}")
    } else {
        format!("{command_line} -b {file_arg}")
    }
}

/// Escape `arg` so [`split_command_line`] yields it back as one argument
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }
    let mut quoted = String::with_capacity(arg.len());
    for c in arg.chars() {
        if matches!(c, '\\' | '\'' | '"') || c.is_whitespace() {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted
}

/// Join arguments into a line that [`split_command_line`] splits back into them
pub fn join_command_line<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| quote_arg(arg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a command line on whitespace, honouring single and double quotes
/// and backslash escapes outside single quotes
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => match chars.next() {
                Some(escaped) => {
                    current.push(escaped);
                    in_token = true;
                }
                None => return Err(Error::InvalidConfiguration(format!("Trailing backslash in: {line}"))),
            },
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_token = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(Error::InvalidConfiguration(format!("Unterminated quote in: {line}")));
    }
    if in_token {
        args.push(current);
    }
    Ok(args)
}
