use std::io::Write;

pub fn read_stdin<P>(prompt: P) -> std::io::Result<Option<String>>
where
    P: AsRef<str>
{
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut buffer = String::new();

    stdout.write_all(prompt.as_ref().as_bytes())?;
    stdout.flush()?;

    // zero bytes means stdin was closed
    if stdin.read_line(&mut buffer)? == 0 {
        Ok(None)
    } else {
        Ok(Some(buffer))
    }
}

/// prompt shown in interactive mode, `user@host> `
pub fn prompt(user: Option<&str>, host: Option<&str>) -> String {
    match (user, host) {
        (Some(user), Some(host)) => format!("{}@{}> ", user, host),
        (None, Some(host)) => format!("{}> ", host),
        _ => String::from("> "),
    }
}
