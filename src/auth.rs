use anyhow::{Result, bail};
use std::io::{self, IsTerminal};
use zeroize::Zeroizing;

const PASSWORD_ENV: &str = "PWNEST_PASSWORD";

fn password_from_env() -> Option<Zeroizing<String>> {
    //  PWNEST_PASSWORD="supersecret" pwnest verify <record>
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

fn password_from_stdin() -> Result<Option<Zeroizing<String>>> {
    //  printf "%s" "$PW" | pwnest hash
    let mut buf = Zeroizing::new(String::new());
    io::stdin().read_line(&mut buf)?;
    trim_newline(&mut buf);

    if buf.is_empty() {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// Reads the password to check against a record.
pub fn read_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    if !io::stdin().is_terminal() {
        if let Some(pw) = password_from_stdin()? {
            return Ok(pw);
        }
        bail!("No password provided");
    }

    let pw = Zeroizing::new(rpassword::prompt_password("Password: ")?);
    if pw.is_empty() {
        bail!("No password provided");
    }
    Ok(pw)
}

/// Reads a password to hash, asking twice on an interactive terminal.
pub fn read_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    if !io::stdin().is_terminal() {
        if let Some(pw) = password_from_stdin()? {
            return Ok(pw);
        }
        bail!("password cannot be empty");
    }

    let pw1 = Zeroizing::new(rpassword::prompt_password("New password: ")?);
    let pw2 = Zeroizing::new(rpassword::prompt_password("Confirm password: ")?);

    if pw1.is_empty() {
        bail!("password cannot be empty");
    }

    if pw1 != pw2 {
        bail!("passwords do not match");
    }

    Ok(pw1)
}

fn trim_newline(s: &mut String) {
    while s.ends_with('\n') || s.ends_with('\r') {
        s.pop();
    }
}
