//! Line-oriented prompting with validation re-prompt loops.
//!
//! Every reader keeps asking until the input passes its filter, the way
//! the menu has always behaved. EOF on stdin surfaces as an
//! `UnexpectedEof` IO error so the menu loop can wind down cleanly.

use std::io::{self, BufRead, Write};

use pendata::error::Result;
use pendata::model::{Date, Nisn, Sex};

fn read_raw(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut buf = String::new();
    let n = io::stdin().lock().read_line(&mut buf)?;
    if n == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into());
    }
    Ok(buf.trim().to_string())
}

/// Prompts until a non-empty line is entered.
pub fn required(label: &str) -> Result<String> {
    loop {
        let line = read_raw(label)?;
        if !line.is_empty() {
            return Ok(line);
        }
        println!("Input must not be empty, try again");
    }
}

/// Prompts once; empty input takes the offered fallback.
pub fn with_default(label: &str, fallback: &str) -> Result<String> {
    let line = read_raw(&format!("{} [{}]", label, fallback))?;
    Ok(if line.is_empty() {
        fallback.to_string()
    } else {
        line
    })
}

/// Optional field: empty input (or the bare `-`) means absent.
pub fn optional(label: &str) -> Result<Option<String>> {
    let line = read_raw(label)?;
    Ok(if line.is_empty() || line == "-" {
        None
    } else {
        Some(line)
    })
}

pub fn nisn(label: &str) -> Result<Nisn> {
    loop {
        match Nisn::parse(&read_raw(label)?) {
            Ok(nisn) => return Ok(nisn),
            Err(e) => println!("{}, try again", e),
        }
    }
}

pub fn sex(label: &str) -> Result<Sex> {
    loop {
        match read_raw(label)?.parse() {
            Ok(sex) => return Ok(sex),
            Err(_) => println!("Enter L or P, try again"),
        }
    }
}

pub fn date(label: &str) -> Result<Date> {
    loop {
        match read_raw(&format!("{} (D-M-YYYY)", label))?.parse() {
            Ok(date) => return Ok(date),
            Err(e) => println!("{}, try again", e),
        }
    }
}

/// Phone numbers are digits with an optional leading `+`. Empty input
/// means no phone on record.
pub fn phone(label: &str) -> Result<Option<String>> {
    loop {
        let line = read_raw(label)?;
        if line.is_empty() || line == "-" {
            return Ok(None);
        }
        if is_valid_phone(&line) {
            return Ok(Some(line));
        }
        println!("Phone may only contain digits and a leading +, try again");
    }
}

fn is_valid_phone(raw: &str) -> bool {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Menu choice; `None` when the line is not a number.
pub fn number(label: &str) -> Result<Option<u32>> {
    Ok(read_raw(label)?.parse().ok())
}

/// Yes/no with "no" as the default on anything but an explicit yes.
pub fn confirm(label: &str) -> Result<bool> {
    let line = read_raw(&format!("{} (y/[n])", label))?;
    Ok(line.eq_ignore_ascii_case("y"))
}
