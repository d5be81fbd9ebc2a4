//! The key-tagged line format of the earlier revision: one record per
//! line, space-separated `key:value` tokens from a fixed key set.
//!
//! ```text
//! nisn:1234567890 nama:Ana Putri jeniskelamin:P tempatlahir:Jakarta ...
//! ```
//!
//! Values may contain spaces: a whitespace-separated token only starts a
//! new field when it is `<known-key>:<rest>`; every other token extends
//! the current value. This replaces the anchor-substring scan the old
//! reader used, but the format itself is unchanged and has no escaping
//! mechanism. A raw value that contains a token lexing as a recognized
//! key (say an address with the literal text `wali:`) still corrupts
//! that record; that is a limitation of the format, not of this parser.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Instant;

use crate::error::{PendataError, Result};
use crate::model::{Contact, Nisn, Student};

use super::{contact_from, decode_opt, DecodeReport, EncodeReport, SENTINEL};

/// Recognized keys, in canonical write order.
const KEYS: [&str; 13] = [
    "nisn",
    "nama",
    "jeniskelamin",
    "tempatlahir",
    "tanggallahir",
    "alamat",
    "nohp",
    "ayah",
    "nohpayah",
    "ibu",
    "nohpibu",
    "wali",
    "nohpwali",
];

pub fn encode<'a, W, I>(w: &mut W, records: I) -> io::Result<EncodeReport>
where
    W: Write,
    I: IntoIterator<Item = &'a Student>,
{
    let start = Instant::now();
    let mut written = 0;
    for s in records {
        writeln!(w, "{}", encode_line(s))?;
        written += 1;
    }
    Ok(EncodeReport {
        written,
        elapsed: start.elapsed(),
    })
}

fn encode_line(s: &Student) -> String {
    let (ayah, nohpayah) = contact_fields(&s.father);
    let (ibu, nohpibu) = contact_fields(&s.mother);
    let (wali, nohpwali) = contact_fields(&s.guardian);
    let values = [
        s.nisn.to_string(),
        s.name.clone(),
        s.sex.to_string(),
        s.birth_place.clone(),
        s.birth_date.to_string(),
        s.address.clone(),
        s.phone.clone().unwrap_or_else(|| SENTINEL.to_string()),
        ayah,
        nohpayah,
        ibu,
        nohpibu,
        wali,
        nohpwali,
    ];
    KEYS.iter()
        .zip(values)
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn contact_fields(contact: &Option<Contact>) -> (String, String) {
    match contact {
        Some(c) => (
            c.name.clone(),
            c.phone.clone().unwrap_or_else(|| SENTINEL.to_string()),
        ),
        None => (SENTINEL.to_string(), SENTINEL.to_string()),
    }
}

/// True when the line carries at least one recognized `key:` token;
/// used to sniff the format of a file without a magic header.
pub fn is_record_line(line: &str) -> bool {
    line.split_whitespace().any(|t| split_key(t).is_some())
}

/// No header in this format: every non-blank line is one record.
/// Lines that fail field validation count as skipped.
pub fn decode(input: &str) -> DecodeReport {
    let start = Instant::now();
    let mut records = Vec::new();
    let mut skipped = 0;
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(student) => records.push(student),
            Err(_) => skipped += 1,
        }
    }
    DecodeReport {
        records,
        header_mismatch: false,
        skipped,
        elapsed: start.elapsed(),
    }
}

fn parse_line(line: &str) -> Result<Student> {
    let mut fields = tokenize(line);
    Ok(Student {
        nisn: Nisn::parse(&take(&mut fields, "nisn")?)?,
        name: take(&mut fields, "nama")?,
        sex: take(&mut fields, "jeniskelamin")?.parse()?,
        birth_place: take(&mut fields, "tempatlahir")?,
        birth_date: take(&mut fields, "tanggallahir")?.parse()?,
        address: take(&mut fields, "alamat")?,
        phone: take_opt(&mut fields, "nohp"),
        father: contact_from(
            take_opt(&mut fields, "ayah"),
            take_opt(&mut fields, "nohpayah"),
        ),
        mother: contact_from(
            take_opt(&mut fields, "ibu"),
            take_opt(&mut fields, "nohpibu"),
        ),
        guardian: contact_from(
            take_opt(&mut fields, "wali"),
            take_opt(&mut fields, "nohpwali"),
        ),
    })
}

/// Splits a record line into key → value. A token of the form
/// `<known-key>:<rest>` starts a new field; any other token continues
/// the current field's value. Tokens before the first key have nothing
/// to attach to and are dropped. A repeated key overwrites.
fn tokenize(line: &str) -> HashMap<&str, String> {
    let mut fields: HashMap<&str, String> = HashMap::new();
    let mut current: Option<&str> = None;
    for token in line.split_whitespace() {
        if let Some((key, rest)) = split_key(token) {
            fields.insert(key, rest.to_string());
            current = Some(key);
        } else if let Some(key) = current {
            let value = fields.entry(key).or_default();
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(token);
        }
    }
    fields
}

fn split_key(token: &str) -> Option<(&str, &str)> {
    let (head, rest) = token.split_once(':')?;
    if KEYS.contains(&head) {
        Some((head, rest))
    } else {
        None
    }
}

fn take(fields: &mut HashMap<&str, String>, key: &str) -> Result<String> {
    fields
        .remove(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PendataError::InvalidInput(format!("record is missing `{}`", key)))
}

fn take_opt(fields: &mut HashMap<&str, String>, key: &str) -> Option<String> {
    fields.remove(key).and_then(|v| decode_opt(&v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{student, student_with_contacts};

    fn encode_to_string<'a, I: IntoIterator<Item = &'a Student>>(records: I) -> String {
        let mut buf = Vec::new();
        encode(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn one_line_per_record_with_all_keys() {
        let text = encode_to_string(&[student("1", "Ana")]);
        assert_eq!(text.lines().count(), 1);
        for key in KEYS {
            assert!(text.contains(&format!("{}:", key)), "missing {}", key);
        }
    }

    #[test]
    fn round_trip_preserves_records() {
        let records = vec![
            student_with_contacts("1234567890", "Ana Putri"),
            student("2", "Budi"),
        ];
        let report = decode(&encode_to_string(&records));
        assert_eq!(report.skipped, 0);
        assert_eq!(report.records, records);
    }

    #[test]
    fn values_keep_their_internal_spaces() {
        let mut s = student("1", "Budi Agus Santoso");
        s.address = "Jl. Kebon Jeruk 12 RT 04".to_string();
        let report = decode(&encode_to_string(&[s]));
        assert_eq!(report.records[0].name, "Budi Agus Santoso");
        assert_eq!(report.records[0].address, "Jl. Kebon Jeruk 12 RT 04");
    }

    #[test]
    fn sentinel_values_decode_as_absent() {
        let report = decode(&encode_to_string(&[student("1", "Ana")]));
        let s = &report.records[0];
        assert!(s.phone.is_none());
        assert!(s.father.is_none() && s.mother.is_none() && s.guardian.is_none());
    }

    #[test]
    fn missing_required_key_skips_the_line() {
        let line = "nama:Ana jeniskelamin:P tempatlahir:Jakarta tanggallahir:1-1-2005 alamat:Jl. A\n";
        let report = decode(line);
        assert!(report.records.is_empty());
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn unknown_colon_tokens_stay_in_the_value() {
        let line = "nisn:1 nama:Ana jeniskelamin:P tempatlahir:Jakarta \
                    tanggallahir:1-1-2005 alamat:Gg. Mawar no:12\n";
        let report = decode(line);
        assert_eq!(report.records[0].address, "Gg. Mawar no:12");
    }

    #[test]
    fn recognizes_record_lines() {
        assert!(is_record_line("nisn:123 nama:Ana"));
        assert!(!is_record_line("PDSiswa1"));
        assert!(!is_record_line("just some text"));
    }
}
