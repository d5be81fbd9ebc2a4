//! The persisted flat-text format: a magic header, then thirteen lines
//! per record, one value per line, in fixed order.
//!
//! ```text
//! PDSiswa1
//! 1234567890        nisn
//! Ana               name
//! P                 sex
//! Jakarta           birth place
//! 1-1-2005          birth date, D-M-YYYY
//! Jl. A             address
//! -                 phone
//! -                 father name
//! -                 father phone
//! -                 mother name
//! -                 mother phone
//! -                 guardian name
//! -                 guardian phone
//! ```
//!
//! Values may contain spaces but not newlines. Absent optionals are the
//! `-` sentinel.

use std::io::{self, Write};
use std::time::Instant;

use crate::error::Result;
use crate::model::{Contact, Nisn, Student};

use super::{
    contact_from, decode_opt, encode_opt, strip_cr, DecodeReport, EncodeReport, SENTINEL,
};

/// First line of every file written in this format.
pub const MAGIC: &str = "PDSiswa1";

/// Lines occupied by one record block.
const RECORD_LINES: usize = 13;

pub fn encode<'a, W, I>(w: &mut W, records: I) -> io::Result<EncodeReport>
where
    W: Write,
    I: IntoIterator<Item = &'a Student>,
{
    let start = Instant::now();
    writeln!(w, "{}", MAGIC)?;
    let mut written = 0;
    for s in records {
        writeln!(w, "{}", s.nisn)?;
        writeln!(w, "{}", s.name)?;
        writeln!(w, "{}", s.sex)?;
        writeln!(w, "{}", s.birth_place)?;
        writeln!(w, "{}", s.birth_date)?;
        writeln!(w, "{}", s.address)?;
        writeln!(w, "{}", encode_opt(&s.phone))?;
        write_contact(w, &s.father)?;
        write_contact(w, &s.mother)?;
        write_contact(w, &s.guardian)?;
        written += 1;
    }
    Ok(EncodeReport {
        written,
        elapsed: start.elapsed(),
    })
}

fn write_contact<W: Write>(w: &mut W, contact: &Option<Contact>) -> io::Result<()> {
    match contact {
        Some(c) => {
            writeln!(w, "{}", c.name)?;
            writeln!(w, "{}", encode_opt(&c.phone))
        }
        None => {
            writeln!(w, "{}", SENTINEL)?;
            writeln!(w, "{}", SENTINEL)
        }
    }
}

/// Reads the whole input top to bottom. The header line is consumed
/// whether or not it matches; a mismatch only sets the flag. A partial
/// record block at EOF is dropped; a complete block whose fields fail
/// validation counts as skipped.
pub fn decode(input: &str) -> DecodeReport {
    let start = Instant::now();
    let mut lines = input.lines().map(strip_cr);
    let header_mismatch = lines.next() != Some(MAGIC);

    let mut records = Vec::new();
    let mut skipped = 0;
    loop {
        let block: Vec<&str> = lines.by_ref().take(RECORD_LINES).collect();
        if block.len() < RECORD_LINES {
            break;
        }
        match parse_record(&block) {
            Ok(student) => records.push(student),
            Err(_) => skipped += 1,
        }
    }

    DecodeReport {
        records,
        header_mismatch,
        skipped,
        elapsed: start.elapsed(),
    }
}

fn parse_record(block: &[&str]) -> Result<Student> {
    Ok(Student {
        nisn: Nisn::parse(block[0].trim())?,
        name: block[1].to_string(),
        sex: block[2].parse()?,
        birth_place: block[3].to_string(),
        birth_date: block[4].trim().parse()?,
        address: block[5].to_string(),
        phone: decode_opt(block[6]),
        father: contact_from(decode_opt(block[7]), decode_opt(block[8])),
        mother: contact_from(decode_opt(block[9]), decode_opt(block[10])),
        guardian: contact_from(decode_opt(block[11]), decode_opt(block[12])),
    })
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
    fn round_trip_preserves_records_and_order() {
        let records = vec![
            student_with_contacts("1234567890", "Ana Putri"),
            student("2", "Budi"),
        ];
        let text = encode_to_string(&records);
        let report = decode(&text);
        assert!(!report.header_mismatch);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.records, records);
    }

    #[test]
    fn file_starts_with_magic_header() {
        let text = encode_to_string(&[student("1", "Ana")]);
        assert!(text.starts_with("PDSiswa1\n"));
    }

    #[test]
    fn absent_optionals_encode_as_sentinel_lines() {
        let text = encode_to_string(&[student("1", "Ana")]);
        let lines: Vec<&str> = text.lines().collect();
        // phone plus three absent contacts, two lines each
        assert_eq!(&lines[7..14], &["-", "-", "-", "-", "-", "-", "-"]);
    }

    #[test]
    fn wrong_header_warns_but_still_parses() {
        let text = encode_to_string(&[student("1", "Ana")]).replacen(MAGIC, "WRONGHEADER", 1);
        let report = decode(&text);
        assert!(report.header_mismatch);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "Ana");
    }

    #[test]
    fn eof_mid_record_truncates_silently() {
        let mut text = encode_to_string(&[student("1", "Ana")]);
        text.push_str("22\nBudi\nL\nBandung\n"); // partial second record
        let report = decode(&text);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn invalid_field_skips_only_that_record() {
        let good = student("1", "Ana");
        let bad = student("2", "Budi");
        let mut text = encode_to_string(&[good.clone(), bad]);
        // corrupt the second record's date line (line 18: header + 13 + 4)
        let mut lines: Vec<&str> = text.lines().collect();
        lines[18] = "31-2-2005";
        text = lines.join("\n");
        text.push('\n');
        let report = decode(&text);
        assert_eq!(report.records, vec![good]);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn phone_next_to_sentinel_contact_name_is_dropped() {
        let mut text = encode_to_string(&[student("1", "Ana")]);
        // hand-corrupt: father name stays "-" but a phone is present
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        lines[9] = "0812345".to_string();
        text = lines.join("\n");
        text.push('\n');
        let report = decode(&text);
        assert!(report.records[0].father.is_none());
    }

    #[test]
    fn values_with_spaces_survive() {
        let mut s = student("1", "Ana Maria Putri");
        s.address = "Jl. Kebon Jeruk 12 RT 04".to_string();
        let report = decode(&encode_to_string(&[s.clone()]));
        assert_eq!(report.records, vec![s]);
    }
}
