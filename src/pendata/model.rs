use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::{PendataError, Result};

const NISN_MAX_DIGITS: usize = 10;

/// A student's national identification number: 1 to 10 ASCII digits.
///
/// The unique key of a record. Shorter numbers are accepted (legacy data
/// files carry them) but anything non-numeric or longer is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nisn(String);

impl Nisn {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || raw.len() > NISN_MAX_DIGITS {
            return Err(PendataError::InvalidInput(format!(
                "NISN must be 1-{} digits, got {:?}",
                NISN_MAX_DIGITS, raw
            )));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PendataError::InvalidInput(format!(
                "NISN must be numeric, got {:?}",
                raw
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nisn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for Nisn {
    type Err = PendataError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Wire characters are `L` (laki-laki) and `P` (perempuan), the
    /// letters the data files have always used.
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_uppercase() {
            'L' => Ok(Sex::Male),
            'P' => Ok(Sex::Female),
            other => Err(PendataError::InvalidInput(format!(
                "Sex must be L or P, got {:?}",
                other
            ))),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Sex::Male => 'L',
            Sex::Female => 'P',
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Sex {
    type Err = PendataError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Sex::from_char(c),
            _ => Err(PendataError::InvalidInput(format!(
                "Sex must be a single L or P, got {:?}",
                s
            ))),
        }
    }
}

/// A calendar-checked birth date.
///
/// Construction goes through [`chrono::NaiveDate`], so impossible dates
/// (Feb 30, Feb 29 outside leap years) are rejected. The wire text is
/// `D-M-YYYY` without zero padding, e.g. `1-1-2005`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                PendataError::InvalidInput(format!(
                    "{}-{}-{} is not a valid date",
                    day, month, year
                ))
            })
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.day(), self.month(), self.year())
    }
}

impl FromStr for Date {
    type Err = PendataError;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || PendataError::InvalidInput(format!("{:?} is not a D-M-YYYY date", s));
        let mut parts = s.splitn(3, '-');
        let day = parts
            .next()
            .and_then(|t| t.trim().parse().ok())
            .ok_or_else(bad)?;
        let month = parts
            .next()
            .and_then(|t| t.trim().parse().ok())
            .ok_or_else(bad)?;
        let year = parts
            .next()
            .and_then(|t| t.trim().parse().ok())
            .ok_or_else(bad)?;
        Date::new(day, month, year)
    }
}

/// A relative or guardian attached to a student.
///
/// The phone lives inside the contact, so a phone without a name is
/// unrepresentable. Absent contacts are `None` at the [`Student`] level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRole {
    Father,
    Mother,
    Guardian,
}

impl fmt::Display for ContactRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactRole::Father => "father",
            ContactRole::Mother => "mother",
            ContactRole::Guardian => "guardian",
        })
    }
}

/// One student's record, keyed by NISN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub nisn: Nisn,
    pub name: String,
    pub sex: Sex,
    pub birth_place: String,
    pub birth_date: Date,
    pub address: String,
    pub phone: Option<String>,
    pub father: Option<Contact>,
    pub mother: Option<Contact>,
    pub guardian: Option<Contact>,
}

/// A single-field edit, dispatched by the UI's numbered edit menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    BirthPlace(String),
    BirthDate(Date),
    Address(String),
    Phone(Option<String>),
    /// `None` removes the contact entirely, phone included.
    ContactName(ContactRole, Option<String>),
    /// Rejected when the contact does not exist.
    ContactPhone(ContactRole, Option<String>),
}

impl Student {
    pub fn contact(&self, role: ContactRole) -> Option<&Contact> {
        match role {
            ContactRole::Father => self.father.as_ref(),
            ContactRole::Mother => self.mother.as_ref(),
            ContactRole::Guardian => self.guardian.as_ref(),
        }
    }

    fn contact_mut(&mut self, role: ContactRole) -> &mut Option<Contact> {
        match role {
            ContactRole::Father => &mut self.father,
            ContactRole::Mother => &mut self.mother,
            ContactRole::Guardian => &mut self.guardian,
        }
    }

    /// Applies a single-field edit in place.
    ///
    /// Enforces the contact invariant: removing a contact's name drops
    /// its phone, and a phone cannot be attached to an absent contact.
    pub fn apply(&mut self, update: FieldUpdate) -> Result<()> {
        match update {
            FieldUpdate::Name(name) => self.name = required(name, "name")?,
            FieldUpdate::BirthPlace(place) => self.birth_place = required(place, "birth place")?,
            FieldUpdate::BirthDate(date) => self.birth_date = date,
            FieldUpdate::Address(address) => self.address = required(address, "address")?,
            FieldUpdate::Phone(phone) => self.phone = phone,
            FieldUpdate::ContactName(role, Some(name)) => {
                let name = required(name, "contact name")?;
                let slot = self.contact_mut(role);
                if let Some(contact) = slot.as_mut() {
                    contact.name = name;
                } else {
                    *slot = Some(Contact { name, phone: None });
                }
            }
            FieldUpdate::ContactName(role, None) => {
                *self.contact_mut(role) = None;
            }
            FieldUpdate::ContactPhone(role, phone) => match self.contact_mut(role) {
                Some(contact) => contact.phone = phone,
                None => {
                    return Err(PendataError::InvalidInput(format!(
                        "student has no {} on record to attach a phone to",
                        role
                    )))
                }
            },
        }
        Ok(())
    }
}

fn required(value: String, what: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(PendataError::InvalidInput(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(value)
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub fn student(nisn: &str, name: &str) -> Student {
        Student {
            nisn: Nisn::parse(nisn).unwrap(),
            name: name.to_string(),
            sex: Sex::Female,
            birth_place: "Jakarta".to_string(),
            birth_date: Date::new(1, 1, 2005).unwrap(),
            address: "Jl. Melati 5".to_string(),
            phone: None,
            father: None,
            mother: None,
            guardian: None,
        }
    }

    pub fn student_with_contacts(nisn: &str, name: &str) -> Student {
        let mut s = student(nisn, name);
        s.phone = Some("+6281234567".to_string());
        s.father = Some(Contact {
            name: "Pak Budi".to_string(),
            phone: Some("081234".to_string()),
        });
        s.mother = Some(Contact {
            name: "Bu Sari".to_string(),
            phone: None,
        });
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nisn_accepts_digit_strings_up_to_ten() {
        assert!(Nisn::parse("1234567890").is_ok());
        assert!(Nisn::parse("7").is_ok());
    }

    #[test]
    fn nisn_rejects_bad_input() {
        assert!(Nisn::parse("").is_err());
        assert!(Nisn::parse("12345678901").is_err());
        assert!(Nisn::parse("12a4").is_err());
        assert!(Nisn::parse("-1234").is_err());
    }

    #[test]
    fn sex_parses_both_cases() {
        assert_eq!(Sex::from_char('l').unwrap(), Sex::Male);
        assert_eq!(Sex::from_char('P').unwrap(), Sex::Female);
        assert!(Sex::from_char('X').is_err());
        assert!("LP".parse::<Sex>().is_err());
    }

    #[test]
    fn leap_year_boundaries() {
        assert!(Date::new(29, 2, 2000).is_ok());
        assert!(Date::new(29, 2, 1900).is_err());
        assert!(Date::new(29, 2, 2024).is_ok());
        assert!(Date::new(30, 4, 2023).is_err());
        assert!(Date::new(31, 1, 2023).is_ok());
    }

    #[test]
    fn date_text_round_trips() {
        let date: Date = "1-1-2005".parse().unwrap();
        assert_eq!(date.to_string(), "1-1-2005");
        assert_eq!(date, Date::new(1, 1, 2005).unwrap());
        assert!("2005-01".parse::<Date>().is_err());
        assert!("x-y-z".parse::<Date>().is_err());
    }

    #[test]
    fn removing_contact_name_drops_phone() {
        let mut s = fixtures::student_with_contacts("1", "Ana");
        s.apply(FieldUpdate::ContactName(ContactRole::Father, None))
            .unwrap();
        assert!(s.father.is_none());
    }

    #[test]
    fn phone_on_absent_contact_is_rejected() {
        let mut s = fixtures::student("1", "Ana");
        let err = s
            .apply(FieldUpdate::ContactPhone(
                ContactRole::Guardian,
                Some("0812".to_string()),
            ))
            .unwrap_err();
        assert!(matches!(err, PendataError::InvalidInput(_)));
    }

    #[test]
    fn setting_contact_name_creates_contact_without_phone() {
        let mut s = fixtures::student("1", "Ana");
        s.apply(FieldUpdate::ContactName(
            ContactRole::Guardian,
            Some("Bu Rina".to_string()),
        ))
        .unwrap();
        let guardian = s.guardian.as_ref().unwrap();
        assert_eq!(guardian.name, "Bu Rina");
        assert!(guardian.phone.is_none());
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let mut s = fixtures::student("1", "Ana");
        assert!(s.apply(FieldUpdate::Name("  ".to_string())).is_err());
        assert_eq!(s.name, "Ana");
    }
}
