use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use pendata::api::PendataApi;
use pendata::commands::{CmdMessage, MessageLevel};
use pendata::config::PendataConfig;
use pendata::error::{PendataError, Result};
use pendata::model::{Contact, ContactRole, FieldUpdate, Nisn, Student};
use std::io;
use std::path::PathBuf;

mod args;
mod prompt;
use args::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let proj_dirs =
        ProjectDirs::from("com", "pendata", "pendata").expect("Could not determine config dir");
    let config = PendataConfig::load(proj_dirs.config_dir()).unwrap_or_default();

    let level = if cli.verbose { "debug" } else { "info" };
    if let Err(e) = pendata::logging::init(level, &proj_dirs.data_dir().join("logs")) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut api = PendataApi::new(config);

    println!("{}", "--- Student Records ---".bold());

    if let Some(path) = &cli.file {
        match api.load(path) {
            Ok(result) => print_messages(&result.messages),
            Err(e) => println!(
                "{}",
                format!("Could not load {}: {}", path.display(), e).red()
            ),
        }
    }

    menu_loop(&mut api)
}

fn menu_loop(api: &mut PendataApi) -> Result<()> {
    loop {
        println!();
        println!("Main menu");
        println!("[1] Add student");
        println!("[2] Edit student");
        println!("[3] View student");
        println!("[4] Load data");
        println!("[5] Save data");
        println!("[6] Exit");

        let choice = match prompt::number("Enter your choice") {
            Ok(choice) => choice,
            Err(e) if is_eof(&e) => return Ok(()),
            Err(e) => return Err(e),
        };
        println!();

        let outcome = match choice {
            Some(1) => handle_add(api),
            Some(2) => handle_edit(api),
            Some(3) => handle_view(api),
            Some(4) => handle_load(api),
            Some(5) => handle_save(api),
            Some(6) => {
                println!("Goodbye");
                return Ok(());
            }
            _ => {
                println!("{}", "Invalid choice".red());
                Ok(())
            }
        };

        match outcome {
            Ok(()) => {}
            Err(e) if is_eof(&e) => return Ok(()),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

fn is_eof(err: &PendataError) -> bool {
    matches!(err, PendataError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

fn handle_add(api: &mut PendataApi) -> Result<()> {
    println!("{}", "--- Add Student ---".bold());
    let nisn = prompt::nisn("NISN")?;
    if api.view_student(&nisn).is_ok() {
        println!(
            "{}",
            format!("A student with NISN {} is already registered", nisn).yellow()
        );
        return Ok(());
    }

    let student = Student {
        nisn,
        name: prompt::required("Name")?,
        sex: prompt::sex("Sex (L/P)")?,
        birth_place: prompt::required("Birth place")?,
        birth_date: prompt::date("Birth date")?,
        address: prompt::required("Address")?,
        phone: prompt::phone("Phone")?,
        father: prompt_contact("Father")?,
        mother: prompt_contact("Mother")?,
        guardian: prompt_contact("Guardian")?,
    };

    let result = api.add_student(student)?;
    print_messages(&result.messages);
    Ok(())
}

/// Contact phone is only asked for once a name was given.
fn prompt_contact(label: &str) -> Result<Option<Contact>> {
    match prompt::optional(&format!("{} name (empty for none)", label))? {
        Some(name) => {
            let phone = prompt::phone(&format!("{} phone", label))?;
            Ok(Some(Contact { name, phone }))
        }
        None => Ok(None),
    }
}

fn handle_edit(api: &mut PendataApi) -> Result<()> {
    println!("{}", "--- Edit Student ---".bold());
    let nisn = prompt::nisn("NISN")?;
    let current = match api.view_student(&nisn) {
        Ok(result) => match result.records.into_iter().next() {
            Some(student) => student,
            None => return Ok(()),
        },
        Err(e) => {
            println!("{}", e.to_string().red());
            return Ok(());
        }
    };

    println!("Editing {} ({})", current.name, current.nisn);
    println!(" [1] Name           : {}", current.name);
    println!(" [2] Birth place    : {}", current.birth_place);
    println!(" [3] Birth date     : {}", current.birth_date);
    println!(" [4] Address        : {}", current.address);
    println!(" [5] Phone          : {}", display_opt(&current.phone));
    println!(" [6] Father name    : {}", contact_name(&current.father));
    println!(" [7] Father phone   : {}", contact_phone(&current.father));
    println!(" [8] Mother name    : {}", contact_name(&current.mother));
    println!(" [9] Mother phone   : {}", contact_phone(&current.mother));
    println!(" [10] Guardian name : {}", contact_name(&current.guardian));
    println!(" [11] Guardian phone: {}", contact_phone(&current.guardian));
    println!(" [12] Delete student");
    println!(" [13] Cancel");

    let update = match prompt::number("Field")? {
        Some(1) => FieldUpdate::Name(prompt::required("New name")?),
        Some(2) => FieldUpdate::BirthPlace(prompt::required("New birth place")?),
        Some(3) => FieldUpdate::BirthDate(prompt::date("New birth date")?),
        Some(4) => FieldUpdate::Address(prompt::required("New address")?),
        Some(5) => FieldUpdate::Phone(prompt::phone("New phone")?),
        Some(n @ 6..=11) => {
            let role = match n {
                6 | 7 => ContactRole::Father,
                8 | 9 => ContactRole::Mother,
                _ => ContactRole::Guardian,
            };
            if n % 2 == 0 {
                contact_name_update(role)?
            } else {
                contact_phone_update(api, &nisn, &current, role)?
            }
        }
        Some(12) => {
            let result = api.delete_student(&nisn)?;
            print_messages(&result.messages);
            return Ok(());
        }
        Some(13) => return Ok(()),
        _ => {
            println!("{}", "Invalid choice".red());
            return Ok(());
        }
    };

    let result = api.edit_student(&nisn, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn contact_name_update(role: ContactRole) -> Result<FieldUpdate> {
    let name = prompt::optional(&format!("New {} name (empty to remove)", role))?;
    Ok(FieldUpdate::ContactName(role, name))
}

/// Giving a phone to a contact that does not exist yet first asks for
/// the contact's name, so the phone has somewhere to live.
fn contact_phone_update(
    api: &mut PendataApi,
    nisn: &Nisn,
    current: &Student,
    role: ContactRole,
) -> Result<FieldUpdate> {
    if current.contact(role).is_none() {
        let name = prompt::required(&format!("New {} name", role))?;
        api.edit_student(nisn, FieldUpdate::ContactName(role, Some(name)))?;
    }
    let phone = prompt::phone(&format!("New {} phone", role))?;
    Ok(FieldUpdate::ContactPhone(role, phone))
}

fn handle_view(api: &PendataApi) -> Result<()> {
    println!("{}", "--- View Student ---".bold());
    match prompt::optional("NISN (empty to list all)")? {
        None => {
            let result = api.list_students()?;
            print_messages(&result.messages);
            for s in &result.records {
                println!("{:<10} {} ({})", s.nisn, s.name, s.sex);
            }
        }
        Some(raw) => {
            let nisn = match raw.parse::<Nisn>() {
                Ok(nisn) => nisn,
                Err(e) => {
                    println!("{}", e.to_string().red());
                    return Ok(());
                }
            };
            match api.view_student(&nisn) {
                Ok(result) => {
                    if let Some(student) = result.records.first() {
                        print_student(student);
                    }
                }
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
    }
    Ok(())
}

fn handle_load(api: &mut PendataApi) -> Result<()> {
    println!("{}", "--- Load Data ---".bold());
    let path = PathBuf::from(prompt::required("File path")?);
    match api.load(&path) {
        Ok(result) => print_messages(&result.messages),
        Err(e) => println!(
            "{}",
            format!("Could not load {}: {}", path.display(), e).red()
        ),
    }
    Ok(())
}

fn handle_save(api: &mut PendataApi) -> Result<()> {
    println!("{}", "--- Save Data ---".bold());
    let proposed = api.propose_save_path();
    let path = PathBuf::from(prompt::with_default(
        "File path",
        &proposed.display().to_string(),
    )?);

    // Overwriting anything but the proposed target needs explicit consent.
    if path.exists() && path != proposed && !prompt::confirm("File exists, overwrite?")? {
        println!("Save cancelled");
        return Ok(());
    }

    let result = api.save(&path)?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_student(s: &Student) {
    println!("{}", "--- Student ---".bold());
    println!("NISN        : {}", s.nisn);
    println!("Name        : {}", s.name);
    println!("Sex         : {}", s.sex);
    println!("Birth place : {}", s.birth_place);
    println!("Birth date  : {}", s.birth_date);
    println!("Address     : {}", s.address);
    println!("Phone       : {}", display_opt(&s.phone));
    print_contact("Father", &s.father);
    print_contact("Mother", &s.mother);
    print_contact("Guardian", &s.guardian);
}

fn print_contact(label: &str, contact: &Option<Contact>) {
    match contact {
        Some(c) => {
            println!("{:<12}: {}", label, c.name);
            println!("{:<12}: {}", format!("{} phone", label), display_opt(&c.phone));
        }
        None => println!("{:<12}: -", label),
    }
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn contact_name(contact: &Option<Contact>) -> &str {
    contact.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
}

fn contact_phone(contact: &Option<Contact>) -> &str {
    contact
        .as_ref()
        .and_then(|c| c.phone.as_deref())
        .unwrap_or("-")
}
