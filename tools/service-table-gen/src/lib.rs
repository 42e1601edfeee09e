//! # Secure service table generator
//!
//! Reads `secure_service.tbl` and produces:
//!
//! * the Rust `ServiceId` module shared by the TEE and the REE
//!   ([`render_service_ids`]),
//! * the `-Wl,--wrap=` linker arguments for all `IDF` family services
//!   ([`render_wrap_list`]).
//!
//! Table lines have the form `<nr> <family> <name> <nargs>`. Blank lines and
//! lines starting with `#` are ignored. Service numbers must be unique; the
//! table is emitted sorted by number.

use core::fmt::Write as _;
use std::collections::BTreeMap;

/// Family tag of services that shadow an SDK symbol on the REE side.
pub const IDF_FAMILY: &str = "IDF";

/// One row of the service table.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ServiceEntry {
    pub nr: usize,
    pub family: String,
    pub name: String,
    pub nargs: usize,
}

impl ServiceEntry {
    /// Whether the REE links this service with `--wrap`.
    #[must_use]
    pub fn is_idf(&self) -> bool {
        self.family == IDF_FAMILY
    }

    /// `snake_case` table name as an `UpperCamelCase` variant name.
    #[must_use]
    pub fn variant_name(&self) -> String {
        self.name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_uppercase().to_string() + chars.as_str()
                })
            })
            .collect()
    }
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum TableError {
    #[error("line {line}: expected `<nr> <family> <name> <nargs>`, got {text:?}")]
    Malformed { line: usize, text: String },
    #[error("line {line}: invalid number {text:?}")]
    BadNumber { line: usize, text: String },
    #[error("line {line}: found duplicate secure service number {nr}")]
    Duplicate { line: usize, nr: usize },
    #[error("line {line}: service name {name:?} is not a valid identifier")]
    BadName { line: usize, name: String },
    #[error("service table is empty")]
    Empty,
}

fn parse_number(text: &str, line: usize) -> Result<usize, TableError> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| TableError::BadNumber {
        line,
        text: text.to_owned(),
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse a table, sorted by service number.
///
/// # Errors
/// Returns the first malformed line, unparsable number, invalid name or
/// duplicate service number encountered.
pub fn parse_table(input: &str) -> Result<Vec<ServiceEntry>, TableError> {
    let mut services = BTreeMap::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = text.split_whitespace().collect();
        let [nr, family, name, nargs] = fields[..] else {
            return Err(TableError::Malformed {
                line,
                text: text.to_owned(),
            });
        };

        let nr = parse_number(nr, line)?;
        let nargs = parse_number(nargs, line)?;
        if !is_identifier(name) {
            return Err(TableError::BadName {
                line,
                name: name.to_owned(),
            });
        }

        let entry = ServiceEntry {
            nr,
            family: family.to_owned(),
            name: name.to_owned(),
            nargs,
        };
        if services.insert(nr, entry).is_some() {
            return Err(TableError::Duplicate { line, nr });
        }
    }

    Ok(services.into_values().collect())
}

/// Number of table slots: the highest service number plus one.
#[must_use]
pub fn max_secure_services(services: &[ServiceEntry]) -> usize {
    services.last().map_or(0, |s| s.nr + 1)
}

/// Space separated `-Wl,--wrap=<name>` arguments for the `IDF` services.
#[must_use]
pub fn render_wrap_list(services: &[ServiceEntry]) -> String {
    services
        .iter()
        .filter(|s| s.is_idf())
        .map(|s| format!("-Wl,--wrap={}", s.name))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the `ServiceId` module.
///
/// # Errors
/// [`TableError::Empty`] if the table has no services.
pub fn render_service_ids(services: &[ServiceEntry]) -> Result<String, TableError> {
    if services.is_empty() {
        return Err(TableError::Empty);
    }

    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = render_into(&mut out, services);
    Ok(out)
}

fn render_into(out: &mut String, services: &[ServiceEntry]) -> core::fmt::Result {
    let max = max_secure_services(services);
    let count = services.len();

    writeln!(out, "//! Secure service numbers.")?;
    writeln!(out, "//!")?;
    writeln!(
        out,
        "//! THIS FILE WAS AUTOMATICALLY GENERATED BY `service-table-gen` FROM"
    )?;
    writeln!(out, "//! `secure_service.tbl`. DO NOT EDIT!")?;
    writeln!(out)?;
    writeln!(out, "use crate::Family;")?;
    writeln!(out)?;
    writeln!(
        out,
        "/// Number of slots in the secure service table (highest number plus one)."
    )?;
    writeln!(out, "pub const MAX_SECURE_SERVICES: usize = {max};")?;
    writeln!(out)?;
    writeln!(out, "/// Identifier of a secure service.")?;
    writeln!(out, "#[repr(usize)]")?;
    writeln!(
        out,
        "#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]"
    )?;
    writeln!(out, "pub enum ServiceId {{")?;
    for s in services {
        writeln!(out, "    {} = {},", s.variant_name(), s.nr)?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl ServiceId {{")?;
    writeln!(out, "    /// All services in table order.")?;
    writeln!(out, "    pub const ALL: [Self; {count}] = [")?;
    for s in services {
        writeln!(out, "        Self::{},", s.variant_name())?;
    }
    writeln!(out, "    ];")?;
    writeln!(out)?;
    writeln!(out, "    /// Service for a raw identifier, if one is assigned.")?;
    writeln!(out, "    #[must_use]")?;
    writeln!(out, "    pub const fn from_raw(nr: usize) -> Option<Self> {{")?;
    writeln!(out, "        match nr {{")?;
    for s in services {
        writeln!(out, "            {} => Some(Self::{}),", s.nr, s.variant_name())?;
    }
    writeln!(out, "            _ => None,")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /// Table name of the service (`_ss_` prefix omitted).")?;
    writeln!(out, "    #[must_use]")?;
    writeln!(out, "    pub const fn name(self) -> &'static str {{")?;
    writeln!(out, "        match self {{")?;
    for s in services {
        writeln!(out, "            Self::{} => \"{}\",", s.variant_name(), s.name)?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(
        out,
        "    /// Number of word arguments the service takes, not counting the id."
    )?;
    writeln!(out, "    #[must_use]")?;
    writeln!(out, "    pub const fn nargs(self) -> usize {{")?;
    writeln!(out, "        match self {{")?;
    for s in services {
        writeln!(out, "            Self::{} => {},", s.variant_name(), s.nargs)?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    #[must_use]")?;
    writeln!(out, "    pub const fn family(self) -> Family {{")?;
    writeln!(out, "        match self {{")?;
    for s in services {
        let family = if s.is_idf() { "Idf" } else { "Custom" };
        writeln!(out, "            Self::{} => Family::{family},", s.variant_name())?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(())
}
