/*
 *  heaplog.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Reader for the engine's JSON heap log
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

//! The logger writes one JSON document per run:
//!
//! ```text
//! {"log":[
//! {"type":"log","p1":"59","p2":"info","p3":"engine.cpp:563","p4":"Starting engine","p5":" - " },
//! {"type":"mem","p1":"10","p2":"0","p3":"add","p4":"101084","p5":"10000000" }
//! ]}
//! ```
//!
//! For `mem` records `p2` is the allocator, `p3` the action, `p4` the address
//! and `p5` the size. The footer is only written when the log is closed, so a
//! crashed run leaves it off.
//!
//! Once the text record cap is hit the logger writes a bare
//! [`LOG_CAP_MARKER`] line into the document. Allocation records keep
//! coming after it.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::deutils::{deserialize_lenient_i64, deserialize_string_from_anything, parse_i64_field};

const ADDRESS_SPACE: i64 = 1 << 32;

/// Plain text line the logger writes when it stops logging messages
pub const LOG_CAP_MARKER: &str = "ogeLogger: Logging stopped. Too many lines logged. <br>";

/// Error type for heap log loading.
#[derive(Debug, Error)]
pub enum HeapLogError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("record {index}: field {field} has invalid value '{value}'")]
    BadField { index: usize, field: &'static str, value: String },
    #[error("record {index}: unknown memory action '{action}'")]
    UnknownAction { index: usize, action: String },
}

/// What happened to a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemAction {
    Add,
    Rem,
    Clr,
    Del,
    Err,
}

impl FromStr for MemAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim() {
            "add" => Ok(MemAction::Add),
            "rem" => Ok(MemAction::Rem),
            "clr" => Ok(MemAction::Clr),
            "del" => Ok(MemAction::Del),
            "err" => Ok(MemAction::Err),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for MemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemAction::Add => "add",
            MemAction::Rem => "rem",
            MemAction::Clr => "clr",
            MemAction::Del => "del",
            MemAction::Err => "err",
        };
        f.write_str(s)
    }
}

/// Severity of a text record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Error,
    Release,
    Normal,
    Debug,
    Info,
    Verbose,
}

impl MessageLevel {
    /// Unknown tags read as `Normal`, which is what the logger writes by default
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "err" => MessageLevel::Error,
            "rel" => MessageLevel::Release,
            "dbg" => MessageLevel::Debug,
            "info" => MessageLevel::Info,
            "verb" => MessageLevel::Verbose,
            _ => MessageLevel::Normal,
        }
    }

    /// Level used when echoing the message through `log`
    pub fn to_log_level(self) -> log::Level {
        match self {
            MessageLevel::Error => log::Level::Error,
            MessageLevel::Release | MessageLevel::Normal | MessageLevel::Info => log::Level::Info,
            MessageLevel::Debug => log::Level::Debug,
            MessageLevel::Verbose => log::Level::Trace,
        }
    }
}

/// One allocator event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocEvent {
    /// Position of the record in the log
    pub index: usize,
    /// Update count when logged, if readable
    pub frame: Option<u64>,
    pub allocator: u32,
    pub action: MemAction,
    pub address: u64,
    pub size: u64,
}

/// One text record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub index: usize,
    pub frame: Option<u64>,
    pub level: MessageLevel,
    /// `file:line` of the call site
    pub location: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    Alloc(AllocEvent),
    Message(LogMessage),
}

/// A parsed heap log, records in file order
#[derive(Debug, Clone, Default)]
pub struct HeapLog {
    records: Vec<LogRecord>,
    truncated: bool,
    capped: bool,
}

#[derive(Debug, Deserialize)]
struct RawLog {
    log: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawRecord {
    Mem(RawFields),
    Log(RawFields),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct RawFields {
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    p1: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_string_from_anything")]
    p2: String,
    #[serde(default, deserialize_with = "deserialize_string_from_anything")]
    p3: String,
    #[serde(default, deserialize_with = "deserialize_string_from_anything")]
    p4: String,
    #[serde(default, deserialize_with = "deserialize_string_from_anything")]
    p5: String,
}

impl HeapLog {
    /// Parse a whole log document
    pub fn parse(text: &str) -> Result<Self, HeapLogError> {
        let stripped = strip_cap_marker(text);
        let capped = stripped.is_some();
        if capped {
            warn!("heap log hit the message cap, later text records are missing");
        }
        let text = stripped.as_deref().unwrap_or(text);

        let (raw, truncated) = match serde_json::from_str::<RawLog>(text) {
            Ok(raw) => (raw, false),
            Err(e) => match repair_footer(text) {
                Some(repaired) => match serde_json::from_str::<RawLog>(&repaired) {
                    Ok(raw) => {
                        warn!("heap log footer missing, reading it as truncated");
                        (raw, true)
                    }
                    Err(_) => return Err(e.into()),
                },
                None => return Err(e.into()),
            },
        };

        let mut records = Vec::with_capacity(raw.log.len());
        for (index, rec) in raw.log.into_iter().enumerate() {
            match rec {
                RawRecord::Mem(f) => records.push(LogRecord::Alloc(alloc_event(index, f)?)),
                RawRecord::Log(f) => records.push(LogRecord::Message(LogMessage {
                    index,
                    frame: frame(f.p1),
                    level: MessageLevel::from_tag(&f.p2),
                    location: f.p3,
                    text: f.p4,
                })),
                RawRecord::Other => {}
            }
        }
        Ok(Self { records, truncated, capped })
    }

    /// Read and parse the log at `path`
    pub fn from_path(path: &Path) -> Result<Self, HeapLogError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// True when the closing footer was missing
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// True when the logger stopped writing text records part way through
    pub fn is_capped(&self) -> bool {
        self.capped
    }

    pub fn alloc_events(&self) -> impl Iterator<Item = &AllocEvent> {
        self.records.iter().filter_map(|r| match r {
            LogRecord::Alloc(ev) => Some(ev),
            LogRecord::Message(_) => None,
        })
    }

    pub fn messages(&self) -> impl Iterator<Item = &LogMessage> {
        self.records.iter().filter_map(|r| match r {
            LogRecord::Message(msg) => Some(msg),
            LogRecord::Alloc(_) => None,
        })
    }
}

/// Drop every cap marker line, None if there are none
fn strip_cap_marker(text: &str) -> Option<String> {
    if !text.contains(LOG_CAP_MARKER) {
        return None;
    }
    let line = format!("{}\n", LOG_CAP_MARKER);
    Some(text.replace(&line, "").replace(LOG_CAP_MARKER, ""))
}

/// Close an unterminated `{"log":[ ...` document, None if it already looks closed
fn repair_footer(text: &str) -> Option<String> {
    let body = text.trim_end().trim_end_matches(',');
    if body.ends_with("]}") {
        return None;
    }
    Some(format!("{}\n]}}", body))
}

fn frame(p1: Option<i64>) -> Option<u64> {
    p1.and_then(|n| u64::try_from(n).ok())
}

fn alloc_event(index: usize, f: RawFields) -> Result<AllocEvent, HeapLogError> {
    let allocator = parse_i64_field(&f.p2)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| bad_field(index, "p2", &f.p2))?;
    let action = f
        .p3
        .parse::<MemAction>()
        .map_err(|action| HeapLogError::UnknownAction { index, action })?;
    let address = parse_word(&f.p4).ok_or_else(|| bad_field(index, "p4", &f.p4))?;
    let size = parse_word(&f.p5).ok_or_else(|| bad_field(index, "p5", &f.p5))?;

    Ok(AllocEvent { index, frame: frame(f.p1), allocator, action, address, size })
}

/// A 32-bit value printed with `%d`; negatives are addresses above 2GB
fn parse_word(text: &str) -> Option<u64> {
    let n = parse_i64_field(text)?;
    match n {
        n if n < -(ADDRESS_SPACE / 2) => None,
        n if n < 0 => Some((n + ADDRESS_SPACE) as u64),
        n => Some(n as u64),
    }
}

fn bad_field(index: usize, field: &'static str, value: &str) -> HeapLogError {
    HeapLogError::BadField { index, field, value: value.to_string() }
}
