use std::collections::BTreeMap;

use chrono::Duration;
use tracing::error;

use crate::calendar::{days_array, DEFAULT_WINDOW_DAYS};
use crate::errors::CodecError;
use crate::models::{CalendarDate, PackedHabit, Record, SerializedStore};

const PACK_RADIX: u32 = 36;

/// Packs records into the persisted blob: one entry per habit name, holding
/// the last covered day as `d` and the completion bits as a base-36 number in
/// `c`, oldest day in the highest bit.
///
/// Requires each habit's records to be an ascending run of consecutive days.
/// A history whose oldest days are unchecked loses them on a round trip
/// unless another habit pins a longer decode window: the blob cannot tell a
/// dropped zero bit from an absent day.
pub fn encode(records: &[Record]) -> Result<String, CodecError> {
    let packed = pack(records)?;
    Ok(serde_json::to_string(&packed)?)
}

/// Reads a persisted blob back into records. A missing or empty blob is an
/// empty history; an unreadable one is logged and treated the same way.
pub fn decode(blob: Option<&str>) -> Vec<Record> {
    let Some(blob) = blob else {
        return Vec::new();
    };
    if blob.is_empty() {
        return Vec::new();
    }
    match try_decode(blob) {
        Ok(records) => records,
        Err(err) => {
            error!("failed to parse habit blob: {err}");
            Vec::new()
        }
    }
}

/// Strict variant of [`decode`]: surfaces exactly what is wrong with a blob.
pub fn try_decode(blob: &str) -> Result<Vec<Record>, CodecError> {
    let packed: SerializedStore = serde_json::from_str(blob)?;
    unpack(&packed)
}

fn pack(records: &[Record]) -> Result<SerializedStore, CodecError> {
    let mut groups: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for record in records {
        groups.entry(record.name()).or_default().push(record);
    }

    let mut packed = SerializedStore::new();
    for (name, group) in &groups {
        let last_date = validate_run(name, group)?;
        let bits: Vec<bool> = group.iter().map(|record| record.is_checked()).collect();
        packed.insert(
            (*name).to_string(),
            PackedHabit {
                last_date: last_date.compact(),
                checks: bits_to_base36(&bits),
            },
        );
    }
    Ok(packed)
}

fn validate_run(name: &str, group: &[&Record]) -> Result<CalendarDate, CodecError> {
    let mut records = group.iter();
    let first = records
        .next()
        .ok_or_else(|| CodecError::BrokenRun(name.to_string()))?;
    let mut last = first.date();
    for record in records {
        let expected = CalendarDate::new(last.as_naive() + Duration::days(1));
        if record.date() != expected {
            return Err(CodecError::BrokenRun(name.to_string()));
        }
        last = record.date();
    }
    Ok(last)
}

fn unpack(packed: &SerializedStore) -> Result<Vec<Record>, CodecError> {
    // One shared window length: every habit is right-aligned inside it, so
    // shorter bit strings gain unchecked days at the old end.
    let mut habits = Vec::with_capacity(packed.len());
    let mut window_len = DEFAULT_WINDOW_DAYS;
    for (name, habit) in packed {
        let last_date = CalendarDate::parse_compact(&habit.last_date)?;
        let bits = base36_to_bits(&habit.checks).ok_or_else(|| CodecError::BadCheckString {
            name: name.clone(),
            value: habit.checks.clone(),
        })?;
        window_len = window_len.max(bits.len());
        habits.push((name, last_date, bits));
    }

    let mut records = Vec::with_capacity(window_len * habits.len());
    for (name, last_date, bits) in habits {
        let window = days_array(Some(last_date), window_len);
        let pad = window_len - bits.len();
        for (index, date) in window.into_iter().enumerate() {
            let checked = index >= pad && bits[index - pad];
            records.push(Record::new(name.as_str(), date, checked));
        }
    }
    Ok(records)
}

/// Reads a most-significant-first bit string as a base-36 number. The digit
/// vector is little-endian so a history can outgrow any native integer.
fn bits_to_base36(bits: &[bool]) -> String {
    let mut digits: Vec<u32> = Vec::new();
    for &bit in bits {
        let mut carry = u32::from(bit);
        for digit in &mut digits {
            let doubled = *digit * 2 + carry;
            *digit = doubled % PACK_RADIX;
            carry = doubled / PACK_RADIX;
        }
        while carry > 0 {
            digits.push(carry % PACK_RADIX);
            carry /= PACK_RADIX;
        }
    }
    if digits.is_empty() {
        return "0".to_string();
    }
    digits
        .iter()
        .rev()
        .map(|&digit| char::from_digit(digit, PACK_RADIX).unwrap_or('0'))
        .collect()
}

/// Inverse of [`bits_to_base36`]. Leading zero digits collapse, so the result
/// has no leading false bits; the zero value keeps a single false bit. Returns
/// `None` on any character outside base 36.
fn base36_to_bits(value: &str) -> Option<Vec<bool>> {
    let mut bits: Vec<u32> = Vec::new();
    for ch in value.chars() {
        let digit = ch.to_digit(PACK_RADIX)?;
        let mut carry = digit;
        for bit in &mut bits {
            let widened = *bit * PACK_RADIX + carry;
            *bit = widened % 2;
            carry = widened / 2;
        }
        while carry > 0 {
            bits.push(carry % 2);
            carry /= 2;
        }
    }
    if bits.is_empty() {
        bits.push(0);
    }
    Some(bits.iter().rev().map(|&bit| bit == 1).collect())
}
