//! Cell identity
//!
//! Two kinds of identifier exist:
//!
//! - **Generated** ids for content cells, produced by an [`IdGenerator`]
//! - **Content-derived** ids for text cells, `text-{line_index}-{hash}`, so the
//!   same line of text maps to the same id on every detection pass
//!
//! The text hash is the 32-bit `h = h * 31 + unit` rolling hash over UTF-16
//! code units, printed as its absolute value in base 36. Different strings can
//! collide; callers that re-associate configuration by id accept that.

/// Source of unique identifiers for content cells
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `{prefix}-{n}` ids, for tests and reproducible output
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("cell")
    }
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Content-derived id for a main-text cell
pub fn text_content_id(text: &str, line_index: usize) -> String {
    format!(
        "text-{}-{}",
        line_index,
        to_base36(text_hash(text).unsigned_abs())
    )
}

/// 32-bit rolling hash over UTF-16 code units
pub fn text_hash(text: &str) -> i32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
