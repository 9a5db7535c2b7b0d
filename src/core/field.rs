//! Structured key/value fields
//!
//! A [`Field`] is a small tagged value attached to a structured record. Numeric
//! kinds share one 64-bit slot (floats keep their IEEE-754 bit pattern) and are
//! only turned into text when the record is encoded. Borrowed payloads
//! (`stringer`, `object`) are formatted on the caller's thread while the
//! record is built, so they never outlive the call.

use super::buffer::EncoderBuffer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

/// Discriminant of a [`Field`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    Int,
    Int64,
    Uint,
    Uint64,
    Uintptr,
    Float64,
    String,
    Object,
    Stringer,
}

#[derive(Clone, Copy)]
enum Lazy<'a> {
    Display(&'a (dyn fmt::Display + 'a)),
    Debug(&'a (dyn fmt::Debug + 'a)),
}

#[derive(Clone)]
pub struct Field<'a> {
    key: Cow<'a, str>,
    kind: FieldKind,
    bits: u64,
    text: Cow<'a, str>,
    lazy: Option<Lazy<'a>>,
}

impl<'a> Field<'a> {
    fn numeric(key: impl Into<Cow<'a, str>>, kind: FieldKind, bits: u64) -> Self {
        Self {
            key: key.into(),
            kind,
            bits,
            text: Cow::Borrowed(""),
            lazy: None,
        }
    }

    pub fn bool(key: impl Into<Cow<'a, str>>, val: bool) -> Self {
        Self::numeric(key, FieldKind::Bool, u64::from(val))
    }

    pub fn int(key: impl Into<Cow<'a, str>>, val: isize) -> Self {
        Self::numeric(key, FieldKind::Int, val as i64 as u64)
    }

    pub fn int64(key: impl Into<Cow<'a, str>>, val: i64) -> Self {
        Self::numeric(key, FieldKind::Int64, val as u64)
    }

    pub fn uint(key: impl Into<Cow<'a, str>>, val: usize) -> Self {
        Self::numeric(key, FieldKind::Uint, val as u64)
    }

    pub fn uint64(key: impl Into<Cow<'a, str>>, val: u64) -> Self {
        Self::numeric(key, FieldKind::Uint64, val)
    }

    /// Pointer-sized value rendered as lowercase hex with a `0x` prefix
    pub fn uintptr(key: impl Into<Cow<'a, str>>, val: usize) -> Self {
        Self::numeric(key, FieldKind::Uintptr, val as u64)
    }

    pub fn float64(key: impl Into<Cow<'a, str>>, val: f64) -> Self {
        Self::numeric(key, FieldKind::Float64, val.to_bits())
    }

    /// Integer nanoseconds, saturating at `i64::MAX`
    pub fn duration(key: impl Into<Cow<'a, str>>, val: Duration) -> Self {
        let nanos = i64::try_from(val.as_nanos()).unwrap_or(i64::MAX);
        Self::int64(key, nanos)
    }

    pub fn string(key: impl Into<Cow<'a, str>>, val: impl Into<Cow<'a, str>>) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::String,
            bits: 0,
            text: val.into(),
            lazy: None,
        }
    }

    /// Padded standard base64, encoded eagerly so the bytes need not outlive the call
    pub fn base64(key: impl Into<Cow<'a, str>>, val: &[u8]) -> Self {
        Self::string(key, STANDARD.encode(val))
    }

    /// Rendered through the value's `Display` impl at encode time
    pub fn stringer(key: impl Into<Cow<'a, str>>, val: &'a (dyn fmt::Display + 'a)) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Stringer,
            bits: 0,
            text: Cow::Borrowed(""),
            lazy: Some(Lazy::Display(val)),
        }
    }

    /// Best-effort structural dump through `Debug`.
    ///
    /// The output shape follows whatever the type's `Debug` impl produces and
    /// is not stable across types or versions. A failing or panicking impl is
    /// replaced by an inline error description.
    pub fn object(key: impl Into<Cow<'a, str>>, val: &'a (dyn fmt::Debug + 'a)) -> Self {
        Self {
            key: key.into(),
            kind: FieldKind::Object,
            bits: 0,
            text: Cow::Borrowed(""),
            lazy: Some(Lazy::Debug(val)),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Append the value's textual form to `buf`
    pub fn write_value(&self, buf: &mut EncoderBuffer) {
        match self.kind {
            FieldKind::Bool => buf.extend(if self.bits == 1 { b"true" } else { b"false" }),
            FieldKind::Int | FieldKind::Int64 => {
                let _ = buf.append_fmt(format_args!("{}", self.bits as i64));
            }
            FieldKind::Uint | FieldKind::Uint64 => {
                let _ = buf.append_fmt(format_args!("{}", self.bits));
            }
            FieldKind::Uintptr => {
                let _ = buf.append_fmt(format_args!("{:#x}", self.bits));
            }
            FieldKind::Float64 => {
                let _ = buf.append_fmt(format_args!("{}", f64::from_bits(self.bits)));
            }
            FieldKind::String => buf.append_escaped(&self.text),
            FieldKind::Stringer | FieldKind::Object => {
                if let Some(lazy) = self.lazy {
                    write_lazy(buf, lazy);
                }
            }
        }
    }

    /// Append `key=value`
    pub fn write_to(&self, buf: &mut EncoderBuffer) {
        buf.append_escaped(&self.key);
        buf.push(b'=');
        self.write_value(buf);
    }
}

fn write_lazy(buf: &mut EncoderBuffer, lazy: Lazy<'_>) {
    match lazy {
        Lazy::Display(val) => buf.append_user_fmt(format_args!("{}", val)),
        Lazy::Debug(val) => buf.append_user_fmt(format_args!("{:?}", val)),
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = EncoderBuffer::with_capacity(64);
        self.write_to(&mut buf);
        f.write_str(&buf.to_string_lossy())
    }
}
