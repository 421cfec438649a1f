//! CHOICE codec (X.691 Section 23)
//!
//! CHOICE types are Rust enums with data. The discriminant is the
//! alternative's position in declaration order; root alternatives are
//! encoded inline, extension alternatives inside an open type so a decoder
//! that does not know them can step over the payload.

use crate::json::{Map, ToJson, Value};
use crate::per::{PerError, PerResult, UperDecode, UperDecoder, UperEncode, UperEncoder};

/// Description of a CHOICE type
pub trait Choice {
    /// ASN.1 names of the alternatives known to this schema version
    const NAMES: &'static [&'static str];
    /// Number of alternatives in the extension root
    const ROOT_ALTERNATIVES: usize;
    const EXTENSIBLE: bool;

    /// Index of the active alternative, `None` for the unknown sentinel
    fn alternative(&self) -> Option<usize>;

    /// Sentinel for extension alternatives this schema version does not know
    fn unknown() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }

    fn name(&self) -> &'static str {
        self.alternative()
            .and_then(|i| Self::NAMES.get(i).copied())
            .unwrap_or("unknown")
    }
}

/// Encode the discriminant, then the payload written by `encode_payload`
pub fn encode_choice<C: Choice>(
    encoder: &mut UperEncoder,
    value: &C,
    encode_payload: impl FnOnce(&mut UperEncoder) -> PerResult<()>,
) -> PerResult<()> {
    let index = value.alternative().ok_or_else(|| {
        PerError::UnsupportedValue(format!(
            "{}: unknown alternative cannot be encoded",
            std::any::type_name::<C>()
        ))
    })?;
    encoder.encode_choice_index(index, C::ROOT_ALTERNATIVES, C::EXTENSIBLE)?;
    if index < C::ROOT_ALTERNATIVES {
        encode_payload(encoder)
    } else {
        encoder.encode_open_type(encode_payload)
    }
}

/// Decode the discriminant and hand the payload to `decode_payload`
///
/// Extension alternatives missing from `C::NAMES` are skipped and mapped
/// to the unknown sentinel.
pub fn decode_choice<C: Choice>(
    decoder: &mut UperDecoder<'_>,
    decode_payload: impl FnOnce(&mut UperDecoder<'_>, usize) -> PerResult<C>,
) -> PerResult<C> {
    let index = decoder.decode_choice_index(C::ROOT_ALTERNATIVES, C::EXTENSIBLE)?;
    if index < C::ROOT_ALTERNATIVES {
        return decode_payload(decoder, index);
    }
    if index < C::NAMES.len() {
        return decoder.decode_open_type(|dec| decode_payload(dec, index));
    }
    match C::unknown() {
        Some(unknown) => {
            let len = decoder.skip_open_type()?;
            log::warn!(
                "{}: skipped unknown alternative {} ({} octets)",
                std::any::type_name::<C>(),
                index,
                len
            );
            Ok(unknown)
        }
        None => Err(PerError::InvalidChoiceIndex {
            index,
            max: C::NAMES.len().saturating_sub(1),
        }),
    }
}

/// Error for a discriminant the payload decoder has no arm for
pub fn invalid_alternative<C: Choice>(index: usize) -> PerError {
    PerError::InvalidChoiceIndex {
        index,
        max: C::NAMES.len().saturating_sub(1),
    }
}

/// Dump a CHOICE as `{ "<alternative>": payload }`
pub fn choice_json<C: Choice>(value: &C, payload: Value) -> Value {
    let mut map = Map::new();
    map.insert(value.name().to_string(), payload);
    Value::Object(map)
}

/// `CHOICE { release NULL, setup T }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupRelease<T> {
    Release,
    Setup(T),
}

impl<T> Default for SetupRelease<T> {
    fn default() -> Self {
        SetupRelease::Release
    }
}

impl<T> SetupRelease<T> {
    pub fn is_setup(&self) -> bool {
        matches!(self, SetupRelease::Setup(_))
    }

    pub fn is_release(&self) -> bool {
        matches!(self, SetupRelease::Release)
    }

    pub fn setup(&self) -> Option<&T> {
        match self {
            SetupRelease::Setup(value) => Some(value),
            SetupRelease::Release => None,
        }
    }

    pub fn setup_mut(&mut self) -> Option<&mut T> {
        match self {
            SetupRelease::Setup(value) => Some(value),
            SetupRelease::Release => None,
        }
    }

    /// Switch to `setup`, keeping the payload if already set up
    pub fn set_setup(&mut self) -> &mut T
    where
        T: Default,
    {
        match self {
            SetupRelease::Setup(value) => value,
            SetupRelease::Release => {
                *self = SetupRelease::Setup(T::default());
                self.set_setup()
            }
        }
    }

    pub fn set_release(&mut self) {
        *self = SetupRelease::Release;
    }
}

impl<T> Choice for SetupRelease<T> {
    const NAMES: &'static [&'static str] = &["release", "setup"];
    const ROOT_ALTERNATIVES: usize = 2;
    const EXTENSIBLE: bool = false;

    fn alternative(&self) -> Option<usize> {
        match self {
            SetupRelease::Release => Some(0),
            SetupRelease::Setup(_) => Some(1),
        }
    }
}

impl<T: UperEncode> UperEncode for SetupRelease<T> {
    fn encode_uper(&self, encoder: &mut UperEncoder) -> PerResult<()> {
        encode_choice(encoder, self, |enc| match self {
            SetupRelease::Release => Ok(()),
            SetupRelease::Setup(value) => value.encode_uper(enc),
        })
    }
}

impl<T: UperDecode> UperDecode for SetupRelease<T> {
    fn decode_uper(decoder: &mut UperDecoder<'_>) -> PerResult<Self> {
        decode_choice(decoder, |dec, index| match index {
            0 => Ok(SetupRelease::Release),
            1 => T::decode_uper(dec).map(SetupRelease::Setup),
            other => Err(invalid_alternative::<Self>(other)),
        })
    }
}

impl<T: ToJson> ToJson for SetupRelease<T> {
    fn to_json(&self) -> Value {
        let payload = match self {
            SetupRelease::Release => Value::Null,
            SetupRelease::Setup(value) => value.to_json(),
        };
        choice_json(self, payload)
    }
}
