//! `Serializable` implementations for scalar types.

use crate::payload::{Payload, PayloadKind, ReadError, Serializable, WriteError};

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_serializable_signed {
    ($($ty:ty),* $(,)?) => {$(
        impl Serializable for $ty {
            #[inline]
            fn write(&self) -> Result<Payload, WriteError> {
                Ok(Payload::from(*self))
            }

            fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
                let number = payload
                    .as_i64()
                    .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::Number, payload))?;
                *out = <$ty>::try_from(number)
                    .map_err(|_| ReadError::NumberOutOfRange { target: stringify!($ty) })?;
                Ok(())
            }
        }
    )*};
}

macro_rules! impl_serializable_unsigned {
    ($($ty:ty),* $(,)?) => {$(
        impl Serializable for $ty {
            #[inline]
            fn write(&self) -> Result<Payload, WriteError> {
                Ok(Payload::from(*self))
            }

            fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
                let number = payload
                    .as_u64()
                    .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::Number, payload))?;
                *out = <$ty>::try_from(number)
                    .map_err(|_| ReadError::NumberOutOfRange { target: stringify!($ty) })?;
                Ok(())
            }
        }
    )*};
}

impl_serializable_signed!(i8, i16, i32, i64, isize);
impl_serializable_unsigned!(u8, u16, u32, u64, usize);

// -----------------------------------------------------------------------------
// Floats

impl Serializable for f64 {
    fn write(&self) -> Result<Payload, WriteError> {
        serde_json::Number::from_f64(*self)
            .map(Payload::Number)
            .ok_or(WriteError::NonFiniteNumber)
    }

    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
        *out = payload
            .as_f64()
            .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::Number, payload))?;
        Ok(())
    }
}

impl Serializable for f32 {
    fn write(&self) -> Result<Payload, WriteError> {
        serde_json::Number::from_f64(f64::from(*self))
            .map(Payload::Number)
            .ok_or(WriteError::NonFiniteNumber)
    }

    // Reads through f64, narrowing to the nearest representable value.
    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
        let number = payload
            .as_f64()
            .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::Number, payload))?;
        *out = number as f32;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Bool / char / String

impl Serializable for bool {
    #[inline]
    fn write(&self) -> Result<Payload, WriteError> {
        Ok(Payload::Bool(*self))
    }

    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
        *out = payload
            .as_bool()
            .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::Bool, payload))?;
        Ok(())
    }
}

impl Serializable for char {
    #[inline]
    fn write(&self) -> Result<Payload, WriteError> {
        Ok(Payload::String(self.to_string()))
    }

    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
        let text = payload
            .as_str()
            .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::String, payload))?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(value), None) => {
                *out = value;
                Ok(())
            }
            _ => Err(ReadError::InvalidChar),
        }
    }
}

impl Serializable for String {
    #[inline]
    fn write(&self) -> Result<Payload, WriteError> {
        Ok(Payload::String(self.clone()))
    }

    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
        let text = payload
            .as_str()
            .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::String, payload))?;
        out.clear();
        out.push_str(text);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::payload::{PayloadKind, ReadError, Serializable};

    #[test]
    fn integer_roundtrip() {
        let payload = 42_i32.write().unwrap();
        assert_eq!(i32::read_new(&payload).unwrap(), 42);

        let payload = u64::MAX.write().unwrap();
        assert_eq!(u64::read_new(&payload).unwrap(), u64::MAX);
    }

    #[test]
    fn integer_out_of_range() {
        let payload = 300_i64.write().unwrap();
        assert_eq!(
            u8::read_new(&payload),
            Err(ReadError::NumberOutOfRange { target: "u8" })
        );
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let err = i32::read_new(&json!("not a number")).unwrap_err();
        assert_eq!(
            err,
            ReadError::KindMismatch {
                expected: PayloadKind::Number,
                found: PayloadKind::String,
            }
        );
    }

    #[test]
    fn float_roundtrip() {
        let payload = 2.5_f32.write().unwrap();
        assert_eq!(f32::read_new(&payload).unwrap(), 2.5);
        assert!(f64::NAN.write().is_err());
    }

    #[test]
    fn char_requires_single_character() {
        let mut value = 'a';
        char::read(&'x'.write().unwrap(), &mut value).unwrap();
        assert_eq!(value, 'x');
        assert_eq!(char::read(&json!("xy"), &mut value), Err(ReadError::InvalidChar));
    }

    #[test]
    fn string_roundtrip() {
        let payload = String::from("riven").write().unwrap();
        assert_eq!(String::read_new(&payload).unwrap(), "riven");
    }
}
