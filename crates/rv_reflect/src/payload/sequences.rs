//! `Serializable` implementation for ordered collections.

use crate::payload::{Payload, PayloadKind, ReadError, Serializable, WriteError};

impl<T: Serializable + Default> Serializable for Vec<T> {
    fn write(&self) -> Result<Payload, WriteError> {
        let mut items = Vec::with_capacity(self.len());
        for item in self {
            items.push(item.write()?);
        }
        Ok(Payload::Array(items))
    }

    /// Resizes the container to the payload length before reading elements,
    /// so the round-tripped collection always matches the payload exactly.
    fn read(payload: &Payload, out: &mut Self) -> Result<(), ReadError> {
        let items = payload
            .as_array()
            .ok_or_else(|| ReadError::kind_mismatch(PayloadKind::Array, payload))?;
        out.resize_with(items.len(), T::default);
        for (slot, item) in out.iter_mut().zip(items) {
            T::read(item, slot)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
