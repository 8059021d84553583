use std::collections::HashMap;

use crate::{
    classify::cycle::{CycleSet, CycleVector},
    foundation::{
        core::Geometry,
        error::{Mode2Error, Mode2Result},
    },
    quantize::colour::QuantizedFrames,
};

/// Palette slot for each distinct colour cycle.
///
/// Static cycles take slots `0..static_count` in ascending vector order; dynamic cycles take
/// the following slots, also ascending. The playback program only reprograms the dynamic slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColourIndexTable {
    slots: HashMap<CycleVector, u8>,
    static_count: usize,
}

impl ColourIndexTable {
    pub fn from_cycles(cycles: &CycleSet) -> Mode2Result<Self> {
        cycles.check_capacity()?;

        let mut slots = HashMap::with_capacity(cycles.len());
        for vector in cycles.static_cycles().chain(cycles.dynamic_cycles()) {
            let slot = u8::try_from(slots.len())
                .map_err(|_| Mode2Error::internal("palette slot overflow"))?;
            slots.insert(vector, slot);
        }

        Ok(Self {
            slots,
            static_count: cycles.static_count(),
        })
    }

    pub fn index_of(&self, vector: CycleVector) -> Option<u8> {
        self.slots.get(&vector).copied()
    }

    pub fn static_count(&self) -> usize {
        self.static_count
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// One palette slot per output pixel, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexGrid {
    geometry: Geometry,
    indices: Vec<u8>,
}

impl IndexGrid {
    /// Look up every pixel's colour cycle in `table`.
    pub fn build(frames: &QuantizedFrames, table: &ColourIndexTable) -> Mode2Result<Self> {
        let geometry = frames.geometry();
        let mut indices = Vec::with_capacity(geometry.pixel_count());
        for y in 0..geometry.height() {
            for x in 0..geometry.width() {
                let vector = CycleVector::from_codes(frames.history(x, y));
                let index = table.index_of(vector).ok_or_else(|| {
                    Mode2Error::internal(format!(
                        "colour cycle {:#o} at ({x}, {y}) has no palette slot",
                        vector.0
                    ))
                })?;
                indices.push(index);
            }
        }
        Ok(Self { geometry, indices })
    }

    /// Wrap precomputed indices (row-major); every index must fit in 4 bits.
    pub fn from_indices(geometry: Geometry, indices: Vec<u8>) -> Mode2Result<Self> {
        if indices.len() != geometry.pixel_count() {
            return Err(Mode2Error::validation(format!(
                "index count mismatch: got {}, expected {}",
                indices.len(),
                geometry.pixel_count()
            )));
        }
        if let Some(bad) = indices.iter().find(|&&i| i > 15) {
            return Err(Mode2Error::validation(format!(
                "palette index {bad} is out of range 0..=15"
            )));
        }
        Ok(Self { geometry, indices })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.indices[y as usize * self.geometry.width() as usize + x as usize]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/classify/index.rs"]
mod tests;
