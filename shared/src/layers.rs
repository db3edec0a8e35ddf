//! Collision layers and the bitmask used to filter scene queries.
//!
//! A collider belongs to exactly one [`CollisionLayer`]. Queries carry a [`LayerMask`] of the
//! layers they are allowed to see, so excluding the player's own collider or trigger volumes is
//! a matter of clearing their bits.

/// Layer a collider lives on. The discriminant is the bit index inside a [`LayerMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CollisionLayer {
    Default = 0,
    TransparentFx = 1,
    IgnoreRaycast = 2,
    Player = 3,
    Water = 4,
    Ui = 5,
    Level = 6,
    Trigger = 7,
}

impl CollisionLayer {
    pub const fn bit_index(self) -> u8 {
        self as u8
    }

    pub const fn mask(self) -> u32 {
        1 << self.bit_index()
    }

    /// Recover a layer from its bit index, e.g. when decoding collider user data.
    pub fn from_bit_index(index: u8) -> Option<Self> {
        use CollisionLayer::*;
        [
            Default,
            TransparentFx,
            IgnoreRaycast,
            Player,
            Water,
            Ui,
            Level,
            Trigger,
        ]
        .into_iter()
        .find(|layer| layer.bit_index() == index)
    }
}

/// Set of collision layers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayerMask {
    pub bits: u32,
}

impl Default for LayerMask {
    /// Everything a grapple ray should see: all layers except `IgnoreRaycast` and `Trigger`.
    fn default() -> Self {
        Self::ALL
            .without(CollisionLayer::IgnoreRaycast)
            .without(CollisionLayer::Trigger)
    }
}

impl LayerMask {
    pub const ALL: Self = Self { bits: u32::MAX };
    pub const NONE: Self = Self { bits: 0 };

    pub const fn new(bits: u32) -> Self {
        Self { bits }
    }

    pub const fn only(layer: CollisionLayer) -> Self {
        Self { bits: layer.mask() }
    }

    pub const fn with(self, layer: CollisionLayer) -> Self {
        Self {
            bits: self.bits | layer.mask(),
        }
    }

    pub const fn without(self, layer: CollisionLayer) -> Self {
        Self {
            bits: self.bits & !layer.mask(),
        }
    }

    pub fn add(&mut self, layer: CollisionLayer) {
        self.bits |= layer.mask();
    }

    pub fn remove(&mut self, layer: CollisionLayer) {
        self.bits &= !layer.mask();
    }

    pub const fn contains(&self, layer: CollisionLayer) -> bool {
        (self.bits & layer.mask()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        Self::only(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mask_hides_ignore_raycast_and_triggers() {
        let mask = LayerMask::default();
        assert!(!mask.contains(CollisionLayer::IgnoreRaycast));
        assert!(!mask.contains(CollisionLayer::Trigger));
        assert!(mask.contains(CollisionLayer::Default));
        assert!(mask.contains(CollisionLayer::Level));
        assert!(mask.contains(CollisionLayer::Player));
    }

    #[test]
    fn add_and_remove_toggle_single_bits() {
        let mut mask = LayerMask::NONE;
        mask.add(CollisionLayer::Water);
        mask.add(CollisionLayer::Level);
        assert_eq!(
            mask.bits,
            CollisionLayer::Water.mask() | CollisionLayer::Level.mask()
        );

        mask.remove(CollisionLayer::Water);
        assert_eq!(mask, LayerMask::only(CollisionLayer::Level));
        assert!(mask.contains(CollisionLayer::Level));
        assert!(!mask.contains(CollisionLayer::Ui));
    }

    #[test]
    fn bit_index_round_trips_through_from_bit_index() {
        for index in 0..8u8 {
            let layer = CollisionLayer::from_bit_index(index).unwrap();
            assert_eq!(layer.bit_index(), index);
        }
        assert_eq!(CollisionLayer::from_bit_index(31), None);
    }
}
