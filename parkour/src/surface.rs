/// Identity and gameplay tags of a surface returned by a spatial probe.
///
/// # Why this exists
/// Probes report the surface they hit, and the locomotion rules need two things from it: whether
/// it belongs to an actor at all, and which gameplay tags that actor carries (e.g. "no wall run").
/// Physics backends typically expose a single opaque `u128` of user data per collider, so the
/// actor id and tags are packed into one value.
///
/// # Bit layout
/// Least-significant bit = bit 0:
///
/// - bits 0..=63   : `ActorId` (u64), `0` means "no owning actor"
/// - bits 64..=71  : [`SurfaceTag`] bits (u8)
/// - bits 72..=127 : reserved (must be zero for now)
///
/// # Compatibility
/// Treat the bit layout as a storage format. Changing it requires re-baking level data.
pub type PackedSurface = u128;

/// Identifier of the actor that owns a surface.
pub type ActorId = u64;

crate::define_bitmask_flags!(SurfaceTag, u8, {
    /// Wall runs never start on this surface.
    NoWallRun,
    /// Grapple probes may latch onto this surface.
    GrappleAnchor,
});

/// Set of [`SurfaceTag`]s carried by a surface.
pub type SurfaceTags = crate::bitmask_flags::BitmaskFlags<u8>;

/// A surface that belongs to an actor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub actor: ActorId,
    pub tags: SurfaceTags,
}

impl Surface {
    pub fn new(actor: ActorId, tags: &[SurfaceTag]) -> Self {
        Self {
            actor,
            tags: SurfaceTags::from_flags(tags),
        }
    }

    #[inline]
    pub fn has_tag(&self, tag: SurfaceTag) -> bool {
        self.tags.has(tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("surface reserved bits are non-zero")]
    ReservedBits,
    #[error("surface carries tags but has no owning actor")]
    TagsWithoutActor,
}

const TAG_SHIFT: u32 = ActorId::BITS;
const RESERVED_MASK: u128 = !0u128 << 72; // bits 72..127 set

/// Packs an actor id and its tags into a [`PackedSurface`].
pub fn pack_surface(actor: ActorId, tags: SurfaceTags) -> PackedSurface {
    (actor as u128) | ((tags.bits as u128) << TAG_SHIFT)
}

/// Packs an optional surface; `None` packs to zero (world geometry without an actor).
pub fn pack_optional_surface(surface: Option<Surface>) -> PackedSurface {
    surface.map_or(0, |s| pack_surface(s.actor, s.tags))
}

/// Unpacks a [`PackedSurface`].
///
/// Returns `Ok(None)` for geometry without an owning actor, and an error for values that do not
/// follow the packing contract (reserved bits set, or tags without an actor).
pub fn unpack_surface(packed: PackedSurface) -> Result<Option<Surface>, SurfaceError> {
    if (packed & RESERVED_MASK) != 0 {
        return Err(SurfaceError::ReservedBits);
    }

    let actor = (packed & u64::MAX as u128) as ActorId;
    let tags = SurfaceTags::new(((packed >> TAG_SHIFT) & u8::MAX as u128) as u8);

    if actor == 0 {
        if !tags.is_empty() {
            return Err(SurfaceError::TagsWithoutActor);
        }
        return Ok(None);
    }

    Ok(Some(Surface { actor, tags }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_places_actor_in_low_64_bits_and_tags_in_next_8_bits() {
        let actor: ActorId = 0x0123_4567_89AB_CDEF;
        let tags = SurfaceTags::from_flags(&[SurfaceTag::GrappleAnchor]);

        let packed = pack_surface(actor, tags);

        assert_eq!(packed, (actor as u128) | (0b10u128 << 64));
        assert_eq!((packed >> 72) as u64, 0);
    }

    #[test]
    fn unpack_recovers_actor_and_tags() {
        let surface = Surface::new(42, &[SurfaceTag::NoWallRun, SurfaceTag::GrappleAnchor]);
        let unpacked = unpack_surface(pack_optional_surface(Some(surface)));

        assert_eq!(unpacked, Ok(Some(surface)));
        let s = unpacked.unwrap().unwrap();
        assert!(s.has_tag(SurfaceTag::NoWallRun));
        assert!(s.has_tag(SurfaceTag::GrappleAnchor));
    }

    #[test]
    fn zero_is_actorless_geometry() {
        assert_eq!(unpack_surface(0), Ok(None));
        assert_eq!(pack_optional_surface(None), 0);
    }

    #[test]
    fn reserved_bits_are_rejected() {
        let packed = pack_surface(7, SurfaceTags::default()) | (1u128 << 72);
        assert_eq!(unpack_surface(packed), Err(SurfaceError::ReservedBits));
    }

    #[test]
    fn tags_without_actor_are_rejected() {
        let packed = pack_surface(0, SurfaceTags::from_flags(&[SurfaceTag::NoWallRun]));
        assert_eq!(unpack_surface(packed), Err(SurfaceError::TagsWithoutActor));
    }
}
